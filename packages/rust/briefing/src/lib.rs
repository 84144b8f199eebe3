//! Briefing renderer: section classification and inline formatting.
//!
//! Given a briefing's markdown-subset summary, [`split_sections`] splits it
//! into named sections keyed off headings and classifies each against a fixed
//! category table, and [`format_body`] converts a section body into display
//! blocks (paragraph or bullet) with emphasis and numeric-token spans
//! resolved.
//!
//! Both entry points are pure, single-pass transforms: no I/O, no hidden
//! state, no errors. Malformed input passes through visually.

pub mod inline;
pub mod sections;

pub use inline::{BlockKind, DisplayBlock, Inline, format_body};
pub use sections::{Category, Section, Tone, split_sections};
