//! Shared types, error model, and configuration for daybrief.
//!
//! This crate is the foundation depended on by all other daybrief crates.
//! It provides:
//! - [`DaybriefError`] — the unified error type
//! - Domain types ([`Briefing`], [`SourceLink`], [`ActionItem`], [`ActionId`])
//! - Configuration ([`AppConfig`], config loading, data-file paths)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BriefingConfig, UiConfig, cache_path, config_dir, config_file_path, db_path,
    init_config, load_config, load_config_from, resolve_briefing_url,
};
pub use error::{DaybriefError, Result};
pub use types::{ActionId, ActionItem, Briefing, SourceLink};
