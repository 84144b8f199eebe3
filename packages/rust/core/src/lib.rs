//! Core orchestration for daybrief.
//!
//! Ties fetch, cache, and the briefing renderer together: the refresh
//! pipeline produces the current document (live or cached), and the
//! dashboard module turns it into the view model both frontends render.

pub mod dashboard;
pub mod refresh;
