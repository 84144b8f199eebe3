//! Last-known-good briefing cache.
//!
//! The most recent successfully fetched document lives at
//! `~/.daybrief/briefing.json`. A failed refresh falls back to this copy so
//! the dashboard keeps showing the previous state instead of an error.

use std::path::Path;

use tracing::warn;

use daybrief_shared::{Briefing, DaybriefError, Result, cache_path};

/// Write the briefing to the default cache location.
pub fn store_cached(briefing: &Briefing) -> Result<()> {
    store_cached_at(&cache_path()?, briefing)
}

/// Write the briefing to a specific cache path.
pub fn store_cached_at(path: &Path, briefing: &Briefing) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DaybriefError::io(parent, e))?;
    }

    let json =
        serde_json::to_string_pretty(briefing).map_err(|e| DaybriefError::parse(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| DaybriefError::io(path, e))
}

/// Load the cached briefing from the default location, if one exists.
pub fn load_cached() -> Result<Option<Briefing>> {
    load_cached_from(&cache_path()?)
}

/// Load the cached briefing from a specific path.
///
/// A missing file is `None`; an unreadable or unparseable file is also
/// `None` (logged at warn level) — the cache is best-effort, never fatal.
pub fn load_cached_from(path: &Path) -> Result<Option<Briefing>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| DaybriefError::io(path, e))?;
    match serde_json::from_str(&content) {
        Ok(briefing) => Ok(Some(briefing)),
        Err(e) => {
            warn!(?path, error = %e, "cached briefing unreadable, ignoring");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_briefing;

    fn temp_cache(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("daybrief_cache_{name}_{}.json", std::process::id()))
    }

    fn sample() -> Briefing {
        parse_briefing(
            r####"{"summary": "## MARKETS\nup", "generated_at": "2025-11-14T06:30:00Z"}"####,
        )
        .unwrap()
    }

    #[test]
    fn roundtrip() {
        let path = temp_cache("roundtrip");
        store_cached_at(&path, &sample()).expect("store");

        let loaded = load_cached_from(&path).expect("load").expect("present");
        assert_eq!(loaded.summary, sample().summary);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_none() {
        let path = temp_cache("missing");
        assert!(load_cached_from(&path).expect("load").is_none());
    }

    #[test]
    fn corrupt_file_is_none() {
        let path = temp_cache("corrupt");
        std::fs::write(&path, "{ definitely not a briefing").unwrap();

        assert!(load_cached_from(&path).expect("load").is_none());

        std::fs::remove_file(&path).ok();
    }
}
