//! Application configuration for daybrief.
//!
//! User config lives at `~/.daybrief/daybrief.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DaybriefError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "daybrief.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".daybrief";

/// Local database file name (action items, notes).
const DB_FILE_NAME: &str = "daybrief.db";

/// Last-known-good briefing cache file name.
const CACHE_FILE_NAME: &str = "briefing.json";

// ---------------------------------------------------------------------------
// Config structs (matching daybrief.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Briefing source settings.
    #[serde(default)]
    pub briefing: BriefingConfig,

    /// Dashboard presentation settings.
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[briefing]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BriefingConfig {
    /// URL of the pre-generated briefing JSON document.
    #[serde(default)]
    pub url: String,

    /// HTTP timeout in seconds for the fetch.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BriefingConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

/// `[ui]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Whether section cards start collapsed in the dashboard.
    #[serde(default)]
    pub collapsed_by_default: bool,

    /// Maximum number of source links shown in the sources panel.
    #[serde(default = "default_max_sources")]
    pub max_sources: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            collapsed_by_default: false,
            max_sources: default_max_sources(),
        }
    }
}

fn default_max_sources() -> usize {
    15
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.daybrief/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DaybriefError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.daybrief/daybrief.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Get the path to the local database (`~/.daybrief/daybrief.db`).
pub fn db_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(DB_FILE_NAME))
}

/// Get the path to the briefing cache file (`~/.daybrief/briefing.json`).
pub fn cache_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CACHE_FILE_NAME))
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DaybriefError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DaybriefError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DaybriefError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DaybriefError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DaybriefError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Resolve the briefing URL, preferring an explicit override over the config.
pub fn resolve_briefing_url(config: &AppConfig, override_url: Option<&str>) -> Result<Url> {
    let raw = match override_url {
        Some(u) => u,
        None if !config.briefing.url.is_empty() => config.briefing.url.as_str(),
        None => {
            return Err(DaybriefError::config(
                "briefing URL not configured. Set [briefing].url in \
                 ~/.daybrief/daybrief.toml or pass --url.",
            ));
        }
    };

    Url::parse(raw).map_err(|e| DaybriefError::config(format!("invalid briefing URL '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("timeout_secs"));
        assert!(toml_str.contains("max_sources"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.briefing.timeout_secs, 10);
        assert_eq!(parsed.ui.max_sources, 15);
        assert!(!parsed.ui.collapsed_by_default);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[briefing]
url = "https://briefings.example.com/today.json"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.briefing.url, "https://briefings.example.com/today.json");
        assert_eq!(config.briefing.timeout_secs, 10);
        assert_eq!(config.ui.max_sources, 15);
    }

    #[test]
    fn resolve_url_prefers_override() {
        let mut config = AppConfig::default();
        config.briefing.url = "https://a.example.com/brief.json".into();
        let url = resolve_briefing_url(&config, Some("https://b.example.com/brief.json"))
            .expect("resolve");
        assert_eq!(url.host_str(), Some("b.example.com"));
    }

    #[test]
    fn resolve_url_requires_some_source() {
        let config = AppConfig::default();
        let result = resolve_briefing_url(&config, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not configured"));
    }

    #[test]
    fn resolve_url_rejects_garbage() {
        let config = AppConfig::default();
        let result = resolve_briefing_url(&config, Some("not a url"));
        assert!(result.is_err());
    }
}
