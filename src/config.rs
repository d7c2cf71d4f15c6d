//! Configuration management for PopcornTUI
//!
//! Handles config file loading and API key management.
//! Config is stored at ~/.config/popcorntui/config.toml

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::omdb::DEFAULT_BASE_URL;
use crate::api::OmdbClient;

/// Shared demo key; set OMDB_API_KEY for anything beyond light use
const BUNDLED_OMDB_KEY: &str = "f7c7d00a";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// OMDb API key
    pub omdb_api_key: Option<String>,
    /// Alternative API endpoint (mirrors, tests)
    pub omdb_base_url: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// tracing filter directive, e.g. "popcorntui=debug"
    pub log_filter: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/popcorntui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("popcorntui").join("config.toml"))
    }

    /// Load config from the default location, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load config from `path`; a missing or malformed file yields defaults
    pub fn load_from(path: &Path) -> Self {
        Self::try_load_from(path).unwrap_or_default()
    }

    /// Load config from `path`, reporting why it could not be used
    pub fn try_load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Get OMDb API key with fallback chain:
    /// 1. Environment variable OMDB_API_KEY
    /// 2. Key from config file
    /// 3. Bundled shared key
    pub fn omdb_api_key(&self) -> String {
        if let Ok(key) = std::env::var("OMDB_API_KEY") {
            if !key.is_empty() {
                return key;
            }
        }
        self.omdb_api_key
            .clone()
            .unwrap_or_else(|| BUNDLED_OMDB_KEY.to_string())
    }

    pub fn base_url(&self) -> &str {
        self.omdb_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Build an OMDb client from this config
    pub fn omdb_client(&self) -> OmdbClient {
        OmdbClient::with_base_url(self.omdb_api_key(), self.base_url())
            .with_timeout(self.request_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.omdb_api_key.is_none());
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_parses_toml() {
        let config: Config = toml::from_str(
            r#"
            omdb_api_key = "abc123"
            omdb_base_url = "http://localhost:9000"
            request_timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.omdb_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.base_url(), "http://localhost:9000");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let config = Config::load_from(Path::new("/definitely/not/here/config.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_try_load_from_reports_bad_files() {
        let dir = std::env::temp_dir().join(format!("popcorntui-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let good = dir.join("good.toml");
        std::fs::write(&good, "omdb_api_key = \"k\"\nlog_filter = \"debug\"\n").unwrap();
        let config = Config::try_load_from(&good).unwrap();
        assert_eq!(config.omdb_api_key.as_deref(), Some("k"));
        assert_eq!(config.log_filter.as_deref(), Some("debug"));

        let broken = dir.join("broken.toml");
        std::fs::write(&broken, "omdb_api_key = [unterminated").unwrap();
        let err = Config::try_load_from(&broken).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
        assert_eq!(Config::load_from(&broken), Config::default());

        let missing = dir.join("missing.toml");
        let err = Config::try_load_from(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));

        let _ = std::fs::remove_dir_all(dir);
    }
}
