//! Application configuration management.
//!
//! Configuration is stored at `~/.config/hoopdeck/config.json`. Every field
//! is optional; missing values fall back to the defaults below. The
//! `HOOPDECK_BASE_URL`, `HOOPDECK_API_KEY` and `HOOPDECK_PAGE_SIZE`
//! environment variables take precedence over the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "hoopdeck";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default API root. The players endpoint is `{base}/players`.
pub const DEFAULT_BASE_URL: &str = "https://www.balldontlie.io/api/v1";

/// Number of players requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest `per_page` the API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

pub const ENV_BASE_URL: &str = "HOOPDECK_BASE_URL";
pub const ENV_API_KEY: &str = "HOOPDECK_API_KEY";
pub const ENV_PAGE_SIZE: &str = "HOOPDECK_PAGE_SIZE";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub page_size: Option<u32>,
    pub request_timeout_secs: Option<u64>,
    /// Keep the selected position across page loads when the new page has it.
    pub keep_filter_across_pages: bool,
}

impl Config {
    /// Read the config at `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Invalid config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn log_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME).join("logs"))
    }

    /// Return a copy with values from the process environment applied.
    pub fn with_env_overrides(&self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Return a copy with overrides looked up through `lookup`.
    /// Blank values are ignored; an unparsable page size is logged and ignored.
    pub fn with_overrides<F>(&self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = self.clone();
        if let Some(url) = non_blank(ENV_BASE_URL) {
            config.base_url = Some(url);
        }
        if let Some(key) = non_blank(ENV_API_KEY) {
            config.api_key = Some(key);
        }
        if let Some(raw) = non_blank(ENV_PAGE_SIZE) {
            match raw.parse::<u32>() {
                Ok(size) => config.page_size = Some(size),
                Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid {}", ENV_PAGE_SIZE),
            }
        }
        config
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Page size clamped to what the API accepts.
    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.page_size(), 50);
        assert!(config.api_key.is_none());
        assert!(!config.keep_filter_across_pages);
    }

    #[test]
    fn test_page_size_clamped() {
        let mut config = Config::default();
        config.page_size = Some(0);
        assert_eq!(config.page_size(), 1);
        config.page_size = Some(500);
        assert_eq!(config.page_size(), MAX_PAGE_SIZE);
        config.page_size = Some(25);
        assert_eq!(config.page_size(), 25);
    }

    #[test]
    fn test_parse_partial_file() {
        let config: Config = serde_json::from_str(r#"{"page_size": 10}"#).unwrap();
        assert_eq!(config.page_size(), 10);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);

        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut file = Config::default();
        file.base_url = Some("https://file.example".to_string());
        file.page_size = Some(20);

        let config = file.with_overrides(lookup_from(&[
            (ENV_BASE_URL, "http://localhost:8080/v1"),
            (ENV_API_KEY, "secret"),
            (ENV_PAGE_SIZE, "30"),
        ]));

        assert_eq!(config.base_url(), "http://localhost:8080/v1");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.page_size(), 30);
        // The original is untouched
        assert_eq!(file.base_url(), "https://file.example");
    }

    #[test]
    fn test_overrides_ignore_blank_and_invalid() {
        let mut file = Config::default();
        file.page_size = Some(20);

        let config = file.with_overrides(lookup_from(&[
            (ENV_BASE_URL, "   "),
            (ENV_PAGE_SIZE, "lots"),
        ]));

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.page_size(), 20);
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        // Missing file means defaults
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let mut config = Config::default();
        config.api_key = Some("secret".to_string());
        config.keep_filter_across_pages = true;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"api_key": "secret", "page_size": 25,}"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config file"));
    }
}
