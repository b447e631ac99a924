//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! the member store URL, the last used username, the default camp fee the
//! registration form starts with, the averaging policy for the statistics,
//! and the command used to print registration forms.
//!
//! Configuration is stored at `~/.config/campreg/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_API_BASE_URL;
use crate::stats::MissingValuePolicy;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "campreg";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the member store URL
pub const API_URL_ENV: &str = "CAMPREG_API_URL";

/// Fee the registration form is pre-filled with
const DEFAULT_CAMP_FEE: f64 = 5000.0;

/// Print command fed the plain-text form on stdin
const DEFAULT_PRINT_COMMAND: &str = "lp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_username: Option<String>,
    pub default_camp_fee: f64,
    pub missing_value_policy: MissingValuePolicy,
    pub print_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            last_username: None,
            default_camp_fee: DEFAULT_CAMP_FEE,
            missing_value_policy: MissingValuePolicy::default(),
            print_command: DEFAULT_PRINT_COMMAND.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Member store URL: environment override, then config, then default
    pub fn api_base_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_camp_fee, 5000.0);
        assert_eq!(config.print_command, "lp");
    }

    #[test]
    fn test_round_trip_and_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            last_username: Some("admin".into()),
            missing_value_policy: MissingValuePolicy::Exclude,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);

        std::fs::write(&path, r#"{"default_camp_fee": 4500}"#).unwrap();
        let partial = Config::load_from(&path).unwrap();
        assert_eq!(partial.default_camp_fee, 4500.0);
        assert_eq!(partial.missing_value_policy, MissingValuePolicy::AsZero);
    }
}
