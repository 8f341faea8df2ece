//! Configuration loading and management for summix.
//!
//! Loads settings from `summix.toml` with environment variable overrides for
//! the fetch settings. Every field has a default, so no file is required.

use crate::extract::MIN_TEXT_LENGTH;
use crate::input::MAX_TEXT_LENGTH;
use crate::summary::DEFAULT_RATIO;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "summix.toml";

/// User-Agent string identifying this scraper
const USER_AGENT: &str = concat!(
    "summix/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/cladam/summix)"
);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}

/// HTTP fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Accept header sent with every request
    pub accept: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

/// Extraction limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Shortest text accepted as an article
    pub min_text_length: usize,
    /// Longest text accepted for summarisation
    pub max_text_length: usize,
    /// Try Readability before the built-in heuristics
    pub readability: bool,
}

/// Summariser settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Ratio used when none is given on the command line
    pub default_ratio: f64,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub extract: ExtractConfig,
    pub summary: SummaryConfig,
}

impl Config {
    /// Load configuration from the default location (summix.toml in cwd or home)
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                let mut config = Self::default();
                config.apply_env()?;
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Override fetch settings from environment variables
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Override fetch settings from `SUMMIX_*` variables looked up by `var`
    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(agent) = var("SUMMIX_USER_AGENT") {
            self.fetch.user_agent = agent;
        }
        if let Some(value) = var("SUMMIX_TIMEOUT_SECS") {
            self.fetch.timeout_secs = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "SUMMIX_TIMEOUT_SECS",
                value,
            })?;
        }
        Ok(())
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        let home_config = dirs::home_dir()?
            .join(".config")
            .join("summix")
            .join(CONFIG_FILE);
        home_config.exists().then_some(home_config)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            accept: "text/html,application/xhtml+xml".to_string(),
            timeout_secs: 12,
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_text_length: MIN_TEXT_LENGTH,
            max_text_length: MAX_TEXT_LENGTH,
            readability: true,
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            default_ratio: DEFAULT_RATIO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.fetch.timeout_secs, 12);
        assert_eq!(config.extract.min_text_length, 50);
        assert_eq!(config.extract.max_text_length, 200_000);
        assert!(config.extract.readability);
        assert_eq!(config.summary.default_ratio, 0.3);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[extract]\nreadability = false\n\n[summary]\ndefault_ratio = 0.5").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert!(!config.extract.readability);
        assert_eq!(config.extract.min_text_length, 50);
        assert_eq!(config.summary.default_ratio, 0.5);
        assert_eq!(config.fetch.accept, "text/html,application/xhtml+xml");
    }

    #[test]
    fn test_env_overrides_fetch_settings() {
        let mut config = Config::default();
        config
            .apply_overrides(overrides(&[
                ("SUMMIX_USER_AGENT", "test-agent/1.0"),
                ("SUMMIX_TIMEOUT_SECS", " 30 "),
            ]))
            .unwrap();
        assert_eq!(config.fetch.user_agent, "test-agent/1.0");
        assert_eq!(config.fetch.timeout_secs, 30);

        let mut untouched = Config::default();
        untouched.apply_overrides(overrides(&[])).unwrap();
        assert_eq!(untouched.fetch.user_agent, USER_AGENT);
        assert_eq!(untouched.fetch.timeout_secs, 12);
    }

    #[test]
    fn test_invalid_timeout_env() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(overrides(&[("SUMMIX_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv { name: "SUMMIX_TIMEOUT_SECS", ref value } if value == "soon"
        ));
        assert_eq!(err.to_string(), "invalid value for SUMMIX_TIMEOUT_SECS: soon");
    }

    #[test]
    fn test_process_env_is_read() {
        // only the user agent is set, and no other test asserts on it
        std::env::set_var("SUMMIX_USER_AGENT", "env-agent/2.0");
        let mut config = Config::default();
        config.apply_env().unwrap();
        std::env::remove_var("SUMMIX_USER_AGENT");
        assert_eq!(config.fetch.user_agent, "env-agent/2.0");
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fetch]\ntimeout_secs = \"soon\"").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
