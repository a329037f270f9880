//! Configuration file support for liftplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftplan/config.toml`.

use crate::analysis::MAX_WINDOW_WEEKS;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Performance analysis parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Lookback window in weeks
    #[serde(default = "default_window_weeks")]
    pub window_weeks: u32,

    /// Most recent session logs handed to the generator
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_weeks: default_window_weeks(),
            history_limit: default_history_limit(),
        }
    }
}

/// Remote text-generation service configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("liftplan")
}

fn default_window_weeks() -> u32 {
    2
}

fn default_history_limit() -> usize {
    50
}

fn default_endpoint() -> String {
    "https://api.anthropic.com/v1/messages".into()
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".into()
}

fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    4096
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values the generator cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_WINDOW_WEEKS).contains(&self.analysis.window_weeks) {
            return Err(Error::Config(format!(
                "analysis.window_weeks must be between 1 and {}, got {}",
                MAX_WINDOW_WEEKS, self.analysis.window_weeks
            )));
        }
        if self.remote.enabled && self.remote.timeout_secs == 0 {
            return Err(Error::Config(
                "remote.timeout_secs must be positive when remote is enabled".into(),
            ));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("liftplan").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analysis.window_weeks, 2);
        assert_eq!(config.analysis.history_limit, 50);
        assert!(!config.remote.enabled);
        assert_eq!(config.remote.api_key_env, "ANTHROPIC_API_KEY");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.analysis.window_weeks, parsed.analysis.window_weeks);
        assert_eq!(config.remote.endpoint, parsed.remote.endpoint);
        assert_eq!(config.data.data_dir, parsed.data.data_dir);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[analysis]
window_weeks = 4

[remote]
enabled = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analysis.window_weeks, 4);
        assert_eq!(config.analysis.history_limit, 50); // default
        assert!(config.remote.enabled);
        assert_eq!(config.remote.timeout_secs, 30); // default
    }

    #[test]
    fn test_zero_window_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[analysis]\nwindow_weeks = 0\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_oversized_window_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[analysis]\nwindow_weeks = 4000000000\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));

        std::fs::write(&path, "[analysis]\nwindow_weeks = 52\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().analysis.window_weeks, 52);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.analysis.history_limit = 12;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.analysis.history_limit, 12);
    }
}
