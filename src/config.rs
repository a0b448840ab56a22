use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub intel: IntelConfig,
}

/// Settings for the medical-intelligence service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// Bound on each orchestration run's external lookups
    pub timeout_secs: u64,
}

impl Default for IntelConfig {
    fn default() -> Self {
        Self {
            base_url: crate::intel::client::DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            model: crate::intel::client::DEFAULT_MODEL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// The `GEMINI_API_KEY` environment variable overrides the stored key.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if !config_path.exists() {
            let config = Config::default();
            config.save()?;
            config
        } else {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str(&contents).context("Failed to parse config file")?
        };

        config.apply_env_override();
        Ok(config)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let mut config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.apply_env_override();
        Ok(config)
    }

    fn apply_env_override(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                self.intel.api_key = key;
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;

        Ok(home.join(".vitalguard").join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            intel: IntelConfig::default(),
        }
    }
}
