//! Configuration management for dynqs
//!
//! Configuration comes from, in increasing priority: defaults, a TOML file,
//! environment variables, and command-line flags (applied by the caller).

use anyhow::{anyhow, Context, Result};
use dynqs_filter::OptionsConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file names searched for, in order
const CONFIG_NAMES: [&str; 2] = ["dynqs.toml", ".dynqs.toml"];

/// Main configuration structure for dynqs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Parser options
    pub parser: OptionsConfig,
    /// Output configuration
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Emit single-line JSON
    pub compact: bool,
}

impl Config {
    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Invalid TOML config {}: {}", path.display(), e))?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from an explicit path, or the first file found in
    /// the standard locations, then apply environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::find_config_file(None) {
                Some(path) => Self::load_from_file(&path)?,
                None => Self::default(),
            },
        };

        config.merge_env_with_reader(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Find configuration file in standard locations
    pub(crate) fn find_config_file(current_dir: Option<&Path>) -> Option<PathBuf> {
        let current_dir = current_dir
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        for name in CONFIG_NAMES {
            let path = current_dir.join(name);
            if path.exists() {
                return Some(path);
            }
        }

        let config_dir = dirs::config_dir()?.join("dynqs");
        CONFIG_NAMES
            .iter()
            .map(|name| config_dir.join(name))
            .find(|path| path.exists())
    }

    /// Merge configuration from environment variables with custom reader
    pub(crate) fn merge_env_with_reader<F>(&mut self, env_reader: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = env_reader("DYNQS_TO_BOOLEAN") {
            self.parser.string.to_boolean = is_enabled(&val);
        }
        if let Some(val) = env_reader("DYNQS_TO_NUMBER") {
            self.parser.string.to_number = is_enabled(&val);
        }
        if let Some(val) = env_reader("DYNQS_COMPACT") {
            self.output.compact = is_enabled(&val);
        }
    }
}

fn is_enabled(val: &str) -> bool {
    val != "0" && !val.eq_ignore_ascii_case("false")
}
