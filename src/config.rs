//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.select-star.toml` in current directory
//! 4. `~/.config/select-star/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [analysis]
//! ignored_tables = ["t000", "usr02"]   # never reported nor rewritten
//!
//! [output]
//! format = "json"                      # text, json, yaml
//! colored = false
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SELECT_STAR_FORMAT` | Output format |
//! | `SELECT_STAR_IGNORED_TABLES` | Comma separated table names |
//! | `NO_COLOR` | Disable colored output when set |

use std::{
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::error::{AppResult, config_error};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output:   OutputConfig
}

/// Engine configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AnalysisConfig {
    /// Tables whose fetch-all statements are skipped
    #[serde(default)]
    pub ignored_tables: Vec<String>
}

/// Output defaults, overridden by command-line flags
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputConfig {
    pub format:  Option<String>,
    pub colored: Option<bool>
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.select-star.toml)
    /// 3. Config file in home directory (~/.config/select-star/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("select-star")
                .join("config.toml");

            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        // Current directory config overrides the home config
        let local_config = PathBuf::from(".select-star.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        if let Ok(format) = env::var("SELECT_STAR_FORMAT") {
            config.output.format = Some(format);
        }

        if let Ok(tables) = env::var("SELECT_STAR_IGNORED_TABLES") {
            config.analysis.ignored_tables = tables
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
        }

        if env::var_os("NO_COLOR").is_some() {
            config.output.colored = Some(false);
        }

        Ok(config)
    }

    /// Read a single TOML configuration file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }
}
