//! Configuration management for jumplabel.
//!
//! This crate provides configuration loading, saving, and validation
//! with TOML format and XDG directory conventions, plus the compiled
//! [`Settings`] the engine consumes at runtime.

mod settings;
mod xdg;

pub use settings::{Config, JumpSettings, LoggingSettings, Settings, StyleSettings};
pub use xdg::{get_config_dir, get_data_dir};

use anyhow::Result;
use std::path::PathBuf;

/// Default values as constants
pub mod defaults {
    /// Label alphabet, home-row first so near targets get easy codes.
    pub const CHARACTERS: &str = "fjdkslaghrueiwoqptyvncmxzb";
    pub const WORD_PATTERN: &str = r"\b\w";
    pub const END_OF_WORD_PATTERN: &str = r"\w\b";
    pub const CHAR_OFFSET: usize = 0;
    pub const ADJUST_SELECTION_BOUNDARY: bool = false;
    pub const DEBOUNCE_MS: u64 = 300;
    pub const LABEL_FOREGROUND: &str = "#ffffff";
    pub const LABEL_BACKGROUND: &str = "#e32791";
    pub const MIN_LOG_LEVEL: &str = "info";
}

impl Config {
    /// Load configuration from file.
    ///
    /// On first run, creates the config file with default values.
    /// Missing keys are auto-completed with defaults and the normalized
    /// content is written back.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if config_path.exists() {
            let original_content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&original_content)?;

            // Serialize back to get normalized content
            let normalized_content = toml::to_string_pretty(&config)?;
            if original_content != normalized_content {
                config.save()?;
            }

            Ok(config)
        } else {
            // First run - create config file with default values
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Check if path is the config file.
    pub fn is_config_file(path: &std::path::Path) -> bool {
        Self::config_file_path().map(|p| p == path).unwrap_or(false)
    }

    /// Validate config content without touching the filesystem.
    ///
    /// Parses the TOML and compiles the settings, so pattern and
    /// alphabet errors are caught before a live reload is applied.
    pub fn validate_content(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        Settings::from_config(&config)?;
        Ok(config)
    }
}
