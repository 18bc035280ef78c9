//! Configuration management
//!
//! Handles loading, saving, and managing client settings.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::highlight::HighlightMode;

/// Directory name used under the platform config and data directories
const APP_DIR: &str = "senti";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the sentiment API server
    pub server_url: String,

    /// Path of the model list endpoint, relative to the server URL
    pub models_path: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Model used when none is given on the command line
    pub default_model: Option<String>,

    /// How tokens are matched against the text for highlighting
    pub highlight_mode: HighlightMode,

    /// Whether to color terminal output
    pub color: bool,

    /// Keep a history of analyses
    pub keep_history: bool,

    /// Maximum history size
    pub max_history_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "https://senti-api-server.herokuapp.com".into(),
            models_path: "/api/models".into(),
            timeout_secs: 15,
            default_model: None,
            highlight_mode: HighlightMode::First,
            color: true,
            keep_history: true,
            max_history_size: 100,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from disk or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load config from `path`, writing the defaults there if it does not exist yet
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let data = fs::read_to_string(path)
                .context("Failed to read config file")?;
            serde_json::from_str(&data)
                .context("Failed to parse config file")
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(path, data)
            .context("Failed to write config file")?;
        Ok(())
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .context("Failed to find data directory")?
            .join(APP_DIR);

        fs::create_dir_all(&data_dir)
            .context("Failed to create data directory")?;

        Ok(data_dir)
    }

    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to find config directory")?
            .join(APP_DIR);

        fs::create_dir_all(&config_dir)
            .context("Failed to create config directory")?;

        Ok(config_dir)
    }
}
