// ABOUTME: Application configuration loaded from ~/.termbridge/config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Platform base URL, e.g. `https://console.example.com`.
    pub platform_url: Option<String>,
    /// Shell candidates offered by the picker.
    pub shells: Vec<String>,
    /// OS user passed to the remote attach point, if any.
    pub default_user: Option<String>,
    pub scrollback_lines: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            platform_url: None,
            shells: vec!["/bin/bash".to_string(), "/bin/sh".to_string()],
            default_user: None,
            scrollback_lines: 10_000,
        }
    }
}

impl AppConfig {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".termbridge"))
    }

    /// Load the user config, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::config_dir() {
            Some(dir) => Self::load_from(&dir.join("config.toml")),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config at {}", path.display()))
    }
}
