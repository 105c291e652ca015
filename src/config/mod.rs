// src/config/mod.rs
use std::path::PathBuf;
use std::time::Duration;
use std::{env, fs};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How long a completed cycle waits before the next fetch. Fixed; the UI
/// exposes only the on/off toggle.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Environment variable holding the GNews API key.
pub const API_KEY_VAR: &str = "GNEWS_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub topic: String,
    pub auto_refresh: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            topic: "technology".to_string(),
            auto_refresh: true,
        }
    }
}

impl AppConfig {
    #[allow(dead_code)]
    pub fn from_str(contents: &str) -> Result<Self> {
        let config = serde_json::from_str(contents)?;
        Ok(config)
    }
}

fn app_dir(base: Option<PathBuf>) -> Option<PathBuf> {
    base.map(|d| d.join("newswatch"))
}

pub fn config_path() -> Option<PathBuf> {
    app_dir(dirs::config_dir()).map(|d| d.join("config.json"))
}

pub fn log_path() -> Option<PathBuf> {
    app_dir(dirs::data_dir()).map(|d| d.join("newswatch.log"))
}

/// Missing or unreadable config falls back to defaults; a fresh install has
/// no file yet.
pub fn load_config() -> AppConfig {
    let Some(path) = config_path() else {
        return AppConfig::default();
    };
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

pub fn save_config(config: &AppConfig) -> Result<()> {
    let path = config_path().context("no user config directory available")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(config)?;
    fs::write(path, data)?;
    Ok(())
}

/// The key is supplied out-of-band and is never written to the config file
/// or the logs.
pub fn api_key() -> Result<String> {
    env::var(API_KEY_VAR)
        .with_context(|| format!("{API_KEY_VAR} is not set; export your GNews API key first"))
}
