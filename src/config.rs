//! Application configuration management.
//!
//! Configuration is stored at `~/.config/ai-catchup/config.json`. All
//! fields are optional; data and cache directories fall back to the
//! platform defaults, and the asset base URL can also come from the
//! `AICATCHUP_ASSET_BASE` environment variable (or a `.env` file).

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/data/cache directory paths
const APP_NAME: &str = "ai-catchup";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Base URL the offline asset cache installs from
    pub asset_base_url: Option<String>,
    /// Override for where the JSON documents live
    pub data_dir: Option<PathBuf>,
    /// Override for where asset buckets live
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        let data_dir =
            dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_dir =
            dirs::cache_dir().ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Asset base URL, with the environment taking precedence over the
    /// config file. `None` disables the offline asset cache.
    pub fn asset_base_url(&self) -> Option<String> {
        std::env::var("AICATCHUP_ASSET_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.asset_base_url.clone())
    }
}
