//! Configuration management
//!
//! Reads `config.json` from the data directory:
//! ```json
//! { "defaultUser": "meow" }
//! ```
//! Keys this crate does not manage are kept as-is when saving.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the configured default user
pub const USER_ENV: &str = "WISHLIST_USER";

/// Raw config.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_user: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Wishlist configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// User key for commands that do not name one
    pub default_user: Option<String>,
}

impl Config {
    /// Load config from the data directory
    ///
    /// A missing file yields the defaults; a file that is not valid JSON is
    /// an error so that saving never overwrites it. `WISHLIST_USER` takes
    /// precedence over the stored default user.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_file(data_dir)?;

        let default_user = match std::env::var(USER_ENV).ok() {
            Some(user) if !user.trim().is_empty() => Some(user.trim().to_string()),
            _ => raw.default_user,
        };

        Ok(Self { default_user })
    }

    /// Save config to the data directory, preserving unmanaged keys
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let mut raw = read_file(data_dir)?;
        raw.default_user = self.default_user.clone();

        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let content = serde_json::to_string_pretty(&raw)?;
        std::fs::write(data_dir.join(CONFIG_FILE), content)?;
        Ok(())
    }

    pub fn set_default_user(&mut self, user: impl Into<String>) {
        self.default_user = Some(user.into());
    }
}

fn read_file(data_dir: &Path) -> Result<ConfigFile> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file {}; fix or delete it", path.display()))
}
