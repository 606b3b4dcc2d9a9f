//! CLI command implementations

pub mod add;
pub mod list;
pub mod logs;
pub mod profile;
pub mod settings;
pub mod status;
pub mod user;
pub mod wish;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use wishlist_core::config::Config;
use wishlist_core::{EntryPoint, LoggingService, WishlistContext};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let data_dir = get_data_dir().ok()?;
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log a command execution, ignoring any errors (logging should never break the app)
pub fn log_command(logger: &Option<LoggingService>, command: &str) {
    if let Some(l) = logger {
        let _ = l.log_command(command);
    }
}

/// Log a failed command with its full cause chain
pub fn log_error(logger: &Option<LoggingService>, command: &str, error: &anyhow::Error) {
    if let Some(l) = logger {
        let details = format!("{:?}", error);
        let _ = l.log_error(command, &error.to_string(), Some(&details));
    }
}

/// Get the data directory from WISHLIST_DIR or default to ~/.wishlist
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("WISHLIST_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory; set WISHLIST_DIR")?;
    Ok(home.join(".wishlist"))
}

/// Open the wishlist context in the data directory
pub fn get_context() -> Result<WishlistContext> {
    let data_dir = get_data_dir()?;
    WishlistContext::new(&data_dir).context("Failed to open wishlist database")
}

/// Pick the user a command acts as: `--user`, then the configured default
pub fn resolve_user(flag: Option<String>, config: &Config) -> Result<String> {
    let user = flag
        .or_else(|| config.default_user.clone())
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());

    match user {
        Some(user) => Ok(user),
        None => bail!("No user selected. Pass --user <name> or run `wl user <name>` once."),
    }
}
