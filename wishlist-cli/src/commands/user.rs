//! User command - show or set the default user

use anyhow::{bail, Result};
use wishlist_core::config::Config;

use super::get_data_dir;
use crate::output::{info, success};

pub fn run(name: Option<String>, json: bool) -> Result<()> {
    let data_dir = get_data_dir()?;
    let mut config = Config::load(&data_dir)?;

    if let Some(name) = name {
        let name = name.trim();
        if name.is_empty() {
            bail!("User name cannot be empty");
        }
        config.set_default_user(name);
        config.save(&data_dir)?;
    }

    if json {
        println!("{}", serde_json::json!({ "defaultUser": config.default_user }));
        return Ok(());
    }

    match &config.default_user {
        Some(user) => success(&format!("Default user: {}", user)),
        None => info("No default user set. Run `wl user <name>`."),
    }
    Ok(())
}
