//! Wishlist Core - cooling-off and affordability planning for wishlists
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Wishes, settings, profiles and the two pure calculations
//! - **ports**: Trait definitions for storage, ids and time
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete stores (DuckDB, in-memory)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::duckdb::DuckDbRepository;
use config::Config;
use ports::WishlistRepository;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use services::{EntryPoint, LogEvent, LoggingService};
pub use domain::{
    comfort_months, resolve_cooldown, ComfortMonths, CooldownRange, Settings, UserProfile, Wish,
    WishDraft, WishStatus,
};

/// Database file inside the data directory
pub const DB_FILENAME: &str = "wishlist.duckdb";

/// Main context for wishlist operations
///
/// Holds the configuration, one shared store and the services built on it.
pub struct WishlistContext {
    pub config: Config,
    pub repository: Arc<dyn WishlistRepository>,
    pub wish_service: WishService,
    pub settings_service: SettingsService,
    pub status_service: StatusService,
}

impl WishlistContext {
    /// Open (or create) the DuckDB store in `data_dir`
    pub fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let config = Config::load(data_dir)?;

        let repository = DuckDbRepository::new(&data_dir.join(DB_FILENAME))?;
        repository.ensure_schema()?;

        Ok(Self::with_repository(config, Arc::new(repository)))
    }

    /// Build a context over any store
    pub fn with_repository(config: Config, repository: Arc<dyn WishlistRepository>) -> Self {
        Self {
            config,
            wish_service: WishService::new(Arc::clone(&repository)),
            settings_service: SettingsService::new(Arc::clone(&repository)),
            status_service: StatusService::new(Arc::clone(&repository)),
            repository,
        }
    }
}
