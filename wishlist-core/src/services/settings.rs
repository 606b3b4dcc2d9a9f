//! Settings service - per-user settings and financial profile

use std::sync::Arc;

use anyhow::Result;

use crate::domain::{CooldownRange, Settings, UserProfile};
use crate::ports::WishlistRepository;

/// Settings and profile operations on top of a repository
pub struct SettingsService {
    repository: Arc<dyn WishlistRepository>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn WishlistRepository>) -> Self {
        Self { repository }
    }

    pub fn get_settings(&self, user: &str) -> Result<Settings> {
        Ok(self.repository.get_settings(user)?)
    }

    pub fn save_settings(&self, user: &str, settings: Settings) -> Result<()> {
        Ok(self.repository.save_settings(user, settings)?)
    }

    /// Change the user's settings in place as one atomic step
    pub fn update_settings<F>(&self, user: &str, mut update: F) -> Result<Settings>
    where
        F: FnMut(&mut Settings),
    {
        Ok(self.repository.update_settings(user, &mut update)?)
    }

    /// Append a cooldown band. Earlier bands keep precedence on overlap.
    pub fn add_cooldown(&self, user: &str, range: CooldownRange) -> Result<Settings> {
        self.update_settings(user, |settings| settings.cooldowns.push(range.clone()))
    }

    /// Drop every cooldown band, leaving the default period in force
    pub fn clear_cooldowns(&self, user: &str) -> Result<Settings> {
        self.update_settings(user, |settings| settings.cooldowns.clear())
    }

    pub fn get_profile(&self, user: &str) -> Result<Option<UserProfile>> {
        Ok(self.repository.get_profile(user)?)
    }

    /// Saved profile, or the zero-value profile for `user`
    pub fn profile_or_default(&self, user: &str) -> Result<UserProfile> {
        Ok(self
            .get_profile(user)?
            .unwrap_or_else(|| UserProfile::new(user)))
    }

    /// Save the profile and recompute comfort months on active wishes
    pub fn save_profile(&self, user: &str, profile: UserProfile) -> Result<()> {
        Ok(self.repository.save_profile(user, profile)?)
    }
}
