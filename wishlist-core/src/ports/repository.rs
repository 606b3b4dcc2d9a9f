//! Repository port - wishlist storage abstraction

use crate::domain::result::Result;
use crate::domain::{Settings, UserProfile, Wish, WishDraft, WishStatus};

/// Storage for wishes, settings and profiles, keyed by user
///
/// Implementations own the calculation trigger points: `add_wish` resolves
/// the cooldown and comfort months from the user's current settings and
/// profile, and `save_profile` recomputes comfort months on every active
/// wish of that user before returning. Each call is atomic with respect to
/// every other call on the same store.
///
/// A wish that is not where an operation expects it is reported as `false`,
/// not as an error.
pub trait WishlistRepository: Send + Sync {
    // === Wishes ===

    /// Copy of one partition, in partition order
    ///
    /// Active wishes are most-recent-first; completed and canceled wishes
    /// are in the order they were archived.
    fn list_wishes(&self, user: &str, status: WishStatus) -> Result<Vec<Wish>>;

    /// Create a wish and put it at the front of the active partition
    fn add_wish(&self, user: &str, draft: WishDraft) -> Result<Wish>;

    /// Flip `still_want` on an active wish
    fn toggle_still_want(&self, user: &str, wish_id: &str) -> Result<bool>;

    /// Move an active wish to the end of the target partition
    fn update_status(&self, user: &str, wish_id: &str, status: WishStatus) -> Result<bool>;

    /// Delete an active wish
    fn remove_wish(&self, user: &str, wish_id: &str) -> Result<bool>;

    // === Settings ===

    /// Saved settings, or `Settings::default()` if none
    fn get_settings(&self, user: &str) -> Result<Settings>;

    /// Replace the user's settings
    fn save_settings(&self, user: &str, settings: Settings) -> Result<()>;

    /// Read, change and save the user's settings in one step
    ///
    /// Concurrent updates are applied one after another, so none is lost.
    /// Returns the settings as saved.
    fn update_settings(
        &self,
        user: &str,
        update: &mut dyn FnMut(&mut Settings),
    ) -> Result<Settings>;

    // === Profiles ===

    /// Saved profile, if any
    fn get_profile(&self, user: &str) -> Result<Option<UserProfile>>;

    /// Replace the user's profile and recompute comfort months on every
    /// active wish
    fn save_profile(&self, user: &str, profile: UserProfile) -> Result<()>;
}
