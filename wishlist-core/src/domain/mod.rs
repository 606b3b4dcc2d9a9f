//! Core domain entities
//!
//! Wishes, settings and profiles are plain data structures. The two
//! calculations (cooldown resolution and comfort months) are pure functions
//! over them - no I/O or locking here.

pub mod comfort;
pub mod cooldown;
mod profile;
pub mod result;
mod settings;
mod wish;

pub use comfort::{comfort_months, ComfortMonths};
pub use cooldown::{resolve_cooldown, CooldownRange, DEFAULT_COOLDOWN_DAYS};
pub use profile::UserProfile;
pub use settings::Settings;
pub use wish::{Wish, WishDraft, WishStatus};
