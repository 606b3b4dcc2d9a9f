//! Wish domain model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::comfort::{comfort_months, ComfortMonths};
use super::cooldown::resolve_cooldown;
use super::result::Error;
use super::{Settings, UserProfile};

/// Lifecycle status of a wish
///
/// Each status is also the partition the wish lives in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WishStatus {
    #[default]
    Active,
    Completed,
    Canceled,
}

impl WishStatus {
    pub const ALL: [WishStatus; 3] = [WishStatus::Active, WishStatus::Completed, WishStatus::Canceled];

    pub fn as_str(&self) -> &'static str {
        match self {
            WishStatus::Active => "active",
            WishStatus::Completed => "completed",
            WishStatus::Canceled => "canceled",
        }
    }

    /// Map a list filter to the partition it selects
    ///
    /// No filter (or an empty one) selects the active partition. An unknown
    /// filter selects nothing.
    pub fn from_filter(filter: Option<&str>) -> Option<WishStatus> {
        match filter.map(str::trim) {
            None | Some("") => Some(WishStatus::Active),
            Some(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for WishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WishStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(WishStatus::Active),
            "completed" => Ok(WishStatus::Completed),
            "canceled" => Ok(WishStatus::Canceled),
            other => Err(Error::validation(format!("unknown wish status: {}", other))),
        }
    }
}

/// The caller-supplied part of a new wish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishDraft {
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: String,
}

impl WishDraft {
    pub fn new(title: impl Into<String>, price: Decimal, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price,
            category: category.into(),
        }
    }
}

/// A desired purchase with cooling-off and affordability metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wish {
    pub id: String,
    pub title: String,
    pub price: Decimal,
    pub category: String,
    /// Cooling days recorded on the wish (starts at zero)
    pub cooling_days: u32,
    pub recommended_cooling: u32,
    pub still_want: bool,
    pub status: WishStatus,
    pub comfort_months: ComfortMonths,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wish {
    /// Build a new active wish, running both calculations against the
    /// user's current settings and profile
    pub fn create(
        id: impl Into<String>,
        draft: WishDraft,
        now: DateTime<Utc>,
        settings: &Settings,
        profile: &UserProfile,
    ) -> Self {
        Self {
            id: id.into(),
            recommended_cooling: resolve_cooldown(draft.price, settings),
            comfort_months: comfort_months(profile, draft.price),
            title: draft.title,
            price: draft.price,
            category: draft.category,
            cooling_days: 0,
            still_want: true,
            status: WishStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Recompute comfort months against a (new) profile
    ///
    /// Does not touch `updated_at`: this is a derived value, not a user edit.
    pub fn refresh_comfort(&mut self, profile: &UserProfile) {
        self.comfort_months = comfort_months(profile, self.price);
    }

    pub fn toggle_still_want(&mut self, now: DateTime<Utc>) {
        self.still_want = !self.still_want;
        self.updated_at = now;
    }

    pub fn set_status(&mut self, status: WishStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }

    /// Whole days since the wish was created
    pub fn days_waited(&self, now: DateTime<Utc>) -> u32 {
        let days = (now - self.created_at).num_days();
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }

    /// True once the recommended cooling-off period has passed
    pub fn is_cooled_down(&self, now: DateTime<Utc>) -> bool {
        self.days_waited(now) >= self.recommended_cooling
    }
}
