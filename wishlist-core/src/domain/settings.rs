//! Per-user settings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CooldownRange;

/// Per-user configuration
///
/// Missing settings read as `Settings::default()`. Saving replaces the whole
/// value; there is no field-level merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Cooldown bands in declared order (first match wins)
    #[serde(default)]
    pub cooldowns: Vec<CooldownRange>,
    #[serde(default, rename = "notificationFrequency")]
    pub notification_freq: String,
    /// Free-text list of products the user does not want reminders for
    #[serde(default)]
    pub excluded_products: String,
    #[serde(default)]
    pub notification_channel: String,
    #[serde(default)]
    pub total_spent: Decimal,
    #[serde(default)]
    pub total_purchases: u32,
    #[serde(default)]
    pub monthly_saving: Decimal,
}
