//! User financial profile

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Financial facts the comfort calculation works from
///
/// Field names on the wire follow the web client (`totalSavingsProfile`,
/// `monthlySavingProfile`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub nick: String,
    #[serde(default)]
    pub salary: Decimal,
    #[serde(default, rename = "totalSavingsProfile")]
    pub total_savings: Decimal,
    #[serde(default, rename = "monthlySavingProfile")]
    pub monthly_saving: Decimal,
    /// Fraction of savings that must stay untouched, expected in [0, 1)
    #[serde(default)]
    pub comfort_percent: Decimal,
    #[serde(default)]
    pub blocked_categories: Vec<String>,
}

impl UserProfile {
    /// Zero-value profile for a user that never saved one
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            salary: Decimal::ZERO,
            total_savings: Decimal::ZERO,
            monthly_saving: Decimal::ZERO,
            comfort_percent: Decimal::ZERO,
            blocked_categories: Vec::new(),
        }
    }

    /// Check the figures for values the comfort calculation cannot use sensibly
    ///
    /// Nothing is rejected on save: out-of-range numbers simply produce
    /// sentinel results. Callers use this to warn the user.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.comfort_percent < Decimal::ZERO || self.comfort_percent >= Decimal::ONE {
            return Err("comfort percent should be a fraction in [0, 1)");
        }
        if self.total_savings < Decimal::ZERO {
            return Err("total savings cannot be negative");
        }
        if self.monthly_saving < Decimal::ZERO {
            return Err("monthly saving cannot be negative");
        }
        Ok(())
    }

    /// True if the category is on the user's blocked list (case-insensitive)
    pub fn blocks(&self, category: &str) -> bool {
        let category = category.trim();
        self.blocked_categories
            .iter()
            .any(|c| c.trim().eq_ignore_ascii_case(category))
    }

    /// Parse a comma-separated category list, dropping blanks and duplicates
    pub fn parse_categories(text: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for item in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if !out.iter().any(|c| c.eq_ignore_ascii_case(item)) {
                out.push(item.to_string());
            }
        }
        out
    }
}
