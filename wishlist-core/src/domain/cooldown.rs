//! Cooldown bands - how long to wait before buying

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Settings;

/// Waiting period used when no configured band covers the price
pub const DEFAULT_COOLDOWN_DAYS: u32 = 7;

/// A price range mapped to a recommended waiting period
///
/// Both ends are inclusive. Bands may overlap; see [`resolve_cooldown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownRange {
    pub min: Decimal,
    pub max: Decimal,
    /// Waiting period in days
    pub period: u32,
}

impl CooldownRange {
    pub fn new(min: Decimal, max: Decimal, period: u32) -> Self {
        Self { min, max, period }
    }

    /// True if `min <= price <= max`
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Recommended cooling-off period in days for a price
///
/// Bands are checked in declared order and the first band containing the
/// price wins, even if a later band is a tighter fit.
pub fn resolve_cooldown(price: Decimal, settings: &Settings) -> u32 {
    settings
        .cooldowns
        .iter()
        .find(|band| band.contains(price))
        .map(|band| band.period)
        .unwrap_or(DEFAULT_COOLDOWN_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn settings_with(bands: Vec<CooldownRange>) -> Settings {
        Settings {
            cooldowns: bands,
            ..Settings::default()
        }
    }

    #[test]
    fn test_no_bands_uses_default() {
        let settings = Settings::default();
        assert_eq!(resolve_cooldown(d(1500), &settings), DEFAULT_COOLDOWN_DAYS);
    }

    #[test]
    fn test_price_between_bands_uses_default() {
        let settings = settings_with(vec![
            CooldownRange::new(d(0), d(100), 1),
            CooldownRange::new(d(5000), d(10000), 30),
        ]);
        assert_eq!(resolve_cooldown(d(1000), &settings), 7);
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let settings = settings_with(vec![CooldownRange::new(d(100), d(200), 3)]);
        assert_eq!(resolve_cooldown(d(100), &settings), 3);
        assert_eq!(resolve_cooldown(d(200), &settings), 3);
        assert_eq!(resolve_cooldown(Decimal::new(20001, 2), &settings), 7);
        assert_eq!(resolve_cooldown(Decimal::new(9999, 2), &settings), 7);
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let settings = settings_with(vec![
            CooldownRange::new(d(0), d(1000), 3),
            CooldownRange::new(d(1000), d(5000), 7),
        ]);
        // 1000 sits in both bands, the earlier one wins
        assert_eq!(resolve_cooldown(d(1000), &settings), 3);

        let reversed = settings_with(vec![
            CooldownRange::new(d(1000), d(5000), 7),
            CooldownRange::new(d(0), d(1000), 3),
        ]);
        assert_eq!(resolve_cooldown(d(1000), &reversed), 7);
    }

    #[test]
    fn test_wide_band_declared_first_shadows_narrow_band() {
        let settings = settings_with(vec![
            CooldownRange::new(d(0), d(100000), 14),
            CooldownRange::new(d(10), d(20), 1),
        ]);
        assert_eq!(resolve_cooldown(d(15), &settings), 14);
    }

    #[test]
    fn test_price_in_second_band() {
        let settings = settings_with(vec![
            CooldownRange::new(d(0), d(1000), 3),
            CooldownRange::new(d(1000), d(5000), 7),
        ]);
        assert_eq!(resolve_cooldown(d(1500), &settings), 7);
    }

    #[test]
    fn test_negative_price_only_matches_negative_band() {
        let settings = settings_with(vec![CooldownRange::new(d(0), d(1000), 3)]);
        assert_eq!(resolve_cooldown(d(-5), &settings), DEFAULT_COOLDOWN_DAYS);
    }
}
