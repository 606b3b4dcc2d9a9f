//! Comfort months - how long until a price fits without touching the buffer

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::UserProfile;

/// Months until a wish is affordable while keeping the comfort buffer intact
///
/// Stored and serialized as a single integer: `-1` for [`Impossible`],
/// `0` for [`AffordableNow`], `n > 0` for [`MonthsNeeded`].
///
/// [`Impossible`]: ComfortMonths::Impossible
/// [`AffordableNow`]: ComfortMonths::AffordableNow
/// [`MonthsNeeded`]: ComfortMonths::MonthsNeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ComfortMonths {
    /// Never affordable under the current savings rate and buffer
    Impossible,
    AffordableNow,
    MonthsNeeded(u32),
}

impl ComfortMonths {
    /// Integer form used on the wire and in storage
    pub fn as_i64(self) -> i64 {
        match self {
            ComfortMonths::Impossible => -1,
            ComfortMonths::AffordableNow => 0,
            ComfortMonths::MonthsNeeded(n) => i64::from(n),
        }
    }

    pub fn is_affordable_now(self) -> bool {
        self == ComfortMonths::AffordableNow
    }
}

impl From<i64> for ComfortMonths {
    fn from(value: i64) -> Self {
        match value {
            v if v < 0 => ComfortMonths::Impossible,
            0 => ComfortMonths::AffordableNow,
            v => ComfortMonths::MonthsNeeded(u32::try_from(v).unwrap_or(u32::MAX)),
        }
    }
}

impl From<ComfortMonths> for i64 {
    fn from(value: ComfortMonths) -> Self {
        value.as_i64()
    }
}

impl fmt::Display for ComfortMonths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComfortMonths::Impossible => write!(f, "never"),
            ComfortMonths::AffordableNow => write!(f, "now"),
            ComfortMonths::MonthsNeeded(1) => write!(f, "1 month"),
            ComfortMonths::MonthsNeeded(n) => write!(f, "{} months", n),
        }
    }
}

/// Months until `price` is affordable for `profile`
///
/// With `remain = 1 - comfort_percent`, the usable part of current savings
/// is `total_savings * remain` and the usable part of each month's saving is
/// `monthly_saving * remain`. Arithmetic that leaves the `Decimal` range
/// is resolved by sign: savings beyond the range cover any price, a shortfall
/// beyond the range is `Impossible`.
pub fn comfort_months(profile: &UserProfile, price: Decimal) -> ComfortMonths {
    let Some(remain) = Decimal::ONE.checked_sub(profile.comfort_percent) else {
        // Buffer far below zero: remain is beyond the range and positive
        return if profile.total_savings > Decimal::ZERO {
            ComfortMonths::AffordableNow
        } else {
            ComfortMonths::Impossible
        };
    };
    if remain <= Decimal::ZERO {
        return ComfortMonths::Impossible;
    }

    let usable = profile.total_savings.checked_mul(remain);
    let left = match usable.and_then(|usable| price.checked_sub(usable)) {
        Some(left) => left,
        None => {
            // Out of range: only the sign of `price - usable` matters
            let covered = match usable {
                Some(usable) => price < usable,
                None => profile.total_savings > Decimal::ZERO,
            };
            return if covered {
                ComfortMonths::AffordableNow
            } else {
                ComfortMonths::Impossible
            };
        }
    };
    if left <= Decimal::ZERO {
        return ComfortMonths::AffordableNow;
    }

    if profile.monthly_saving <= Decimal::ZERO {
        return ComfortMonths::Impossible;
    }

    let months = match profile.monthly_saving.checked_mul(remain) {
        // A monthly rate beyond the range covers any shortfall in one month
        None => return ComfortMonths::MonthsNeeded(1),
        Some(rate) => match left.checked_div(rate) {
            Some(months) => months.ceil(),
            None => return ComfortMonths::MonthsNeeded(u32::MAX),
        },
    };

    ComfortMonths::MonthsNeeded(months.to_u32().unwrap_or(u32::MAX).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(total_savings: i64, monthly_saving: i64, comfort_percent: Decimal) -> UserProfile {
        UserProfile {
            total_savings: Decimal::from(total_savings),
            monthly_saving: Decimal::from(monthly_saving),
            comfort_percent,
            ..UserProfile::new("test")
        }
    }

    fn half() -> Decimal {
        Decimal::new(5, 1)
    }

    #[test]
    fn test_exactly_covered_by_savings() {
        let p = profile(20000, 5000, half());
        assert_eq!(comfort_months(&p, Decimal::from(10000)), ComfortMonths::AffordableNow);
    }

    #[test]
    fn test_months_needed() {
        let p = profile(20000, 5000, half());
        // left = 30000 - 10000 = 20000, rate = 2500
        assert_eq!(comfort_months(&p, Decimal::from(30000)), ComfortMonths::MonthsNeeded(8));
    }

    #[test]
    fn test_partial_month_rounds_up() {
        let p = profile(20000, 5000, half());
        assert_eq!(comfort_months(&p, Decimal::from(10001)), ComfortMonths::MonthsNeeded(1));
        assert_eq!(comfort_months(&p, Decimal::from(12501)), ComfortMonths::MonthsNeeded(2));
    }

    #[test]
    fn test_full_buffer_is_impossible() {
        for percent in [Decimal::ONE, Decimal::new(15, 1)] {
            let p = profile(1_000_000, 5000, percent);
            assert_eq!(comfort_months(&p, Decimal::ZERO), ComfortMonths::Impossible);
            assert_eq!(comfort_months(&p, Decimal::from(1)), ComfortMonths::Impossible);
        }
    }

    #[test]
    fn test_no_monthly_saving_is_impossible() {
        let p = profile(1000, 0, Decimal::ZERO);
        assert_eq!(comfort_months(&p, Decimal::from(1001)), ComfortMonths::Impossible);

        let p = profile(1000, -50, Decimal::ZERO);
        assert_eq!(comfort_months(&p, Decimal::from(1001)), ComfortMonths::Impossible);
    }

    #[test]
    fn test_no_monthly_saving_but_affordable() {
        let p = profile(1000, 0, Decimal::ZERO);
        assert_eq!(comfort_months(&p, Decimal::from(1000)), ComfortMonths::AffordableNow);
    }

    #[test]
    fn test_zero_profile() {
        let p = UserProfile::new("nobody");
        assert_eq!(comfort_months(&p, Decimal::ZERO), ComfortMonths::AffordableNow);
        assert_eq!(comfort_months(&p, Decimal::from(1)), ComfortMonths::Impossible);
    }

    #[test]
    fn test_high_buffer_uses_exact_arithmetic() {
        // remain = 0.1 exactly: usable savings 2000, rate 500 a month
        let p = profile(20000, 5000, Decimal::new(9, 1));
        assert_eq!(comfort_months(&p, Decimal::from(10000)), ComfortMonths::MonthsNeeded(16));
        assert_eq!(comfort_months(&p, Decimal::from(2000)), ComfortMonths::AffordableNow);
    }

    #[test]
    fn test_savings_beyond_range_cover_price() {
        // remain = 2: usable savings would be 2 * MAX
        let p = UserProfile {
            total_savings: Decimal::MAX,
            monthly_saving: Decimal::ONE,
            comfort_percent: Decimal::from(-1),
            ..UserProfile::new("huge")
        };
        assert_eq!(comfort_months(&p, Decimal::ONE), ComfortMonths::AffordableNow);

        // price - usable = -2 * MAX
        let p = UserProfile {
            total_savings: Decimal::MAX,
            ..profile(0, 1, Decimal::ZERO)
        };
        assert_eq!(comfort_months(&p, -Decimal::MAX), ComfortMonths::AffordableNow);

        // 1 - comfort_percent itself is out of range
        let p = UserProfile {
            comfort_percent: Decimal::MIN,
            ..profile(1, 1, Decimal::ZERO)
        };
        assert_eq!(comfort_months(&p, Decimal::MAX), ComfortMonths::AffordableNow);
    }

    #[test]
    fn test_shortfall_beyond_range_is_impossible() {
        let p = UserProfile {
            total_savings: Decimal::MIN,
            monthly_saving: Decimal::ONE,
            comfort_percent: Decimal::from(-1),
            ..UserProfile::new("debt")
        };
        assert_eq!(comfort_months(&p, Decimal::ONE), ComfortMonths::Impossible);

        let p = UserProfile {
            total_savings: Decimal::MIN,
            ..profile(0, 1, Decimal::ZERO)
        };
        assert_eq!(comfort_months(&p, Decimal::MAX), ComfortMonths::Impossible);
    }

    #[test]
    fn test_monthly_rate_beyond_range() {
        let p = UserProfile {
            monthly_saving: Decimal::MAX,
            comfort_percent: Decimal::from(-1),
            ..UserProfile::new("rich")
        };
        assert_eq!(comfort_months(&p, Decimal::from(5)), ComfortMonths::MonthsNeeded(1));

        // left / rate beyond the range
        let p = UserProfile {
            monthly_saving: Decimal::new(1, 28),
            ..profile(0, 0, Decimal::ZERO)
        };
        assert_eq!(comfort_months(&p, Decimal::MAX), ComfortMonths::MonthsNeeded(u32::MAX));
    }

    #[test]
    fn test_huge_month_count_saturates() {
        let p = profile(0, 1, Decimal::ZERO);
        let price = Decimal::from(u64::MAX);
        assert_eq!(comfort_months(&p, price), ComfortMonths::MonthsNeeded(u32::MAX));
    }

    #[test]
    fn test_is_pure() {
        let p = profile(20000, 5000, half());
        let price = Decimal::from(30000);
        assert_eq!(comfort_months(&p, price), comfort_months(&p, price));
    }

    #[test]
    fn test_integer_form() {
        assert_eq!(ComfortMonths::Impossible.as_i64(), -1);
        assert_eq!(ComfortMonths::AffordableNow.as_i64(), 0);
        assert_eq!(ComfortMonths::MonthsNeeded(8).as_i64(), 8);
        assert_eq!(ComfortMonths::from(-1), ComfortMonths::Impossible);
        assert_eq!(ComfortMonths::from(-7), ComfortMonths::Impossible);
        assert_eq!(ComfortMonths::from(0), ComfortMonths::AffordableNow);
        assert_eq!(ComfortMonths::from(3), ComfortMonths::MonthsNeeded(3));
    }

    #[test]
    fn test_serializes_as_sentinel_integer() {
        assert_eq!(serde_json::to_string(&ComfortMonths::Impossible).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&ComfortMonths::MonthsNeeded(4)).unwrap(), "4");
        let parsed: ComfortMonths = serde_json::from_str("0").unwrap();
        assert_eq!(parsed, ComfortMonths::AffordableNow);
    }

    #[test]
    fn test_display() {
        assert_eq!(ComfortMonths::Impossible.to_string(), "never");
        assert_eq!(ComfortMonths::AffordableNow.to_string(), "now");
        assert_eq!(ComfortMonths::MonthsNeeded(1).to_string(), "1 month");
        assert_eq!(ComfortMonths::MonthsNeeded(8).to_string(), "8 months");
    }
}
