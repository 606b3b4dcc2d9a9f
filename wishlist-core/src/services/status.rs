//! Status service - wishlist summaries

use std::sync::Arc;

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{ComfortMonths, WishStatus};
use crate::ports::WishlistRepository;

/// Status service for per-user summaries
pub struct StatusService {
    repository: Arc<dyn WishlistRepository>,
}

impl StatusService {
    pub fn new(repository: Arc<dyn WishlistRepository>) -> Self {
        Self { repository }
    }

    /// Summarize all three partitions for `user`
    ///
    /// Each partition is read separately, so a wish that moves while the
    /// summary is built can be counted in both partitions or in neither.
    /// Every figure within one partition is consistent.
    pub fn summary(&self, user: &str) -> Result<StatusSummary> {
        let active = self.repository.list_wishes(user, WishStatus::Active)?;
        let completed = self.repository.list_wishes(user, WishStatus::Completed)?;
        let canceled = self.repository.list_wishes(user, WishStatus::Canceled)?;

        let active_total = active
            .iter()
            .fold(Decimal::ZERO, |acc, w| acc.saturating_add(w.price));
        let completed_total = completed
            .iter()
            .fold(Decimal::ZERO, |acc, w| acc.saturating_add(w.price));

        Ok(StatusSummary {
            user: user.to_string(),
            active_count: active.len(),
            completed_count: completed.len(),
            canceled_count: canceled.len(),
            active_total,
            completed_total,
            affordable_now: active.iter().filter(|w| w.comfort_months.is_affordable_now()).count(),
            still_wanted: active.iter().filter(|w| w.still_want).count(),
            impossible: active
                .iter()
                .filter(|w| w.comfort_months == ComfortMonths::Impossible)
                .count(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub user: String,
    pub active_count: usize,
    pub completed_count: usize,
    pub canceled_count: usize,
    /// Sum of active wish prices
    pub active_total: Decimal,
    pub completed_total: Decimal,
    pub affordable_now: usize,
    pub still_wanted: usize,
    pub impossible: usize,
}
