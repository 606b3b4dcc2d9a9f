//! Wish service - creating, listing and moving wishes

use std::sync::Arc;

use anyhow::{bail, Result};
use rust_decimal::Decimal;

use crate::domain::{Wish, WishDraft, WishStatus};
use crate::ports::WishlistRepository;

/// Wish operations on top of a repository
pub struct WishService {
    repository: Arc<dyn WishlistRepository>,
}

impl WishService {
    pub fn new(repository: Arc<dyn WishlistRepository>) -> Self {
        Self { repository }
    }

    /// Create a wish for `user`
    ///
    /// Numbers are not validated here. A negative or absurd price simply
    /// yields whatever the calculations make of it.
    pub fn add_wish(&self, user: &str, title: &str, price: Decimal, category: &str) -> Result<Wish> {
        let title = title.trim();
        if title.is_empty() {
            bail!("Wish title cannot be empty");
        }

        let draft = WishDraft::new(title, price, category.trim());
        Ok(self.repository.add_wish(user, draft)?)
    }

    /// List one partition
    ///
    /// `None` or an empty filter lists active wishes. An unknown filter
    /// returns an empty list rather than an error.
    pub fn list_wishes(&self, user: &str, filter: Option<&str>) -> Result<Vec<Wish>> {
        match WishStatus::from_filter(filter) {
            Some(status) => Ok(self.repository.list_wishes(user, status)?),
            None => Ok(Vec::new()),
        }
    }

    /// Find a wish by id in any partition
    pub fn get_wish(&self, user: &str, wish_id: &str) -> Result<Option<Wish>> {
        for status in WishStatus::ALL {
            let found = self
                .repository
                .list_wishes(user, status)?
                .into_iter()
                .find(|w| w.id == wish_id);
            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }

    pub fn toggle_still_want(&self, user: &str, wish_id: &str) -> Result<bool> {
        Ok(self.repository.toggle_still_want(user, wish_id)?)
    }

    /// Move an active wish to `status`
    pub fn set_status(&self, user: &str, wish_id: &str, status: WishStatus) -> Result<bool> {
        Ok(self.repository.update_status(user, wish_id, status)?)
    }

    pub fn complete(&self, user: &str, wish_id: &str) -> Result<bool> {
        self.set_status(user, wish_id, WishStatus::Completed)
    }

    pub fn cancel(&self, user: &str, wish_id: &str) -> Result<bool> {
        self.set_status(user, wish_id, WishStatus::Canceled)
    }

    /// Delete an active wish. Archived wishes cannot be removed.
    pub fn remove_wish(&self, user: &str, wish_id: &str) -> Result<bool> {
        Ok(self.repository.remove_wish(user, wish_id)?)
    }
}
