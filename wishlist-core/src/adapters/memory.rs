//! In-memory repository implementation
//!
//! Everything lives in process maps behind a single mutex and is lost when
//! the process exits. This is the reference implementation of the
//! repository contract; the DuckDB adapter mirrors its behavior on disk.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::result::{Error, Result};
use crate::domain::{Settings, UserProfile, Wish, WishDraft, WishStatus};
use crate::ports::{Clock, IdGenerator, SystemClock, UuidGenerator, WishlistRepository};

type Partition = HashMap<String, Vec<Wish>>;

#[derive(Debug, Default)]
struct State {
    active: Partition,
    completed: Partition,
    canceled: Partition,
    settings: HashMap<String, Settings>,
    profiles: HashMap<String, UserProfile>,
}

impl State {
    fn partition(&self, status: WishStatus) -> &Partition {
        match status {
            WishStatus::Active => &self.active,
            WishStatus::Completed => &self.completed,
            WishStatus::Canceled => &self.canceled,
        }
    }

    fn partition_mut(&mut self, status: WishStatus) -> &mut Partition {
        match status {
            WishStatus::Active => &mut self.active,
            WishStatus::Completed => &mut self.completed,
            WishStatus::Canceled => &mut self.canceled,
        }
    }

    fn active_position(&self, user: &str, wish_id: &str) -> Option<usize> {
        self.active
            .get(user)
            .and_then(|list| list.iter().position(|w| w.id == wish_id))
    }
}

/// In-memory wishlist store guarded by one lock
pub struct MemoryRepository {
    state: Mutex<State>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl MemoryRepository {
    /// Create an empty store with UUID ids and the system clock
    pub fn new() -> Self {
        Self::with_ports(Arc::new(UuidGenerator), Arc::new(SystemClock))
    }

    /// Create an empty store with injected id and clock sources
    pub fn with_ports(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            ids,
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl WishlistRepository for MemoryRepository {
    fn list_wishes(&self, user: &str, status: WishStatus) -> Result<Vec<Wish>> {
        let state = self.lock()?;
        Ok(state.partition(status).get(user).cloned().unwrap_or_default())
    }

    fn add_wish(&self, user: &str, draft: WishDraft) -> Result<Wish> {
        let id = self.ids.next_id();
        let now = self.clock.now();

        let mut state = self.lock()?;
        let fallback_profile = UserProfile::new(user);
        let wish = Wish::create(
            id,
            draft,
            now,
            state.settings.get(user).unwrap_or(&Settings::default()),
            state.profiles.get(user).unwrap_or(&fallback_profile),
        );

        state
            .active
            .entry(user.to_string())
            .or_default()
            .insert(0, wish.clone());

        Ok(wish)
    }

    fn toggle_still_want(&self, user: &str, wish_id: &str) -> Result<bool> {
        let now = self.clock.now();
        let mut state = self.lock()?;

        let wish = state
            .active
            .get_mut(user)
            .and_then(|list| list.iter_mut().find(|w| w.id == wish_id));

        match wish {
            Some(wish) => {
                wish.toggle_still_want(now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn update_status(&self, user: &str, wish_id: &str, status: WishStatus) -> Result<bool> {
        let now = self.clock.now();
        let mut state = self.lock()?;

        let Some(index) = state.active_position(user, wish_id) else {
            return Ok(false);
        };
        let Some(list) = state.active.get_mut(user) else {
            return Ok(false);
        };
        let mut wish = list.remove(index);
        wish.set_status(status, now);

        state
            .partition_mut(status)
            .entry(user.to_string())
            .or_default()
            .push(wish);

        Ok(true)
    }

    fn remove_wish(&self, user: &str, wish_id: &str) -> Result<bool> {
        let mut state = self.lock()?;

        let Some(index) = state.active_position(user, wish_id) else {
            return Ok(false);
        };
        if let Some(list) = state.active.get_mut(user) {
            list.remove(index);
        }

        Ok(true)
    }

    fn get_settings(&self, user: &str) -> Result<Settings> {
        let state = self.lock()?;
        Ok(state.settings.get(user).cloned().unwrap_or_default())
    }

    fn save_settings(&self, user: &str, settings: Settings) -> Result<()> {
        let mut state = self.lock()?;
        state.settings.insert(user.to_string(), settings);
        Ok(())
    }

    fn update_settings(
        &self,
        user: &str,
        update: &mut dyn FnMut(&mut Settings),
    ) -> Result<Settings> {
        let mut state = self.lock()?;
        let settings = state.settings.entry(user.to_string()).or_default();
        update(settings);
        Ok(settings.clone())
    }

    fn get_profile(&self, user: &str) -> Result<Option<UserProfile>> {
        let state = self.lock()?;
        Ok(state.profiles.get(user).cloned())
    }

    fn save_profile(&self, user: &str, mut profile: UserProfile) -> Result<()> {
        profile.nick = user.to_string();

        let mut state = self.lock()?;
        if let Some(list) = state.active.get_mut(user) {
            for wish in list.iter_mut() {
                wish.refresh_comfort(&profile);
            }
        }
        state.profiles.insert(user.to_string(), profile);

        Ok(())
    }
}
