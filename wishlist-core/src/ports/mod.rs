//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. Services depend
//! only on these traits, not on concrete stores.

mod identity;
mod repository;

pub use identity::{Clock, IdGenerator, ManualClock, SequentialIdGenerator, SystemClock, UuidGenerator};
pub use repository::WishlistRepository;
