//! Repository contract tests
//!
//! Every test runs against both stores (in-memory and DuckDB) and checks
//! they behave identically through the `WishlistRepository` port.
//!
//! Run with: cargo test --test store_contract_test -- --nocapture

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use wishlist_core::adapters::duckdb::DuckDbRepository;
use wishlist_core::adapters::memory::MemoryRepository;
use wishlist_core::domain::{ComfortMonths, CooldownRange, Settings, UserProfile, WishDraft, WishStatus};
use wishlist_core::ports::{ManualClock, SequentialIdGenerator, WishlistRepository};

// ============================================================================
// Test Helpers
// ============================================================================

/// Both stores, sharing the given clock and fresh sequential ids
fn stores(clock: Arc<ManualClock>) -> Vec<(&'static str, Box<dyn WishlistRepository>)> {
    let memory: Box<dyn WishlistRepository> = Box::new(MemoryRepository::with_ports(
        Arc::new(SequentialIdGenerator::new("w")),
        clock.clone(),
    ));

    let duck = DuckDbRepository::open_in_memory()
        .expect("Failed to open in-memory database")
        .with_ports(Arc::new(SequentialIdGenerator::new("w")), clock);
    duck.ensure_schema().expect("Failed to initialize schema");
    let duck: Box<dyn WishlistRepository> = Box::new(duck);

    vec![("memory", memory), ("duckdb", duck)]
}

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()))
}

fn draft(title: &str, price: i64) -> WishDraft {
    WishDraft::new(title, Decimal::from(price), "misc")
}

fn titles(repo: &dyn WishlistRepository, user: &str, status: WishStatus) -> Vec<String> {
    repo.list_wishes(user, status)
        .unwrap()
        .into_iter()
        .map(|w| w.title)
        .collect()
}

fn saver_profile(comfort_percent: Decimal) -> UserProfile {
    UserProfile {
        total_savings: Decimal::from(20000),
        monthly_saving: Decimal::from(5000),
        comfort_percent,
        ..UserProfile::new("meow")
    }
}

// ============================================================================
// Calculations at the trigger points
// ============================================================================

#[test]
fn test_add_resolves_cooldown_from_settings() {
    for (name, repo) in stores(clock()) {
        repo.save_settings(
            "meow",
            Settings {
                cooldowns: vec![
                    CooldownRange::new(Decimal::ZERO, Decimal::from(1000), 3),
                    CooldownRange::new(Decimal::from(1000), Decimal::from(5000), 7),
                ],
                ..Settings::default()
            },
        )
        .unwrap();

        let wish = repo.add_wish("meow", draft("Bike", 1500)).unwrap();
        assert_eq!(wish.recommended_cooling, 7, "{}", name);

        let boundary = repo.add_wish("meow", draft("Chair", 1000)).unwrap();
        assert_eq!(boundary.recommended_cooling, 3, "{}: first band wins", name);
    }
}

#[test]
fn test_add_computes_comfort_months_from_profile() {
    for (name, repo) in stores(clock()) {
        repo.save_profile("meow", saver_profile(Decimal::new(5, 1))).unwrap();

        let now = repo.add_wish("meow", draft("Watch", 10000)).unwrap();
        assert_eq!(now.comfort_months, ComfortMonths::AffordableNow, "{}", name);

        let later = repo.add_wish("meow", draft("Car", 30000)).unwrap();
        assert_eq!(later.comfort_months, ComfortMonths::MonthsNeeded(8), "{}", name);
    }
}

#[test]
fn test_add_without_profile_uses_zero_profile() {
    for (name, repo) in stores(clock()) {
        let wish = repo.add_wish("meow", draft("Car", 30000)).unwrap();
        assert_eq!(wish.comfort_months, ComfortMonths::Impossible, "{}", name);
        assert_eq!(wish.recommended_cooling, 7, "{}", name);

        let free = repo.add_wish("meow", draft("Sticker", 0)).unwrap();
        assert_eq!(free.comfort_months, ComfortMonths::AffordableNow, "{}", name);
    }
}

#[test]
fn test_save_profile_recomputes_active_wishes() {
    for (name, repo) in stores(clock()) {
        repo.save_profile("meow", saver_profile(Decimal::new(5, 1))).unwrap();
        let wish = repo.add_wish("meow", draft("Car", 30000)).unwrap();
        assert_eq!(wish.comfort_months, ComfortMonths::MonthsNeeded(8), "{}", name);

        repo.save_profile("meow", saver_profile(Decimal::new(9, 1))).unwrap();

        let listed = repo.list_wishes("meow", WishStatus::Active).unwrap();
        assert_eq!(listed[0].comfort_months, ComfortMonths::MonthsNeeded(56), "{}", name);
        assert_eq!(listed[0].updated_at, wish.updated_at, "{}", name);
    }
}

#[test]
fn test_save_profile_leaves_archived_wishes_alone() {
    for (name, repo) in stores(clock()) {
        repo.save_profile("meow", saver_profile(Decimal::new(5, 1))).unwrap();
        let wish = repo.add_wish("meow", draft("Car", 30000)).unwrap();
        assert!(repo.update_status("meow", &wish.id, WishStatus::Completed).unwrap());

        repo.save_profile("meow", saver_profile(Decimal::ONE)).unwrap();

        let completed = repo.list_wishes("meow", WishStatus::Completed).unwrap();
        assert_eq!(completed[0].comfort_months, ComfortMonths::MonthsNeeded(8), "{}", name);
    }
}

#[test]
fn test_save_profile_only_touches_that_user() {
    for (name, repo) in stores(clock()) {
        repo.add_wish("alice", draft("Car", 30000)).unwrap();
        repo.save_profile("bob", saver_profile(Decimal::ZERO)).unwrap();

        let alice = repo.list_wishes("alice", WishStatus::Active).unwrap();
        assert_eq!(alice[0].comfort_months, ComfortMonths::Impossible, "{}", name);
        assert!(repo.get_profile("alice").unwrap().is_none(), "{}", name);
    }
}

// ============================================================================
// Partitions and ordering
// ============================================================================

#[test]
fn test_active_is_most_recent_first() {
    for (name, repo) in stores(clock()) {
        for title in ["one", "two", "three"] {
            repo.add_wish("meow", draft(title, 10)).unwrap();
        }
        assert_eq!(
            titles(&*repo, "meow", WishStatus::Active),
            vec!["three", "two", "one"],
            "{}",
            name
        );
    }
}

#[test]
fn test_archives_are_in_archive_order() {
    for (name, repo) in stores(clock()) {
        let a = repo.add_wish("meow", draft("a", 10)).unwrap();
        let b = repo.add_wish("meow", draft("b", 10)).unwrap();
        let c = repo.add_wish("meow", draft("c", 10)).unwrap();

        assert!(repo.update_status("meow", &b.id, WishStatus::Canceled).unwrap());
        assert!(repo.update_status("meow", &c.id, WishStatus::Canceled).unwrap());
        assert!(repo.update_status("meow", &a.id, WishStatus::Canceled).unwrap());

        assert_eq!(titles(&*repo, "meow", WishStatus::Canceled), vec!["b", "c", "a"], "{}", name);
        assert!(titles(&*repo, "meow", WishStatus::Active).is_empty(), "{}", name);
    }
}

#[test]
fn test_update_status_to_active_moves_to_end() {
    for (name, repo) in stores(clock()) {
        let old = repo.add_wish("meow", draft("old", 10)).unwrap();
        repo.add_wish("meow", draft("new", 10)).unwrap();

        assert!(repo.update_status("meow", &old.id, WishStatus::Active).unwrap());
        assert_eq!(titles(&*repo, "meow", WishStatus::Active), vec!["new", "old"], "{}", name);

        let new = repo.list_wishes("meow", WishStatus::Active).unwrap()[0].clone();
        assert!(repo.update_status("meow", &new.id, WishStatus::Active).unwrap());
        assert_eq!(titles(&*repo, "meow", WishStatus::Active), vec!["old", "new"], "{}", name);
    }
}

#[test]
fn test_wish_lives_in_exactly_one_partition() {
    for (name, repo) in stores(clock()) {
        let wish = repo.add_wish("meow", draft("Lamp", 10)).unwrap();
        assert!(repo.update_status("meow", &wish.id, WishStatus::Completed).unwrap());

        let found: usize = WishStatus::ALL
            .iter()
            .map(|s| {
                repo.list_wishes("meow", *s)
                    .unwrap()
                    .iter()
                    .filter(|w| w.id == wish.id)
                    .count()
            })
            .sum();
        assert_eq!(found, 1, "{}", name);

        let completed = repo.list_wishes("meow", WishStatus::Completed).unwrap();
        assert_eq!(completed[0].status, WishStatus::Completed, "{}", name);
    }
}

// ============================================================================
// Mutations and not-found
// ============================================================================

#[test]
fn test_toggle_stamps_updated_at() {
    let clock = clock();
    for (name, repo) in stores(clock.clone()) {
        let wish = repo.add_wish("meow", draft("Lamp", 10)).unwrap();
        assert!(wish.still_want, "{}", name);

        clock.advance(Duration::hours(2));
        assert!(repo.toggle_still_want("meow", &wish.id).unwrap());

        let listed = repo.list_wishes("meow", WishStatus::Active).unwrap();
        assert!(!listed[0].still_want, "{}", name);
        assert_eq!(listed[0].created_at, wish.created_at, "{}", name);
        assert_eq!(listed[0].updated_at, wish.created_at + Duration::hours(2), "{}", name);

        assert!(repo.toggle_still_want("meow", &wish.id).unwrap());
        assert!(repo.list_wishes("meow", WishStatus::Active).unwrap()[0].still_want, "{}", name);
    }
}

#[test]
fn test_toggle_on_completed_wish_is_not_found() {
    for (name, repo) in stores(clock()) {
        let wish = repo.add_wish("meow", draft("Lamp", 10)).unwrap();
        assert!(repo.update_status("meow", &wish.id, WishStatus::Completed).unwrap());
        let before = repo.list_wishes("meow", WishStatus::Completed).unwrap();

        assert!(!repo.toggle_still_want("meow", &wish.id).unwrap(), "{}", name);
        assert_eq!(repo.list_wishes("meow", WishStatus::Completed).unwrap(), before, "{}", name);
    }
}

#[test]
fn test_unknown_ids_are_not_found() {
    for (name, repo) in stores(clock()) {
        repo.add_wish("meow", draft("Lamp", 10)).unwrap();

        assert!(!repo.toggle_still_want("meow", "missing").unwrap(), "{}", name);
        assert!(!repo.update_status("meow", "missing", WishStatus::Canceled).unwrap(), "{}", name);
        assert!(!repo.remove_wish("meow", "missing").unwrap(), "{}", name);
        assert_eq!(repo.list_wishes("meow", WishStatus::Active).unwrap().len(), 1, "{}", name);
    }
}

#[test]
fn test_add_then_remove_round_trip() {
    for (name, repo) in stores(clock()) {
        let wish = repo.add_wish("meow", draft("Lamp", 10)).unwrap();
        assert!(repo.remove_wish("meow", &wish.id).unwrap());
        assert!(repo.list_wishes("meow", WishStatus::Active).unwrap().is_empty(), "{}", name);
        assert!(!repo.remove_wish("meow", &wish.id).unwrap(), "{}", name);
    }
}

#[test]
fn test_remove_ignores_archived_wishes() {
    for (name, repo) in stores(clock()) {
        let wish = repo.add_wish("meow", draft("Lamp", 10)).unwrap();
        assert!(repo.update_status("meow", &wish.id, WishStatus::Canceled).unwrap());

        assert!(!repo.remove_wish("meow", &wish.id).unwrap(), "{}", name);
        assert_eq!(repo.list_wishes("meow", WishStatus::Canceled).unwrap().len(), 1, "{}", name);
    }
}

// ============================================================================
// Settings and profiles
// ============================================================================

#[test]
fn test_settings_round_trip() {
    for (name, repo) in stores(clock()) {
        assert_eq!(repo.get_settings("meow").unwrap(), Settings::default(), "{}", name);

        let settings = Settings {
            cooldowns: vec![CooldownRange::new(Decimal::ZERO, Decimal::new(9999, 2), 2)],
            notification_freq: "weekly".to_string(),
            excluded_products: "cigarettes".to_string(),
            notification_channel: "email".to_string(),
            total_spent: Decimal::new(123456, 2),
            total_purchases: 4,
            monthly_saving: Decimal::from(300),
        };
        repo.save_settings("meow", settings.clone()).unwrap();
        assert_eq!(repo.get_settings("meow").unwrap(), settings, "{}", name);
        assert_eq!(repo.get_settings("other").unwrap(), Settings::default(), "{}", name);
    }
}

#[test]
fn test_profile_round_trip_forces_nick() {
    for (name, repo) in stores(clock()) {
        let mut profile = saver_profile(Decimal::new(25, 2));
        profile.nick = "someone-else".to_string();
        profile.blocked_categories = vec!["games".to_string()];

        repo.save_profile("meow", profile.clone()).unwrap();

        let stored = repo.get_profile("meow").unwrap().unwrap();
        assert_eq!(stored.nick, "meow", "{}", name);
        assert_eq!(stored.comfort_percent, profile.comfort_percent, "{}", name);
        assert_eq!(stored.blocked_categories, profile.blocked_categories, "{}", name);
    }
}
