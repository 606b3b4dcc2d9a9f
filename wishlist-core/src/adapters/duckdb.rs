//! DuckDB repository implementation
//!
//! Durable version of the in-memory store. One connection behind one mutex
//! serializes all calls within the process; mutations that touch more than
//! one row run inside a database transaction.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use duckdb::types::Type;
use duckdb::{params, Connection};
use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::domain::{comfort_months, ComfortMonths, Settings, UserProfile, Wish, WishDraft, WishStatus};
use crate::migrations::MIGRATIONS;
use crate::ports::{Clock, IdGenerator, SystemClock, UuidGenerator, WishlistRepository};
use crate::services::{MigrationResult, MigrationService};

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

const WISH_COLUMNS: &str = "wish_id, title, price, category, cooling_days, recommended_cooling,
     still_want, status, comfort_months, created_at, updated_at";

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
}

/// DuckDB-backed wishlist store
pub struct DuckDbRepository {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl DuckDbRepository {
    /// Open (or create) the database file
    ///
    /// Retries with exponential backoff when another process holds the
    /// file lock.
    pub fn new(db_path: &Path) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => return Ok(Self::from_connection(conn, Some(db_path.to_path_buf()))),
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        eprintln!(
                            "[wishlist] Database busy, retrying in {}ms (attempt {}/{}): {}",
                            delay.as_millis(),
                            attempt + 1,
                            MAX_RETRIES,
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::database(format!("Failed to open database after {} retries", MAX_RETRIES))
        }))
    }

    /// Open a private in-memory database (nothing is written to disk)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(conn, None))
    }

    /// Swap in different id and clock sources
    pub fn with_ports(mut self, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        self.ids = ids;
        self.clock = clock;
        self
    }

    fn from_connection(conn: Connection, db_path: Option<PathBuf>) -> Self {
        Self {
            conn: Mutex::new(conn),
            db_path,
            ids: Arc::new(UuidGenerator),
            clock: Arc::new(SystemClock),
        }
    }

    fn try_open_connection(db_path: &Path) -> Result<Connection> {
        // Extension autoloading off: the store needs nothing beyond core SQL
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        Ok(Connection::open_with_flags(db_path, config)?)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))
    }

    /// Run pending schema migrations
    pub fn run_migrations(&self) -> anyhow::Result<MigrationResult> {
        let conn = self.lock()?;
        MigrationService::new(&conn, MIGRATIONS).run_pending()
    }

    /// Ensure database schema exists (runs pending migrations)
    pub fn ensure_schema(&self) -> anyhow::Result<()> {
        self.run_migrations()?;
        Ok(())
    }

    /// Path of the database file, `None` for in-memory databases
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn row_to_wish(row: &duckdb::Row) -> duckdb::Result<Wish> {
        let price_str: String = row.get(2)?;
        let status_str: String = row.get(7)?;
        let created_str: String = row.get(9)?;
        let updated_str: String = row.get(10)?;

        Ok(Wish {
            id: row.get(0)?,
            title: row.get(1)?,
            price: parse_price(2, &price_str)?,
            category: row.get(3)?,
            cooling_days: to_days(row.get(4)?),
            recommended_cooling: to_days(row.get(5)?),
            still_want: row.get(6)?,
            status: status_str
                .parse()
                .map_err(|e| conversion_error(7, e))?,
            comfort_months: ComfortMonths::from(row.get::<_, i64>(8)?),
            created_at: parse_timestamp(9, &created_str)?,
            updated_at: parse_timestamp(10, &updated_str)?,
        })
    }
}

fn to_days(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Text column that does not hold what the schema promises
fn conversion_error<E>(column: usize, err: E) -> duckdb::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    duckdb::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

fn parse_price(column: usize, s: &str) -> duckdb::Result<Decimal> {
    Decimal::from_str_exact(s).map_err(|e| conversion_error(column, e))
}

fn parse_timestamp(column: usize, s: &str) -> duckdb::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(column, e))
}

fn load_settings(conn: &Connection, user: &str) -> Result<Settings> {
    let json = conn.query_row(
        "SELECT settings_json FROM user_settings WHERE user_key = ?",
        params![user],
        |row| row.get::<_, String>(0),
    );
    match json {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(duckdb::Error::QueryReturnedNoRows) => Ok(Settings::default()),
        Err(e) => Err(e.into()),
    }
}

fn store_settings(conn: &Connection, user: &str, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string(settings)?;
    conn.execute(
        "INSERT INTO user_settings (user_key, settings_json) VALUES (?, ?)
         ON CONFLICT (user_key) DO UPDATE SET settings_json = EXCLUDED.settings_json",
        params![user, json],
    )?;
    Ok(())
}

fn load_profile(conn: &Connection, user: &str) -> Result<Option<UserProfile>> {
    let json = conn.query_row(
        "SELECT profile_json FROM user_profiles WHERE user_key = ?",
        params![user],
        |row| row.get::<_, String>(0),
    );
    match json {
        Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
        Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn active_exists(conn: &Connection, user: &str, wish_id: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM wishes WHERE user_key = ? AND wish_id = ? AND status = 'active'",
        params![user, wish_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

impl WishlistRepository for DuckDbRepository {
    fn list_wishes(&self, user: &str, status: WishStatus) -> Result<Vec<Wish>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM wishes WHERE user_key = ? AND status = ? ORDER BY sort_order",
            WISH_COLUMNS
        ))?;

        let wishes = stmt
            .query_map(params![user, status.as_str()], Self::row_to_wish)?
            .collect::<duckdb::Result<Vec<_>>>()?;

        Ok(wishes)
    }

    fn add_wish(&self, user: &str, draft: WishDraft) -> Result<Wish> {
        let id = self.ids.next_id();
        let now = self.clock.now();

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let settings = load_settings(&tx, user)?;
        let profile = load_profile(&tx, user)?.unwrap_or_else(|| UserProfile::new(user));
        let wish = Wish::create(id, draft, now, &settings, &profile);

        // Newest first: go one below the current front of the partition
        let front: i64 = tx.query_row(
            "SELECT COALESCE(MIN(sort_order), 0) FROM wishes WHERE user_key = ? AND status = 'active'",
            params![user],
            |row| row.get(0),
        )?;

        tx.execute(
            "INSERT INTO wishes (wish_id, user_key, title, price, category, cooling_days,
                                 recommended_cooling, still_want, status, comfort_months,
                                 sort_order, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                wish.id,
                user,
                wish.title,
                wish.price.to_string(),
                wish.category,
                i64::from(wish.cooling_days),
                i64::from(wish.recommended_cooling),
                wish.still_want,
                wish.status.as_str(),
                wish.comfort_months.as_i64(),
                front - 1,
                wish.created_at.to_rfc3339(),
                wish.updated_at.to_rfc3339(),
            ],
        )?;

        tx.commit()?;
        Ok(wish)
    }

    fn toggle_still_want(&self, user: &str, wish_id: &str) -> Result<bool> {
        let now = self.clock.now();
        let conn = self.lock()?;

        let changed = conn.execute(
            "UPDATE wishes SET still_want = NOT still_want, updated_at = ?
             WHERE user_key = ? AND wish_id = ? AND status = 'active'",
            params![now.to_rfc3339(), user, wish_id],
        )?;

        Ok(changed > 0)
    }

    fn update_status(&self, user: &str, wish_id: &str, status: WishStatus) -> Result<bool> {
        let now = self.clock.now();
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        if !active_exists(&tx, user, wish_id)? {
            return Ok(false);
        }

        // Archive order is chronological: append after the current tail
        let tail: i64 = tx.query_row(
            "SELECT COALESCE(MAX(sort_order), 0) FROM wishes WHERE user_key = ? AND status = ?",
            params![user, status.as_str()],
            |row| row.get(0),
        )?;

        tx.execute(
            "UPDATE wishes SET status = ?, sort_order = ?, updated_at = ?
             WHERE user_key = ? AND wish_id = ?",
            params![status.as_str(), tail + 1, now.to_rfc3339(), user, wish_id],
        )?;

        tx.commit()?;
        Ok(true)
    }

    fn remove_wish(&self, user: &str, wish_id: &str) -> Result<bool> {
        let conn = self.lock()?;
        let removed = conn.execute(
            "DELETE FROM wishes WHERE user_key = ? AND wish_id = ? AND status = 'active'",
            params![user, wish_id],
        )?;
        Ok(removed > 0)
    }

    fn get_settings(&self, user: &str) -> Result<Settings> {
        let conn = self.lock()?;
        load_settings(&conn, user)
    }

    fn save_settings(&self, user: &str, settings: Settings) -> Result<()> {
        let conn = self.lock()?;
        store_settings(&conn, user, &settings)
    }

    fn update_settings(
        &self,
        user: &str,
        update: &mut dyn FnMut(&mut Settings),
    ) -> Result<Settings> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let mut settings = load_settings(&tx, user)?;
        update(&mut settings);
        store_settings(&tx, user, &settings)?;

        tx.commit()?;
        Ok(settings)
    }

    fn get_profile(&self, user: &str) -> Result<Option<UserProfile>> {
        let conn = self.lock()?;
        load_profile(&conn, user)
    }

    fn save_profile(&self, user: &str, mut profile: UserProfile) -> Result<()> {
        profile.nick = user.to_string();
        let json = serde_json::to_string(&profile)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO user_profiles (user_key, profile_json) VALUES (?, ?)
             ON CONFLICT (user_key) DO UPDATE SET profile_json = EXCLUDED.profile_json",
            params![user, json],
        )?;

        let active: Vec<(String, String)> = {
            let mut stmt = tx.prepare(
                "SELECT wish_id, price FROM wishes WHERE user_key = ? AND status = 'active'",
            )?;
            let rows = stmt.query_map(params![user], |row| Ok((row.get(0)?, row.get(1)?)))?;
            rows.collect::<duckdb::Result<Vec<_>>>()?
        };

        for (wish_id, price_str) in active {
            let price = parse_price(1, &price_str)?;
            let months = comfort_months(&profile, price);
            tx.execute(
                "UPDATE wishes SET comfort_months = ? WHERE user_key = ? AND wish_id = ?",
                params![months.as_i64(), user, wish_id],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}
