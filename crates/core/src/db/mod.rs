// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed store for projects, work items, and their dependency graphs.
//!
//! The [`Database`] struct is split across submodules by entity. Every
//! mutation runs inside [`Database::write`], an IMMEDIATE transaction that
//! serializes writers, so a reachability check and the insert that follows
//! it cannot interleave with another writer.

mod deps;
mod milestones;
mod projects;
mod schema;
mod stats;
mod tasks;

#[cfg(test)]
mod test_helpers;

pub use schema::{SCHEMA, SCHEMA_VERSION};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, ErrorCode, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::clock::{ClockSource, SystemClock};
use crate::error::{Error, Result};

/// Attempts made by [`Database::write`] before giving up on a locked database.
pub const MAX_WRITE_ATTEMPTS: u32 = 3;

/// Parse a string value from the database, returning a rusqlite error on parse failure.
pub(crate) fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value.parse().map_err(|_| corrupted(format!("invalid value '{value}' in column '{column}'")))
}

/// Parse an RFC3339 timestamp from the database.
pub(crate) fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| corrupted(format!("invalid timestamp '{value}' in column '{column}'")))
}

pub(crate) fn parse_timestamp_opt(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<DateTime<Utc>>, rusqlite::Error> {
    value.map(|v| parse_timestamp(&v, column)).transpose()
}

/// Parse an ISO `YYYY-MM-DD` date from the database.
pub(crate) fn parse_date(
    value: &str,
    column: &str,
) -> std::result::Result<NaiveDate, rusqlite::Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| corrupted(format!("invalid date '{value}' in column '{column}'")))
}

pub(crate) fn parse_date_opt(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<NaiveDate>, rusqlite::Error> {
    value.map(|v| parse_date(&v, column)).transpose()
}

fn corrupted(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// Formats a timestamp for storage.
///
/// Fixed-width microsecond precision keeps stored values lexically ordered.
pub(crate) fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Run schema creation and all migrations on a database connection.
///
/// Applies the canonical schema, then records [`SCHEMA_VERSION`]. Migrations
/// for later schema versions go between the two.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    if schema_version(conn)? != SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }
    Ok(())
}

/// Registers `fold_case(text)`, a Unicode lowercase used by text search.
///
/// SQLite's built-in `lower()` only folds ASCII.
pub(crate) fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )?;
    Ok(())
}

/// Returns the schema version recorded in the database header.
pub fn schema_version(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

fn is_busy(err: &Error) -> bool {
    match err {
        Error::Database(e) => matches!(
            e.sqlite_error_code(),
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
        ),
        _ => false,
    }
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(25 * u64::from(attempt))
}

/// SQLite database connection with project graph operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
    clock: Arc<dyn ClockSource>,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_clock(path, Arc::new(SystemClock))
    }

    /// Like [`Database::open`], reading time from `clock`.
    pub fn open_with_clock(path: &Path, clock: Arc<dyn ClockSource>) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for concurrency
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        register_functions(&conn)?;

        run_migrations(&conn)?;
        debug!(path = %path.display(), "opened database");
        Ok(Database { conn, clock })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Self::open_in_memory_with_clock(Arc::new(SystemClock))
    }

    pub fn open_in_memory_with_clock(clock: Arc<dyn ClockSource>) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        register_functions(&conn)?;
        run_migrations(&conn)?;
        Ok(Database { conn, clock })
    }

    /// The clock used for lifecycle timestamps and "today".
    pub fn clock(&self) -> &dyn ClockSource {
        self.clock.as_ref()
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Runs `op` inside an IMMEDIATE transaction and commits on success.
    ///
    /// `op` receives the transaction and the current time. If the write lock
    /// cannot be taken the whole closure is retried, up to
    /// [`MAX_WRITE_ATTEMPTS`] in total, before failing with
    /// [`Error::ConcurrencyConflict`]. Any other error rolls back.
    pub(crate) fn write<T, F>(&mut self, mut op: F) -> Result<T>
    where
        F: FnMut(&Transaction<'_>, DateTime<Utc>) -> Result<T>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let now = self.clock.now();
            match run_immediate(&mut self.conn, now, &mut op) {
                Err(err) if is_busy(&err) => {
                    if attempt >= MAX_WRITE_ATTEMPTS {
                        warn!(attempts = attempt, "giving up on locked database");
                        return Err(Error::ConcurrencyConflict { attempts: attempt });
                    }
                    debug!(attempt, error = %err, "database busy, retrying");
                    std::thread::sleep(backoff(attempt));
                }
                result => return result,
            }
        }
    }
}

fn run_immediate<T, F>(conn: &mut Connection, now: DateTime<Utc>, op: &mut F) -> Result<T>
where
    F: FnMut(&Transaction<'_>, DateTime<Utc>) -> Result<T>,
{
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let value = op(&tx, now)?;
    tx.commit()?;
    Ok(value)
}

/// Returns true if a row with `id` exists in `table`.
pub(crate) fn row_exists(conn: &Connection, table: &str, id: &str) -> Result<bool> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)");
    Ok(conn.query_row(&sql, [id], |row| row.get(0))?)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
