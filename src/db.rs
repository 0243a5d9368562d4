// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::error::{LedgerError, Result};
use anyhow::Context;
use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, TransactionBehavior};
use rust_decimal::Decimal;
use std::fs;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Walletledger", "walletledger"));

/// Store-side clock used for created_at / updated_at.
pub const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ','now')";

pub fn db_path() -> anyhow::Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("walletledger.sqlite"))
}

pub fn open_or_init(cfg: &Config) -> anyhow::Result<Connection> {
    let path = match &cfg.db_path {
        Some(p) => p.clone(),
        None => db_path()?,
    };
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    conn.busy_timeout(cfg.busy_timeout)?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS users(
        id TEXT PRIMARY KEY,
        currency TEXT NOT NULL DEFAULT 'USD',
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
        updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
    );

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        name TEXT NOT NULL CHECK(length(trim(name)) > 0),
        type TEXT NOT NULL
            CHECK(type IN ('CASH','BANK','CREDIT_CARD','SAVINGS','INVESTMENT')),
        balance TEXT NOT NULL DEFAULT '0',
        currency TEXT NOT NULL DEFAULT 'USD',
        is_archived INTEGER NOT NULL DEFAULT 0,
        icon TEXT,
        color TEXT,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
        updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
        FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_accounts_user ON accounts(user_id);

    -- A transfer names both sides; income/expense name exactly one account.
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense','transfer')),
        amount TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        category TEXT NOT NULL,
        date TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'completed'
            CHECK(status IN ('completed','pending','failed','cancelled')),
        account_id INTEGER,
        from_account_id INTEGER,
        to_account_id INTEGER,
        notes TEXT,
        tags TEXT NOT NULL DEFAULT '[]',
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
        updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
        CHECK(
            (type = 'transfer' AND account_id IS NULL
                AND from_account_id IS NOT NULL AND to_account_id IS NOT NULL
                AND from_account_id <> to_account_id)
            OR
            (type <> 'transfer' AND account_id IS NOT NULL
                AND from_account_id IS NULL AND to_account_id IS NULL)
        ),
        FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE,
        FOREIGN KEY(account_id) REFERENCES accounts(id),
        FOREIGN KEY(from_account_id) REFERENCES accounts(id),
        FOREIGN KEY(to_account_id) REFERENCES accounts(id)
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions(user_id, date);
    "#,
    )?;
    Ok(())
}

/// Run `f` inside a single all-or-nothing write scope.
///
/// The scope is a `BEGIN IMMEDIATE` transaction: the write lock is held from
/// the first read, so balances read inside `f` cannot change before `f`
/// writes them. Any error from `f` rolls everything back. If the database is
/// busy or locked the whole closure is rerun, up to `max_retries` times, and
/// the last conflict is returned unchanged once retries run out.
pub fn atomic<T, F>(conn: &mut Connection, max_retries: u32, mut f: F) -> Result<T>
where
    F: FnMut(&rusqlite::Transaction<'_>) -> Result<T>,
{
    let mut attempt: u32 = 0;
    loop {
        match run_scope(conn, &mut f) {
            Err(e) if e.is_retryable() && attempt < max_retries => {
                attempt += 1;
                tracing::warn!(attempt, max_retries, error = %e, "atomic scope conflicted, retrying");
                std::thread::sleep(Duration::from_millis(10 * u64::from(attempt)));
            }
            other => return other,
        }
    }
}

fn run_scope<T, F>(conn: &mut Connection, f: &mut F) -> Result<T>
where
    F: FnMut(&rusqlite::Transaction<'_>) -> Result<T>,
{
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tracing::debug!("atomic scope opened");
    // Dropping `tx` on the error path rolls back.
    let out = f(&tx)?;
    tx.commit()?;
    Ok(out)
}

pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| LedgerError::Corrupt(format!("invalid timestamp '{}'", s)))
}

/// Years that format as a four digit, unsigned RFC 3339 year.
pub const DATE_YEARS: RangeInclusive<i32> = 0..=9999;

/// True if `t` can be stored and read back by [`format_timestamp`].
pub fn storable(t: &DateTime<Utc>) -> bool {
    DATE_YEARS.contains(&t.year())
}

/// Nanosecond RFC 3339 in UTC. Fixed width for [`DATE_YEARS`], so it sorts
/// lexically in time order and parses back to the same instant.
pub fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn parse_amount(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .map_err(|_| LedgerError::Corrupt(format!("invalid decimal '{}'", s)))
}
