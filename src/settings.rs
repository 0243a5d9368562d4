// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::NOW;
use crate::error::{LedgerError, Result};
use crate::ledger::normalize_currency;
use crate::models::UserSettings;
use rusqlite::{Connection, OptionalExtension, params};

/// Create the user's partition if this is the first time we see them.
pub fn ensure_user(conn: &Connection, user: &str) -> Result<()> {
    if user.trim().is_empty() {
        return Err(LedgerError::validation("user id must not be empty"));
    }
    conn.execute("INSERT OR IGNORE INTO users(id) VALUES (?1)", params![user])?;
    Ok(())
}

pub fn get_settings(conn: &Connection, user: &str) -> Result<UserSettings> {
    let currency: Option<String> = conn
        .query_row(
            "SELECT currency FROM users WHERE id=?1",
            params![user],
            |r| r.get(0),
        )
        .optional()?;
    match currency {
        Some(currency) => Ok(UserSettings {
            user_id: user.to_string(),
            currency,
        }),
        None => Err(LedgerError::not_found(format!("user '{}'", user))),
    }
}

pub fn set_currency(conn: &Connection, user: &str, code: &str) -> Result<UserSettings> {
    let ccy = normalize_currency(code)?;
    let sql = format!(
        "UPDATE users SET currency=?1, updated_at={} WHERE id=?2",
        NOW
    );
    if conn.execute(&sql, params![ccy, user])? == 0 {
        return Err(LedgerError::not_found(format!("user '{}'", user)));
    }
    tracing::info!(user, currency = %ccy, "display currency updated");
    Ok(UserSettings {
        user_id: user.to_string(),
        currency: ccy,
    })
}
