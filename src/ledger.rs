// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Account ledger: account records and their balances.
//!
//! Balances are only ever written by [`crate::poster`]; the functions here
//! create accounts with an opening balance and edit their descriptive fields.

use crate::db::{self, NOW};
use crate::error::{LedgerError, Result};
use crate::models::{Account, AccountDraft, AccountId, AccountPatch, AccountType};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

pub const DEFAULT_CURRENCY: &str = "USD";

const ACCOUNT_COLUMNS: &str = "id, user_id, name, type, balance, currency, is_archived, icon, color, created_at, updated_at";

struct AccountRow {
    id: i64,
    user_id: String,
    name: String,
    r#type: String,
    balance: String,
    currency: String,
    is_archived: bool,
    icon: Option<String>,
    color: Option<String>,
    created_at: String,
    updated_at: String,
}

impl AccountRow {
    fn read(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            user_id: r.get(1)?,
            name: r.get(2)?,
            r#type: r.get(3)?,
            balance: r.get(4)?,
            currency: r.get(5)?,
            is_archived: r.get(6)?,
            icon: r.get(7)?,
            color: r.get(8)?,
            created_at: r.get(9)?,
            updated_at: r.get(10)?,
        })
    }

    fn decode(self) -> Result<Account> {
        let r#type = self
            .r#type
            .parse::<AccountType>()
            .map_err(|_| LedgerError::Corrupt(format!("account type '{}'", self.r#type)))?;
        Ok(Account {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            r#type,
            balance: db::parse_amount(&self.balance)?,
            currency: self.currency,
            is_archived: self.is_archived,
            icon: self.icon,
            color: self.color,
            created_at: db::parse_timestamp(&self.created_at)?,
            updated_at: db::parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Upper-cased three letter ISO code.
pub fn normalize_currency(code: &str) -> Result<String> {
    let c = code.trim().to_uppercase();
    if c.len() != 3 || !c.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(LedgerError::validation(format!(
            "invalid currency code '{}'",
            code.trim()
        )));
    }
    Ok(c)
}

fn normalize_name(name: &str) -> Result<String> {
    let n = name.trim();
    if n.is_empty() {
        return Err(LedgerError::validation("account name must not be empty"));
    }
    Ok(n.to_string())
}

pub fn add_account(conn: &Connection, user: &str, draft: &AccountDraft) -> Result<AccountId> {
    let name = normalize_name(&draft.name)?;
    let currency = match &draft.currency {
        Some(c) => normalize_currency(c)?,
        None => DEFAULT_CURRENCY.to_string(),
    };
    conn.execute(
        "INSERT INTO accounts(user_id, name, type, balance, currency, icon, color)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user,
            name,
            draft.r#type.as_str(),
            draft.opening_balance.to_string(),
            currency,
            draft.icon,
            draft.color
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(user, account_id = id, %name, "account added");
    Ok(id)
}

pub fn find_account(conn: &Connection, user: &str, id: AccountId) -> Result<Option<Account>> {
    let sql = format!(
        "SELECT {} FROM accounts WHERE id=?1 AND user_id=?2",
        ACCOUNT_COLUMNS
    );
    let row = conn
        .query_row(&sql, params![id, user], AccountRow::read)
        .optional()?;
    row.map(AccountRow::decode).transpose()
}

pub fn get_account(conn: &Connection, user: &str, id: AccountId) -> Result<Account> {
    find_account(conn, user, id)?
        .ok_or_else(|| LedgerError::not_found(format!("account {}", id)))
}

pub fn list_accounts(conn: &Connection, user: &str, include_archived: bool) -> Result<Vec<Account>> {
    let mut sql = format!("SELECT {} FROM accounts WHERE user_id=?1", ACCOUNT_COLUMNS);
    if !include_archived {
        sql.push_str(" AND is_archived=0");
    }
    sql.push_str(" ORDER BY name, id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user], AccountRow::read)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?.decode()?);
    }
    Ok(out)
}

pub fn get_balance(conn: &Connection, user: &str, id: AccountId) -> Result<Decimal> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT balance FROM accounts WHERE id=?1 AND user_id=?2",
            params![id, user],
            |r| r.get(0),
        )
        .optional()?;
    match raw {
        Some(s) => db::parse_amount(&s),
        None => Err(LedgerError::not_found(format!("account {}", id))),
    }
}

/// Sum of balances over the non-archived accounts in `accounts`.
pub fn total_balance<'a, I>(accounts: I) -> Decimal
where
    I: IntoIterator<Item = &'a Account>,
{
    accounts
        .into_iter()
        .filter(|a| !a.is_archived)
        .map(|a| a.balance)
        .sum()
}

pub fn get_total_balance(conn: &Connection, user: &str) -> Result<Decimal> {
    let accounts = list_accounts(conn, user, false)?;
    Ok(total_balance(&accounts))
}

pub fn update_account(
    conn: &Connection,
    user: &str,
    id: AccountId,
    patch: &AccountPatch,
) -> Result<()> {
    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    if let Some(name) = &patch.name {
        sets.push("name=?");
        values.push(Value::Text(normalize_name(name)?));
    }
    if let Some(t) = &patch.r#type {
        sets.push("type=?");
        values.push(Value::Text(t.as_str().to_string()));
    }
    if let Some(c) = &patch.currency {
        sets.push("currency=?");
        values.push(Value::Text(normalize_currency(c)?));
    }
    if let Some(icon) = &patch.icon {
        sets.push("icon=?");
        values.push(Value::Text(icon.clone()));
    }
    if let Some(color) = &patch.color {
        sets.push("color=?");
        values.push(Value::Text(color.clone()));
    }

    let sql = format!(
        "UPDATE accounts SET {}updated_at={} WHERE id=? AND user_id=?",
        sets.iter().map(|s| format!("{}, ", s)).collect::<String>(),
        NOW
    );
    values.push(Value::Integer(id));
    values.push(Value::Text(user.to_string()));
    let n = conn.execute(&sql, rusqlite::params_from_iter(values))?;
    if n == 0 {
        return Err(LedgerError::not_found(format!("account {}", id)));
    }
    tracing::info!(user, account_id = id, fields = sets.len(), "account updated");
    Ok(())
}

pub fn archive_account(conn: &Connection, user: &str, id: AccountId) -> Result<()> {
    let sql = format!(
        "UPDATE accounts SET is_archived=1, updated_at={} WHERE id=?1 AND user_id=?2",
        NOW
    );
    let n = conn.execute(&sql, params![id, user])?;
    if n == 0 {
        return Err(LedgerError::not_found(format!("account {}", id)));
    }
    tracing::info!(user, account_id = id, "account archived");
    Ok(())
}

/// Overwrite a stored balance. Only the poster calls this, inside its scope.
pub(crate) fn write_balance(
    conn: &Connection,
    user: &str,
    id: AccountId,
    balance: Decimal,
) -> Result<()> {
    let sql = format!(
        "UPDATE accounts SET balance=?1, updated_at={} WHERE id=?2 AND user_id=?3",
        NOW
    );
    let n = conn.execute(&sql, params![balance.to_string(), id, user])?;
    if n == 0 {
        return Err(LedgerError::not_found(format!("account {}", id)));
    }
    Ok(())
}
