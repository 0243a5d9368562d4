// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::error::{LedgerError, Result};
use crate::models::{AccountId, Category, Transaction, TransactionId, TransactionType};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const TRANSACTION_COLUMNS: &str = "id, user_id, type, amount, description, category, date, status, account_id, from_account_id, to_account_id, notes, tags, created_at, updated_at";

/// Every field is optional; the ones that are set must all match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub r#type: Option<TransactionType>,
    pub category: Option<Category>,
    /// Matches the account on either side of a transfer too.
    pub account_id: Option<AccountId>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        if self.start_date.is_some_and(|s| t.date < s) {
            return false;
        }
        if self.end_date.is_some_and(|e| t.date > e) {
            return false;
        }
        if self.r#type.is_some_and(|k| t.r#type != k) {
            return false;
        }
        if self.category.is_some_and(|c| t.category != c) {
            return false;
        }
        if self.account_id.is_some_and(|a| !t.involves(a)) {
            return false;
        }
        if self.min_amount.is_some_and(|m| t.amount < m) {
            return false;
        }
        if self.max_amount.is_some_and(|m| t.amount > m) {
            return false;
        }
        if let Some(needle) = self.search.as_deref().map(str::to_lowercase) {
            let hit = t.description.to_lowercase().contains(&needle)
                || t
                    .notes
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
                || t.tags.iter().any(|tag| tag.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }
}

struct TransactionRow {
    id: i64,
    user_id: String,
    r#type: String,
    amount: String,
    description: String,
    category: String,
    date: String,
    status: String,
    account_id: Option<i64>,
    from_account_id: Option<i64>,
    to_account_id: Option<i64>,
    notes: Option<String>,
    tags: String,
    created_at: String,
    updated_at: String,
}

impl TransactionRow {
    fn read(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            user_id: r.get(1)?,
            r#type: r.get(2)?,
            amount: r.get(3)?,
            description: r.get(4)?,
            category: r.get(5)?,
            date: r.get(6)?,
            status: r.get(7)?,
            account_id: r.get(8)?,
            from_account_id: r.get(9)?,
            to_account_id: r.get(10)?,
            notes: r.get(11)?,
            tags: r.get(12)?,
            created_at: r.get(13)?,
            updated_at: r.get(14)?,
        })
    }

    fn decode(self) -> Result<Transaction> {
        let corrupt = |what: &str, v: &str| {
            LedgerError::Corrupt(format!("transaction {}: {} '{}'", self.id, what, v))
        };
        Ok(Transaction {
            id: self.id,
            r#type: self
                .r#type
                .parse()
                .map_err(|_| corrupt("type", &self.r#type))?,
            amount: db::parse_amount(&self.amount)?,
            category: self
                .category
                .parse()
                .map_err(|_| corrupt("category", &self.category))?,
            date: db::parse_timestamp(&self.date)?,
            status: self
                .status
                .parse()
                .map_err(|_| corrupt("status", &self.status))?,
            tags: serde_json::from_str(&self.tags).map_err(|_| corrupt("tags", &self.tags))?,
            created_at: db::parse_timestamp(&self.created_at)?,
            updated_at: db::parse_timestamp(&self.updated_at)?,
            user_id: self.user_id,
            description: self.description,
            account_id: self.account_id,
            from_account_id: self.from_account_id,
            to_account_id: self.to_account_id,
            notes: self.notes,
        })
    }
}

pub fn find_transaction(
    conn: &Connection,
    user: &str,
    id: TransactionId,
) -> Result<Option<Transaction>> {
    let sql = format!(
        "SELECT {} FROM transactions WHERE id=?1 AND user_id=?2",
        TRANSACTION_COLUMNS
    );
    let row = conn
        .query_row(&sql, params![id, user], TransactionRow::read)
        .optional()?;
    row.map(TransactionRow::decode).transpose()
}

pub fn get_transaction(conn: &Connection, user: &str, id: TransactionId) -> Result<Transaction> {
    find_transaction(conn, user, id)?
        .ok_or_else(|| LedgerError::not_found(format!("transaction {}", id)))
}

/// All of the user's transactions matching `filter`, newest first.
pub fn list(conn: &Connection, user: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
    let mut sql = format!(
        "SELECT {} FROM transactions WHERE user_id=?1",
        TRANSACTION_COLUMNS
    );
    // Stored dates share one fixed-width UTC format, so the range narrows in
    // SQL. Bounds outside that format are left to `matches`.
    let mut bounds: Vec<String> = Vec::new();
    if let Some(s) = filter.start_date.filter(db::storable) {
        sql.push_str(&format!(" AND date>=?{}", bounds.len() + 2));
        bounds.push(db::format_timestamp(&s));
    }
    if let Some(e) = filter.end_date.filter(db::storable) {
        sql.push_str(&format!(" AND date<=?{}", bounds.len() + 2));
        bounds.push(db::format_timestamp(&e));
    }
    sql.push_str(" ORDER BY date DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let mut args: Vec<&dyn rusqlite::ToSql> = vec![&user];
    args.extend(bounds.iter().map(|b| b as &dyn rusqlite::ToSql));
    let mut rows = stmt.query(rusqlite::params_from_iter(args))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let t = TransactionRow::read(r)?.decode()?;
        if filter.matches(&t) {
            data.push(t);
        }
    }
    Ok(data)
}
