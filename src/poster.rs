// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction poster: the only writer of account balances.
//!
//! A posting is validated structurally first, without touching storage. The
//! balance sufficiency check and every write then happen inside one
//! [`db::atomic`] scope, so a failed check or a storage error leaves neither a
//! partial balance change nor an orphan transaction record behind.

use crate::db;
use crate::error::{LedgerError, Result};
use crate::ledger;
use crate::models::{AccountId, TransactionDraft, TransactionId, TransactionStatus, TransactionType};
use crate::query;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

/// Which accounts a posting touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Single(AccountId),
    Transfer { from: AccountId, to: AccountId },
}

impl Route {
    pub fn accounts(&self) -> Vec<AccountId> {
        match *self {
            Route::Single(id) => vec![id],
            Route::Transfer { from, to } => vec![from, to],
        }
    }

    /// The account whose balance must cover the amount, if any.
    fn source(&self, kind: TransactionType) -> Option<AccountId> {
        match (kind, *self) {
            (TransactionType::Expense, Route::Single(id)) => Some(id),
            (TransactionType::Transfer, Route::Transfer { from, .. }) => Some(from),
            _ => None,
        }
    }
}

/// A draft that passed structural validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub draft: TransactionDraft,
    pub route: Route,
}

/// Check a draft without any storage access.
pub fn validate(draft: &TransactionDraft) -> Result<Validated> {
    if draft.amount <= Decimal::ZERO {
        return Err(LedgerError::validation("amount must be positive"));
    }
    if !db::storable(&draft.date) {
        return Err(LedgerError::validation(format!(
            "date {} is outside years {}..={}",
            draft.date,
            db::DATE_YEARS.start(),
            db::DATE_YEARS.end()
        )));
    }
    let route = match draft.r#type {
        TransactionType::Income | TransactionType::Expense => {
            if draft.from_account_id.is_some() || draft.to_account_id.is_some() {
                return Err(LedgerError::validation(format!(
                    "{} must not name transfer accounts",
                    draft.r#type
                )));
            }
            match draft.account_id {
                Some(id) => Route::Single(id),
                None => return Err(LedgerError::validation("transaction requires an account")),
            }
        }
        TransactionType::Transfer => {
            if draft.account_id.is_some() {
                return Err(LedgerError::validation(
                    "transfer uses from/to accounts, not account",
                ));
            }
            match (draft.from_account_id, draft.to_account_id) {
                (Some(from), Some(to)) if from == to => {
                    return Err(LedgerError::validation("cannot transfer to the same account"));
                }
                (Some(from), Some(to)) => Route::Transfer { from, to },
                _ => {
                    return Err(LedgerError::validation(
                        "transfer requires both source and destination accounts",
                    ));
                }
            }
        }
    };

    let mut draft = draft.clone();
    draft.description = draft.description.trim().to_string();
    draft.notes = draft
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    draft.tags = draft
        .tags
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    Ok(Validated { draft, route })
}

/// Signed balance deltas of posting `amount` along `route`.
pub fn effects(kind: TransactionType, route: Route, amount: Decimal) -> Vec<(AccountId, Decimal)> {
    match route {
        Route::Transfer { from, to } => vec![(from, -amount), (to, amount)],
        Route::Single(id) if kind == TransactionType::Income => vec![(id, amount)],
        Route::Single(id) => vec![(id, -amount)],
    }
}

fn apply(conn: &Connection, user: &str, deltas: &[(AccountId, Decimal)]) -> Result<()> {
    for &(id, delta) in deltas {
        let current = ledger::get_balance(conn, user, id)?;
        let next = current
            .checked_add(delta)
            .ok_or(LedgerError::BalanceOverflow { account_id: id })?;
        ledger::write_balance(conn, user, id, next)?;
    }
    Ok(())
}

/// Post a draft and return the new transaction id.
pub fn post(
    conn: &mut Connection,
    user: &str,
    draft: &TransactionDraft,
    max_retries: u32,
) -> Result<TransactionId> {
    let v = validate(draft)?;
    let d = &v.draft;

    let id = db::atomic(conn, max_retries, |tx| {
        for account_id in v.route.accounts() {
            let account = ledger::get_account(tx, user, account_id)?;
            if account.is_archived {
                return Err(LedgerError::validation(format!(
                    "account {} is archived",
                    account_id
                )));
            }
        }

        if let Some(source) = v.route.source(d.r#type) {
            let balance = ledger::get_balance(tx, user, source)?;
            if balance < d.amount {
                return Err(LedgerError::InsufficientBalance {
                    account_id: source,
                    balance,
                    required: d.amount,
                });
            }
        }

        apply(tx, user, &effects(d.r#type, v.route, d.amount))?;

        let tags = serde_json::to_string(&d.tags)
            .map_err(|e| LedgerError::validation(format!("tags: {}", e)))?;
        tx.execute(
            "INSERT INTO transactions(user_id, type, amount, description, category, date, status,
                account_id, from_account_id, to_account_id, notes, tags)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                user,
                d.r#type.as_str(),
                d.amount.to_string(),
                d.description,
                d.category.as_str(),
                db::format_timestamp(&d.date),
                TransactionStatus::Completed.as_str(),
                d.account_id,
                d.from_account_id,
                d.to_account_id,
                d.notes,
                tags
            ],
        )?;
        Ok(tx.last_insert_rowid())
    })?;

    tracing::info!(
        user,
        transaction_id = id,
        kind = %d.r#type,
        amount = %d.amount,
        "transaction posted"
    );
    Ok(id)
}

/// Delete a transaction and undo its balance effect. Returns the accounts touched.
pub fn reverse(
    conn: &mut Connection,
    user: &str,
    id: TransactionId,
    max_retries: u32,
) -> Result<Vec<AccountId>> {
    let touched = db::atomic(conn, max_retries, |tx| {
        let t = query::get_transaction(tx, user, id)?;
        let route = match (t.r#type, t.account_id, t.from_account_id, t.to_account_id) {
            (TransactionType::Transfer, _, Some(from), Some(to)) => Route::Transfer { from, to },
            (TransactionType::Income | TransactionType::Expense, Some(a), _, _) => Route::Single(a),
            _ => {
                return Err(LedgerError::Corrupt(format!(
                    "transaction {} has inconsistent account references",
                    id
                )));
            }
        };

        let inverse: Vec<_> = effects(t.r#type, route, t.amount)
            .into_iter()
            .map(|(a, delta)| (a, -delta))
            .collect();
        apply(tx, user, &inverse)?;

        tx.execute(
            "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
            params![id, user],
        )?;
        Ok(route.accounts())
    })?;

    tracing::info!(user, transaction_id = id, "transaction reversed");
    Ok(touched)
}
