// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::ErrorCode;
use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed input. Raised before any storage access.
    #[error("validation error: {0}")]
    Validation(String),

    #[error(
        "insufficient balance in account {account_id}: balance {balance}, required {required}"
    )]
    InsufficientBalance {
        account_id: i64,
        balance: Decimal,
        required: Decimal,
    },

    /// Applying a posting would take a balance past the decimal range.
    #[error("balance of account {account_id} would overflow")]
    BalanceOverflow { account_id: i64 },

    #[error("not found: {0}")]
    NotFound(String),

    /// The database was busy or locked. The whole operation may be retried.
    #[error("storage conflict: {0}")]
    StorageConflict(#[source] rusqlite::Error),

    #[error("storage error: {0}")]
    Storage(#[source] rusqlite::Error),

    /// A stored value could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        LedgerError::NotFound(msg.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::StorageConflict(_))
    }

    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::Validation(_) => "VALIDATION_ERROR",
            LedgerError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            LedgerError::BalanceOverflow { .. } => "BALANCE_OVERFLOW",
            LedgerError::NotFound(_) => "NOT_FOUND",
            LedgerError::StorageConflict(_) => "STORAGE_CONFLICT",
            LedgerError::Storage(_) => "STORAGE_ERROR",
            LedgerError::Corrupt(_) => "CORRUPT_RECORD",
        }
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(f, _)
                if matches!(f.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) =>
            {
                LedgerError::StorageConflict(e)
            }
            _ => LedgerError::Storage(e),
        }
    }
}
