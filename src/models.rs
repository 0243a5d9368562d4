// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type AccountId = i64;
pub type TransactionId = i64;

macro_rules! text_enum {
    ($name:ident, $what:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $(t if t.eq_ignore_ascii_case($text) => Ok($name::$variant),)+
                    other => Err(LedgerError::validation(format!(
                        "unknown {} '{}'",
                        $what, other
                    ))),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Cash,
    Bank,
    CreditCard,
    Savings,
    Investment,
}

text_enum!(AccountType, "account type" {
    Cash => "CASH",
    Bank => "BANK",
    CreditCard => "CREDIT_CARD",
    Savings => "SAVINGS",
    Investment => "INVESTMENT",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

text_enum!(TransactionType, "transaction type" {
    Income => "income",
    Expense => "expense",
    Transfer => "transfer",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Salary,
    Business,
    Investment,
    Food,
    Transportation,
    Housing,
    Utilities,
    Insurance,
    Healthcare,
    Entertainment,
    Shopping,
    Education,
    Savings,
    Debt,
    Other,
}

text_enum!(Category, "category" {
    Salary => "salary",
    Business => "business",
    Investment => "investment",
    Food => "food",
    Transportation => "transportation",
    Housing => "housing",
    Utilities => "utilities",
    Insurance => "insurance",
    Healthcare => "healthcare",
    Entertainment => "entertainment",
    Shopping => "shopping",
    Education => "education",
    Savings => "savings",
    Debt => "debt",
    Other => "other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
    Cancelled,
}

text_enum!(TransactionStatus, "transaction status" {
    Completed => "completed",
    Pending => "pending",
    Failed => "failed",
    Cancelled => "cancelled",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub user_id: String,
    pub name: String,
    pub r#type: AccountType,
    /// For credit cards a positive balance is the amount owed.
    pub balance: Decimal,
    pub currency: String,
    pub is_archived: bool,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDraft {
    pub name: String,
    pub r#type: AccountType,
    pub opening_balance: Decimal,
    /// Defaults to USD.
    pub currency: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl AccountDraft {
    pub fn new(name: impl Into<String>, r#type: AccountType) -> Self {
        Self {
            name: name.into(),
            r#type,
            opening_balance: Decimal::ZERO,
            currency: None,
            icon: None,
            color: None,
        }
    }

    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.opening_balance = balance;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

/// Editable account fields. Balances change only through posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub r#type: Option<AccountType>,
    pub currency: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl AccountPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.r#type.is_none()
            && self.currency.is_none()
            && self.icon.is_none()
            && self.color.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: String,
    pub r#type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub category: Category,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
    pub account_id: Option<AccountId>,
    pub from_account_id: Option<AccountId>,
    pub to_account_id: Option<AccountId>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// True if the transaction touches the account on either side.
    pub fn involves(&self, account_id: AccountId) -> bool {
        self.account_id == Some(account_id)
            || self.from_account_id == Some(account_id)
            || self.to_account_id == Some(account_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub r#type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub category: Category,
    pub date: DateTime<Utc>,
    pub account_id: Option<AccountId>,
    pub from_account_id: Option<AccountId>,
    pub to_account_id: Option<AccountId>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

impl TransactionDraft {
    fn single(
        r#type: TransactionType,
        account_id: AccountId,
        amount: Decimal,
        category: Category,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            r#type,
            amount,
            description: String::new(),
            category,
            date,
            account_id: Some(account_id),
            from_account_id: None,
            to_account_id: None,
            notes: None,
            tags: Vec::new(),
        }
    }

    pub fn income(
        account_id: AccountId,
        amount: Decimal,
        category: Category,
        date: DateTime<Utc>,
    ) -> Self {
        Self::single(TransactionType::Income, account_id, amount, category, date)
    }

    pub fn expense(
        account_id: AccountId,
        amount: Decimal,
        category: Category,
        date: DateTime<Utc>,
    ) -> Self {
        Self::single(TransactionType::Expense, account_id, amount, category, date)
    }

    pub fn transfer(
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: Decimal,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            r#type: TransactionType::Transfer,
            amount,
            description: String::new(),
            category: Category::Other,
            date,
            account_id: None,
            from_account_id: Some(from_account_id),
            to_account_id: Some(to_account_id),
            notes: None,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub user_id: String,
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_forms_parse_back_ignoring_case() {
        for t in AccountType::ALL {
            assert_eq!(t.as_str().parse::<AccountType>().unwrap(), *t);
            assert_eq!(t.as_str().to_lowercase().parse::<AccountType>().unwrap(), *t);
        }
        for c in Category::ALL {
            assert_eq!(format!(" {} ", c.as_str().to_uppercase()).parse::<Category>().unwrap(), *c);
        }
        for s in TransactionStatus::ALL {
            assert_eq!(s.to_string().parse::<TransactionStatus>().unwrap(), *s);
        }
        assert_eq!(TransactionType::ALL.len(), 3);
    }

    #[test]
    fn unknown_text_is_a_validation_error() {
        let err = "refund".parse::<TransactionType>().unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("refund"));
    }

    #[test]
    fn serde_names_match_stored_text() {
        let json = serde_json::to_string(&AccountType::CreditCard).unwrap();
        assert_eq!(json, "\"CREDIT_CARD\"");
        assert_eq!(serde_json::to_string(&Category::Food).unwrap(), "\"food\"");
    }
}
