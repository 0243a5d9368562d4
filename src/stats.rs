// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_income: Decimal,
    /// Every transaction type counts toward its category.
    pub category_totals: BTreeMap<Category, Decimal>,
    /// Keyed by `YYYY-MM` of the transaction date in UTC.
    pub monthly_totals: BTreeMap<String, MonthTotals>,
}

pub fn month_key(t: &Transaction) -> String {
    t.date.format("%Y-%m").to_string()
}

pub fn aggregate(transactions: &[Transaction]) -> Stats {
    let mut s = Stats::default();
    for t in transactions {
        *s.category_totals.entry(t.category).or_insert(Decimal::ZERO) += t.amount;
        let month = s.monthly_totals.entry(month_key(t)).or_default();
        match t.r#type {
            TransactionType::Income => {
                s.total_income += t.amount;
                month.income += t.amount;
            }
            TransactionType::Expense => {
                s.total_expense += t.amount;
                month.expense += t.amount;
            }
            TransactionType::Transfer => {}
        }
    }
    s.net_income = s.total_income - s.total_expense;
    s
}
