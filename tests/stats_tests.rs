// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use walletledger::models::{
    AccountDraft, AccountType, Category, Transaction, TransactionDraft, TransactionStatus,
    TransactionType,
};
use walletledger::stats::{MonthTotals, aggregate};
use walletledger::{Wallet, db};

fn record(
    id: i64,
    r#type: TransactionType,
    amount: Decimal,
    category: Category,
    (y, m, d): (i32, u32, u32),
) -> Transaction {
    let date = Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap();
    let transfer = r#type == TransactionType::Transfer;
    Transaction {
        id,
        user_id: "alice".into(),
        r#type,
        amount,
        description: String::new(),
        category,
        date,
        status: TransactionStatus::Completed,
        account_id: (!transfer).then_some(1),
        from_account_id: transfer.then_some(1),
        to_account_id: transfer.then_some(2),
        notes: None,
        tags: Vec::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn aggregate_income_expense_and_months() {
    let txs = vec![
        record(1, TransactionType::Income, dec!(100), Category::Salary, (2024, 1, 5)),
        record(2, TransactionType::Expense, dec!(40), Category::Food, (2024, 1, 20)),
        record(3, TransactionType::Income, dec!(10), Category::Business, (2024, 2, 1)),
    ];
    let s = aggregate(&txs);
    assert_eq!(s.total_income, dec!(110));
    assert_eq!(s.total_expense, dec!(40));
    assert_eq!(s.net_income, dec!(70));
    assert_eq!(s.monthly_totals.len(), 2);
    assert_eq!(
        s.monthly_totals["2024-01"],
        MonthTotals {
            income: dec!(100),
            expense: dec!(40)
        }
    );
    assert_eq!(
        s.monthly_totals["2024-02"],
        MonthTotals {
            income: dec!(10),
            expense: Decimal::ZERO
        }
    );
    assert_eq!(s.category_totals[&Category::Salary], dec!(100));
    assert_eq!(s.category_totals[&Category::Food], dec!(40));
    assert_eq!(s.category_totals[&Category::Business], dec!(10));
}

#[test]
fn transfers_count_by_category_but_not_as_income_or_expense() {
    let txs = vec![
        record(1, TransactionType::Transfer, dec!(300), Category::Savings, (2024, 4, 10)),
        record(2, TransactionType::Expense, dec!(20), Category::Savings, (2024, 4, 11)),
    ];
    let s = aggregate(&txs);
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_expense, dec!(20));
    assert_eq!(s.net_income, dec!(-20));
    assert_eq!(s.category_totals[&Category::Savings], dec!(320));
    assert_eq!(s.monthly_totals["2024-04"].expense, dec!(20));
}

#[test]
fn empty_input_gives_zeroed_stats() {
    let s = aggregate(&[]);
    assert_eq!(s.net_income, Decimal::ZERO);
    assert!(s.category_totals.is_empty());
    assert!(s.monthly_totals.is_empty());
}

#[test]
fn month_follows_user_date_not_creation_time() {
    let mut w = Wallet::new(db::open_in_memory().unwrap(), "alice", 3).unwrap();
    let a = w
        .add_account(&AccountDraft::new("A", AccountType::Cash))
        .unwrap();
    let late_evening = Utc.with_ymd_and_hms(2023, 11, 30, 23, 59, 0).unwrap();
    w.add_transaction(&TransactionDraft::income(a, dec!(5), Category::Other, late_evening))
        .unwrap();
    let s = w.get_stats().unwrap();
    assert_eq!(s.monthly_totals.keys().collect::<Vec<_>>(), vec!["2023-11"]);
}

#[test]
fn stats_serialize_with_lowercase_category_keys() {
    let txs = vec![record(1, TransactionType::Income, dec!(1), Category::Salary, (2024, 1, 1))];
    let v = serde_json::to_value(aggregate(&txs)).unwrap();
    assert!(v["category_totals"].get("salary").is_some());
    assert!(v["monthly_totals"].get("2024-01").is_some());
}
