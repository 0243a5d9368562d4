// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use walletledger::models::{AccountDraft, AccountType, Category, TransactionDraft, TransactionType};
use walletledger::{LedgerError, Wallet, db};

fn cents() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|c| Decimal::new(c, 2))
}

fn kind() -> impl Strategy<Value = TransactionType> {
    prop_oneof![
        Just(TransactionType::Income),
        Just(TransactionType::Expense),
        Just(TransactionType::Transfer),
    ]
}

fn wallet_with(a: Decimal, b: Decimal) -> (Wallet, i64, i64) {
    let mut w = Wallet::new(db::open_in_memory().unwrap(), "prop", 0).unwrap();
    let ida = w
        .add_account(&AccountDraft::new("A", AccountType::Cash).with_balance(a))
        .unwrap();
    let idb = w
        .add_account(&AccountDraft::new("B", AccountType::Savings).with_balance(b))
        .unwrap();
    (w, ida, idb)
}

fn draft(kind: TransactionType, a: i64, b: i64, amount: Decimal) -> TransactionDraft {
    let date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    match kind {
        TransactionType::Income => TransactionDraft::income(a, amount, Category::Other, date),
        TransactionType::Expense => TransactionDraft::expense(a, amount, Category::Other, date),
        TransactionType::Transfer => TransactionDraft::transfer(a, b, amount, date),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn post_then_reverse_restores_balances(
        start_a in cents(),
        start_b in cents(),
        amount in cents(),
        k in kind(),
    ) {
        let (mut w, a, b) = wallet_with(start_a, start_b);
        match w.add_transaction(&draft(k, a, b, amount)) {
            Ok(id) => {
                w.delete_transaction(id).unwrap();
            }
            Err(LedgerError::InsufficientBalance { .. }) => {
                prop_assert!(k != TransactionType::Income);
                prop_assert!(start_a < amount);
            }
            Err(e) => return Err(TestCaseError::fail(format!("unexpected {e}"))),
        }
        prop_assert_eq!(w.get_balance(a).unwrap(), start_a);
        prop_assert_eq!(w.get_balance(b).unwrap(), start_b);
    }

    #[test]
    fn expense_lowers_balance_by_amount_when_covered(start in cents(), amount in cents()) {
        let (mut w, a, b) = wallet_with(start, Decimal::ZERO);
        let res = w.add_transaction(&draft(TransactionType::Expense, a, b, amount));
        if start >= amount {
            prop_assert!(res.is_ok());
            prop_assert_eq!(w.get_balance(a).unwrap(), start - amount);
        } else {
            prop_assert!(
                matches!(res, Err(LedgerError::InsufficientBalance { .. })),
                "expected insufficient balance"
            );
            prop_assert_eq!(w.get_balance(a).unwrap(), start);
        }
    }

    #[test]
    fn transfers_preserve_the_pair_sum(
        start_a in cents(),
        start_b in cents(),
        amounts in proptest::collection::vec(cents(), 1..8),
    ) {
        let (mut w, a, b) = wallet_with(start_a, start_b);
        for (i, amount) in amounts.into_iter().enumerate() {
            let (from, to) = if i % 2 == 0 { (a, b) } else { (b, a) };
            let before_from = w.get_balance(from).unwrap();
            match w.add_transaction(&draft(TransactionType::Transfer, from, to, amount)) {
                Ok(_) => {
                    prop_assert!(before_from >= amount);
                }
                Err(LedgerError::InsufficientBalance { .. }) => {
                    prop_assert!(before_from < amount);
                }
                Err(e) => return Err(TestCaseError::fail(format!("unexpected {e}"))),
            }
            prop_assert_eq!(
                w.get_balance(a).unwrap() + w.get_balance(b).unwrap(),
                start_a + start_b
            );
        }
    }
}
