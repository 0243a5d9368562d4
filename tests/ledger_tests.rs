// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use walletledger::ledger;
use walletledger::models::{AccountDraft, AccountPatch, AccountType};
use walletledger::{LedgerError, Wallet, db};

fn setup() -> Wallet {
    Wallet::new(db::open_in_memory().unwrap(), "alice", 3).unwrap()
}

#[test]
fn new_account_defaults() {
    let mut w = setup();
    let id = w
        .add_account(&AccountDraft::new("  Checking ", AccountType::Bank))
        .unwrap();
    let a = w.account(id).unwrap();
    assert_eq!(a.name, "Checking");
    assert_eq!(a.r#type, AccountType::Bank);
    assert_eq!(a.balance, Decimal::ZERO);
    assert_eq!(a.currency, "USD");
    assert!(!a.is_archived);
    assert_eq!(a.user_id, "alice");
    assert_eq!(a.created_at, a.updated_at);
}

#[test]
fn add_account_validates_name_and_currency() {
    let mut w = setup();
    let err = w
        .add_account(&AccountDraft::new("   ", AccountType::Cash))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let err = w
        .add_account(&AccountDraft::new("Euro", AccountType::Cash).with_currency("EURO"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let id = w
        .add_account(&AccountDraft::new("Euro", AccountType::Cash).with_currency("eur"))
        .unwrap();
    assert_eq!(w.account(id).unwrap().currency, "EUR");
}

#[test]
fn update_changes_descriptive_fields_only() {
    let mut w = setup();
    let id = w
        .add_account(&AccountDraft::new("Old", AccountType::Cash).with_balance(dec!(75)))
        .unwrap();
    w.update_account(
        id,
        &AccountPatch {
            name: Some("New".into()),
            r#type: Some(AccountType::Savings),
            currency: Some("gbp".into()),
            color: Some("#00ff00".into()),
            ..Default::default()
        },
    )
    .unwrap();
    let a = w.account(id).unwrap();
    assert_eq!(a.name, "New");
    assert_eq!(a.r#type, AccountType::Savings);
    assert_eq!(a.currency, "GBP");
    assert_eq!(a.color.as_deref(), Some("#00ff00"));
    assert_eq!(a.icon, None);
    assert_eq!(a.balance, dec!(75));
    assert!(a.updated_at >= a.created_at);
}

#[test]
fn update_and_archive_unknown_account_are_not_found() {
    let mut w = setup();
    let patch = AccountPatch {
        name: Some("x".into()),
        ..Default::default()
    };
    assert!(matches!(
        w.update_account(404, &patch),
        Err(LedgerError::NotFound(_))
    ));
    assert!(matches!(w.archive_account(404), Err(LedgerError::NotFound(_))));
    assert!(matches!(w.get_balance(404), Err(LedgerError::NotFound(_))));
}

#[test]
fn archived_accounts_leave_listings_and_totals() {
    let mut w = setup();
    let a = w
        .add_account(&AccountDraft::new("A", AccountType::Cash).with_balance(dec!(100)))
        .unwrap();
    let b = w
        .add_account(&AccountDraft::new("B", AccountType::Bank).with_balance(dec!(250.25)))
        .unwrap();
    let c = w
        .add_account(&AccountDraft::new("C", AccountType::CreditCard).with_balance(dec!(-50)))
        .unwrap();
    assert_eq!(w.get_total_balance().unwrap(), dec!(300.25));

    w.archive_account(b).unwrap();
    assert!(w.account(b).unwrap().is_archived);
    assert_eq!(w.get_total_balance().unwrap(), dec!(50));

    let visible: Vec<_> = w.accounts(false).unwrap().into_iter().map(|x| x.id).collect();
    assert_eq!(visible, vec![a, c]);
    assert_eq!(w.accounts(true).unwrap().len(), 3);
}

#[test]
fn total_balance_matches_individual_balances() {
    let mut w = setup();
    for (i, bal) in [dec!(1.10), dec!(2.20), dec!(-0.30), dec!(1000)].into_iter().enumerate() {
        w.add_account(&AccountDraft::new(format!("acct{i}"), AccountType::Cash).with_balance(bal))
            .unwrap();
    }
    let accounts = w.accounts(false).unwrap();
    let by_lookup: Decimal = accounts
        .iter()
        .map(|a| w.get_balance(a.id).unwrap())
        .sum();
    assert_eq!(ledger::total_balance(&accounts), by_lookup);
    assert_eq!(by_lookup, dec!(1003.00));
}

#[test]
fn total_balance_skips_archived_members_of_the_given_set() {
    let mut w = setup();
    let a = w
        .add_account(&AccountDraft::new("A", AccountType::Cash).with_balance(dec!(5)))
        .unwrap();
    w.add_account(&AccountDraft::new("B", AccountType::Cash).with_balance(dec!(7)))
        .unwrap();
    w.archive_account(a).unwrap();
    let all = w.accounts(true).unwrap();
    assert_eq!(ledger::total_balance(&all), dec!(7));
}

#[test]
fn display_currency_setting() {
    let mut w = setup();
    assert_eq!(w.settings().unwrap().currency, "USD");
    assert_eq!(w.set_currency("try").unwrap().currency, "TRY");
    assert_eq!(w.settings().unwrap().currency, "TRY");
    assert!(matches!(w.set_currency("lira"), Err(LedgerError::Validation(_))));
}

#[test]
fn blank_user_is_rejected() {
    let err = Wallet::new(db::open_in_memory().unwrap(), "  ", 0).err().unwrap();
    assert!(matches!(err, LedgerError::Validation(_)));
}
