// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AccountId, AccountType};
use crate::utils::{maybe_print_json, pretty_table};
use crate::wallet::Wallet;
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(wallet: &Wallet, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("stats", sub)) => stats(wallet, sub)?,
        Some(("balances", sub)) => balances(wallet, sub)?,
        _ => {}
    }
    Ok(())
}

fn stats(wallet: &Wallet, sub: &clap::ArgMatches) -> Result<()> {
    let s = wallet.get_stats()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Net"],
            vec![vec![
                format!("{:.2}", s.total_income),
                format!("{:.2}", s.total_expense),
                format!("{:.2}", s.net_income),
            ]],
        )
    );
    let months = s
        .monthly_totals
        .iter()
        .rev()
        .map(|(m, t)| {
            vec![
                m.clone(),
                format!("{:.2}", t.income),
                format!("{:.2}", t.expense),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expense"], months));

    let mut cats: Vec<_> = s.category_totals.iter().collect();
    cats.sort_by(|a, b| b.1.cmp(a.1));
    let cats = cats
        .into_iter()
        .map(|(c, amt)| vec![c.to_string(), format!("{:.2}", amt)])
        .collect();
    println!("{}", pretty_table(&["Category", "Total"], cats));
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceRow {
    pub id: AccountId,
    pub name: String,
    pub r#type: AccountType,
    pub currency: String,
    pub balance: Decimal,
}

/// Non-archived balances plus their total, as printed by `report balances`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReport {
    pub accounts: Vec<BalanceRow>,
    pub total: Decimal,
    pub currency: String,
}

pub fn balance_report(wallet: &Wallet) -> Result<BalanceReport> {
    let accounts = wallet.accounts(false)?;
    let total = crate::ledger::total_balance(&accounts);
    Ok(BalanceReport {
        accounts: accounts
            .into_iter()
            .map(|a| BalanceRow {
                id: a.id,
                name: a.name,
                r#type: a.r#type,
                currency: a.currency,
                balance: a.balance,
            })
            .collect(),
        total,
        currency: wallet.settings()?.currency,
    })
}

fn balances(wallet: &Wallet, sub: &clap::ArgMatches) -> Result<()> {
    let report = balance_report(wallet)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let mut data: Vec<Vec<String>> = report
        .accounts
        .iter()
        .map(|a| vec![a.name.clone(), a.currency.clone(), format!("{:.2}", a.balance)])
        .collect();
    data.push(vec![
        "Total".into(),
        report.currency.clone(),
        format!("{:.2}", report.total),
    ]);
    println!("{}", pretty_table(&["Account", "CCY", "Balance"], data));
    Ok(())
}
