// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{optional, required};
use crate::models::{AccountDraft, AccountPatch, AccountType};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, parse_id, pretty_table};
use crate::wallet::Wallet;
use anyhow::{Result, bail};

pub fn handle(wallet: &mut Wallet, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(wallet, sub)?,
        Some(("list", sub)) => list(wallet, sub)?,
        Some(("update", sub)) => update(wallet, sub)?,
        Some(("archive", sub)) => {
            let id = parse_id(required(sub, "id")?)?;
            wallet.archive_account(id)?;
            println!("Archived account {}", id);
        }
        Some(("balance", sub)) => {
            let id = parse_id(required(sub, "id")?)?;
            let account = wallet.account(id)?;
            println!(
                "{}: {}",
                account.name,
                fmt_money(&account.balance, &account.currency)
            );
        }
        Some(("total", _)) => {
            let total = wallet.get_total_balance()?;
            let ccy = wallet.settings()?.currency;
            println!("Total: {}", fmt_money(&total, &ccy));
        }
        _ => {}
    }
    Ok(())
}

fn add(wallet: &mut Wallet, sub: &clap::ArgMatches) -> Result<()> {
    let name = required(sub, "name")?;
    let r#type = required(sub, "type")?.parse::<AccountType>()?;
    let mut draft = AccountDraft::new(name, r#type);
    if let Some(b) = optional(sub, "balance") {
        draft.opening_balance = parse_decimal(b)?;
    }
    draft.currency = optional(sub, "currency").map(str::to_string);
    draft.icon = optional(sub, "icon").map(str::to_string);
    draft.color = optional(sub, "color").map(str::to_string);

    let id = wallet.add_account(&draft)?;
    let account = wallet.account(id)?;
    println!(
        "Added account '{}' #{} ({}, {})",
        account.name,
        id,
        account.r#type,
        fmt_money(&account.balance, &account.currency)
    );
    Ok(())
}

fn update(wallet: &mut Wallet, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    let patch = AccountPatch {
        name: optional(sub, "name").map(str::to_string),
        r#type: optional(sub, "type")
            .map(str::parse::<AccountType>)
            .transpose()?,
        currency: optional(sub, "currency").map(str::to_string),
        icon: optional(sub, "icon").map(str::to_string),
        color: optional(sub, "color").map(str::to_string),
    };
    if patch.is_empty() {
        bail!("Nothing to update; pass at least one of --name --type --currency --icon --color");
    }
    wallet.update_account(id, &patch)?;
    println!("Updated account {}", id);
    Ok(())
}

fn list(wallet: &Wallet, sub: &clap::ArgMatches) -> Result<()> {
    let accounts = wallet.accounts(sub.get_flag("all"))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
        let rows = accounts
            .iter()
            .map(|a| {
                vec![
                    a.id.to_string(),
                    a.name.clone(),
                    a.r#type.to_string(),
                    a.currency.clone(),
                    format!("{:.2}", a.balance),
                    if a.is_archived { "yes".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Type", "CCY", "Balance", "Archived"],
                rows
            )
        );
    }
    Ok(())
}
