// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{optional, required};
use crate::models::{Category, Transaction, TransactionDraft, TransactionType};
use crate::query::TransactionFilter;
use crate::utils::{
    maybe_print_json, parse_date, parse_decimal, parse_end_date, parse_id, pretty_table,
};
use crate::wallet::Wallet;
use anyhow::Result;

pub fn handle(wallet: &mut Wallet, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(wallet, sub)?,
        Some(("list", sub)) => list(wallet, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(required(sub, "id")?)?;
            wallet.delete_transaction(id)?;
            println!("Deleted transaction {} and reversed its balance effect", id);
        }
        _ => {}
    }
    Ok(())
}

pub fn draft_from_args(sub: &clap::ArgMatches) -> Result<TransactionDraft> {
    let account_id = |name: &str| optional(sub, name).map(parse_id).transpose();
    Ok(TransactionDraft {
        r#type: required(sub, "type")?.parse::<TransactionType>()?,
        amount: parse_decimal(required(sub, "amount")?)?,
        description: optional(sub, "description").unwrap_or_default().to_string(),
        category: optional(sub, "category")
            .map(str::parse::<Category>)
            .transpose()?
            .unwrap_or(Category::Other),
        date: parse_date(required(sub, "date")?)?,
        account_id: account_id("account")?,
        from_account_id: account_id("from")?,
        to_account_id: account_id("to")?,
        notes: optional(sub, "note").map(str::to_string),
        tags: sub
            .get_many::<String>("tag")
            .map(|vals| vals.map(|t| t.trim().to_string()).collect())
            .unwrap_or_default(),
    })
}

fn add(wallet: &mut Wallet, sub: &clap::ArgMatches) -> Result<()> {
    let draft = draft_from_args(sub)?;
    let id = wallet.add_transaction(&draft)?;
    println!(
        "Posted {} {} on {} (#{})",
        draft.r#type,
        draft.amount,
        draft.date.format("%Y-%m-%d"),
        id
    );
    Ok(())
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    Ok(TransactionFilter {
        start_date: optional(sub, "start").map(parse_date).transpose()?,
        end_date: optional(sub, "end").map(parse_end_date).transpose()?,
        r#type: optional(sub, "type")
            .map(str::parse::<TransactionType>)
            .transpose()?,
        category: optional(sub, "category")
            .map(str::parse::<Category>)
            .transpose()?,
        account_id: optional(sub, "account").map(parse_id).transpose()?,
        min_amount: optional(sub, "min").map(parse_decimal).transpose()?,
        max_amount: optional(sub, "max").map(parse_decimal).transpose()?,
        search: optional(sub, "search").map(str::to_string),
    })
}

pub fn query_rows(wallet: &Wallet, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = filter_from_args(sub)?;
    let mut data = wallet.list_transactions(&filter)?;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}

fn list(wallet: &Wallet, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(wallet, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                let accounts = match (t.account_id, t.from_account_id, t.to_account_id) {
                    (Some(a), _, _) => a.to_string(),
                    (None, Some(f), Some(to)) => format!("{} -> {}", f, to),
                    _ => String::new(),
                };
                vec![
                    t.id.to_string(),
                    t.date.format("%Y-%m-%d").to_string(),
                    t.r#type.to_string(),
                    accounts,
                    format!("{:.2}", t.amount),
                    t.category.to_string(),
                    t.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Account", "Amount", "Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}
