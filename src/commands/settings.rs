// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::optional;
use crate::wallet::Wallet;
use anyhow::Result;

pub fn handle(wallet: &mut Wallet, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("currency", sub)) = m.subcommand() {
        match optional(sub, "code") {
            Some(code) => {
                let s = wallet.set_currency(code)?;
                println!("Display currency set to {}", s.currency);
            }
            None => println!("{}", wallet.settings()?.currency),
        }
    }
    Ok(())
}
