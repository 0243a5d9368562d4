// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use walletledger::config::Config;
use walletledger::{Wallet, cli, commands, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut cfg = Config::from_env()?;
    cfg.apply_matches(&matches);
    logging::init(&cfg.log_filter);

    let mut wallet = Wallet::open(&cfg)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            let location = match &cfg.db_path {
                Some(p) => p.display().to_string(),
                None => walletledger::db::db_path()?.display().to_string(),
            };
            println!(
                "Database initialized at {} for user '{}'",
                location,
                wallet.user()
            );
        }
        Some(("account", sub)) => commands::accounts::handle(&mut wallet, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut wallet, sub)?,
        Some(("report", sub)) => commands::reports::handle(&wallet, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut wallet, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
