// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Numeric id")
}

pub fn build_cli() -> Command {
    command!()
        .name("walletledger")
        .about("Personal accounts and transactions with atomic balance posting")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Database file (default: platform data dir, or WALLETLEDGER_DB)"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .help("User partition (default: WALLETLEDGER_USER or 'local')"),
        )
        .subcommand(Command::new("init").about("Create the database and user"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("CASH | BANK | CREDIT_CARD | SAVINGS | INVESTMENT"),
                        )
                        .arg(Arg::new("balance").long("balance").help("Opening balance"))
                        .arg(Arg::new("currency").long("currency").help("ISO code, default USD"))
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(json_args(
                    Command::new("list").arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include archived accounts"),
                    ),
                ))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(Command::new("archive").arg(id_arg()))
                .subcommand(Command::new("balance").arg(id_arg()))
                .subcommand(Command::new("total").about("Total over non-archived accounts")),
        )
        .subcommand(
            Command::new("tx")
                .about("Post, list and delete transactions")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income | expense | transfer"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("account").long("account").help("For income/expense"))
                        .arg(Arg::new("from").long("from").help("Transfer source"))
                        .arg(Arg::new("to").long("to").help("Transfer destination"))
                        .arg(Arg::new("category").long("category").help("Default: other"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("tag").long("tag").action(ArgAction::Append)),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(Arg::new("start").long("start").help("From date, inclusive"))
                        .arg(Arg::new("end").long("end").help("To date, inclusive"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("min").long("min"))
                        .arg(Arg::new("max").long("max"))
                        .arg(Arg::new("search").long("search"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregates")
                .subcommand(json_args(Command::new("stats")))
                .subcommand(json_args(Command::new("balances"))),
        )
        .subcommand(
            Command::new("settings").about("User settings").subcommand(
                Command::new("currency")
                    .arg(Arg::new("code").help("New display currency; omit to show")),
            ),
        )
}
