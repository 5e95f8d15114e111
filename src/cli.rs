// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    ]
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .short('p')
        .value_parser(["daily", "weekly", "monthly", "yearly"])
        .help("Period to fetch (default: monthly)")
}

/// Division, category and explicit date range filters.
fn filter_args() -> [Arg; 4] {
    [
        Arg::new("division")
            .long("division")
            .value_parser(["all", "office", "personal"])
            .help("Only this division"),
        Arg::new("category")
            .long("category")
            .help("Only this category id (or 'all')"),
        Arg::new("from")
            .long("from")
            .requires("to")
            .help("Range start, YYYY-MM-DD"),
        Arg::new("to")
            .long("to")
            .requires("from")
            .help("Range end, YYYY-MM-DD"),
    ]
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .short('t')
        .value_parser(["income", "expense"])
}

fn division_arg() -> Arg {
    Arg::new("division")
        .long("division")
        .value_parser(["office", "personal"])
}

pub fn build_cli() -> Command {
    Command::new("moneytrack")
        .version(clap::crate_version!())
        .about("Track income and expenses by division, category and period")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the local state store"))
        .subcommand(
            Command::new("summary")
                .about("Income, expense and balance for a period")
                .arg(period_arg())
                .args(filter_args())
                .arg(
                    Arg::new("remote")
                        .long("remote")
                        .action(ArgAction::SetTrue)
                        .conflicts_with_all(["division", "category", "from", "to"])
                        .help("Ask the server for its totals instead of computing them (unfiltered)"),
                )
                .args(json_flags()),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list")
                        .arg(period_arg())
                        .args(filter_args())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_flags()),
                )
                .subcommand(
                    Command::new("add")
                        .arg(type_arg().required(true))
                        .arg(Arg::new("amount").long("amount").short('a'))
                        .arg(Arg::new("description").long("description").short('d'))
                        .arg(Arg::new("category").long("category").short('c'))
                        .arg(division_arg().default_value("personal"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default now"))
                        .arg(period_arg()),
                )
                .subcommand(
                    Command::new("update")
                        .arg(Arg::new("id").required(true))
                        .arg(type_arg())
                        .arg(Arg::new("amount").long("amount").short('a'))
                        .arg(Arg::new("description").long("description").short('d'))
                        .arg(Arg::new("category").long("category").short('c'))
                        .arg(division_arg())
                        .arg(Arg::new("date").long("date"))
                        .arg(period_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("id").required(true))
                        .arg(period_arg()),
                ),
        )
        .subcommand(
            Command::new("transfer")
                .about("Move money between accounts")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(Arg::new("amount").long("amount").short('a'))
                        .arg(Arg::new("description").long("description").short('d')),
                )
                .subcommand(Command::new("list").args(json_flags())),
        )
        .subcommand(
            Command::new("account")
                .about("Accounts and balances")
                .subcommand_required(true)
                .subcommand(Command::new("list").args(json_flags())),
        )
        .subcommand(
            Command::new("category")
                .about("Category registry")
                .subcommand_required(true)
                .subcommand(Command::new("list").arg(type_arg()).args(json_flags())),
        )
        .subcommand(
            Command::new("report")
                .about("Server-generated reports")
                .subcommand_required(true)
                .subcommand(
                    Command::new("download")
                        .arg(period_arg())
                        .arg(Arg::new("out").long("out").short('o')),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export the filtered view")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .short('f')
                                .default_value("csv"),
                        )
                        .arg(Arg::new("out").long("out").short('o').required(true))
                        .arg(period_arg())
                        .args(filter_args()),
                ),
        )
}
