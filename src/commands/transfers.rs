// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use clap::ArgMatches;

use crate::TransactionEngine;
use crate::draft::TransferDraft;
use crate::gateway::TransactionGateway;
use crate::store::StateStore;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

pub fn handle<G, S>(engine: &mut TransactionEngine<G, S>, m: &ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    match m.subcommand() {
        Some(("add", sub)) => add(engine, sub)?,
        Some(("list", sub)) => list(engine, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn draft_from(sub: &ArgMatches) -> Result<TransferDraft> {
    let from = sub
        .get_one::<String>("from")
        .ok_or_else(|| anyhow!("--from is required"))?;
    let to = sub
        .get_one::<String>("to")
        .ok_or_else(|| anyhow!("--to is required"))?;
    Ok(TransferDraft {
        from_account_id: from.clone(),
        to_account_id: to.clone(),
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or_default(),
    })
}

fn add<G, S>(engine: &mut TransactionEngine<G, S>, sub: &ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    let draft = draft_from(sub)?;
    let transfer = engine.record_transfer(&draft)?;
    println!(
        "{} ({})",
        transfer.description,
        fmt_money(&transfer.amount)
    );
    Ok(())
}

fn list<G, S>(engine: &TransactionEngine<G, S>, sub: &ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let transfers = engine.transfers();
    if maybe_print_json(json_flag, jsonl_flag, &transfers)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = transfers
        .iter()
        .rev()
        .map(|t| {
            vec![
                t.transaction_date.format("%Y-%m-%d %H:%M").to_string(),
                t.from_account_id.clone(),
                t.to_account_id.clone(),
                fmt_money(&t.amount),
                t.description.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "From", "To", "Amount", "Description"], rows)
    );
    Ok(())
}
