// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::TransactionEngine;
use crate::gateway::TransactionGateway;
use crate::store::StateStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<G, S>(engine: &TransactionEngine<G, S>, m: &clap::ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    if let Some(("list", sub)) = m.subcommand() {
        let json_flag = sub.get_flag("json");
        let jsonl_flag = sub.get_flag("jsonl");
        let accounts = engine.accounts();
        if maybe_print_json(json_flag, jsonl_flag, &accounts)? {
            return Ok(());
        }
        let data: Vec<Vec<String>> = accounts
            .iter()
            .map(|a| vec![a.id.clone(), a.name.clone(), fmt_money(&a.balance)])
            .collect();
        println!("{}", pretty_table(&["ID", "Name", "Balance"], data));
    }
    Ok(())
}
