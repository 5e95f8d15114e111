// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::models::{Category, TransactionType};
use crate::registry::{self, CATEGORIES};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let json_flag = sub.get_flag("json");
        let jsonl_flag = sub.get_flag("jsonl");
        let kind = sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TransactionType>().map_err(|e| anyhow!(e)))
            .transpose()?;
        let list = list_for(kind);
        if maybe_print_json(json_flag, jsonl_flag, &list)? {
            return Ok(());
        }
        let data: Vec<Vec<String>> = list
            .iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.name.to_string(),
                    c.icon.to_string(),
                    c.color.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Name", "Icon", "Color"], data));
    }
    Ok(())
}

/// Categories selectable for `kind`, or the whole registry.
pub fn list_for(kind: Option<TransactionType>) -> Vec<&'static Category> {
    match kind {
        Some(k) => registry::categories_for(k).collect(),
        None => CATEGORIES.iter().collect(),
    }
}
