// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use serde_json::json;

use crate::TransactionEngine;
use crate::commands::load_view;
use crate::gateway::TransactionGateway;
use crate::models::Transaction;
use crate::store::StateStore;
use crate::utils::fmt_datetime;

pub async fn handle<G, S>(engine: &mut TransactionEngine<G, S>, m: &ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(engine, sub).await,
        _ => Ok(()),
    }
}

async fn export_transactions<G, S>(
    engine: &mut TransactionEngine<G, S>,
    sub: &ArgMatches,
) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".into());
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    let out = sub
        .get_one::<String>("out")
        .context("--out is required")?;

    load_view(engine, sub).await?;
    let rows = engine.filtered();

    match fmt.as_str() {
        "csv" => write_csv(out, rows)?,
        _ => {
            let items: Vec<_> = rows
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": fmt_datetime(&t.date),
                        "type": t.r#type,
                        "amount": t.amount.to_string(),
                        "category": t.category,
                        "division": t.division,
                        "description": t.description,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Failed to write {}", out))?;
        }
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}

fn write_csv(out: &str, rows: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record([
        "id",
        "date",
        "type",
        "amount",
        "category",
        "division",
        "description",
    ])?;
    for t in rows {
        let date = fmt_datetime(&t.date);
        let amount = t.amount.to_string();
        wtr.write_record([
            t.id.as_str(),
            date.as_str(),
            t.r#type.as_str(),
            amount.as_str(),
            t.category.as_deref().unwrap_or_default(),
            t.division.as_str(),
            t.description.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
