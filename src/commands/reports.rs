// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::path::PathBuf;

use crate::TransactionEngine;
use crate::commands::period_from;
use crate::gateway::TransactionGateway;
use crate::store::StateStore;

pub async fn handle<G, S>(engine: &mut TransactionEngine<G, S>, m: &ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    if let Some(("download", sub)) = m.subcommand() {
        download(engine, sub).await?;
    }
    Ok(())
}

/// Fetch the server-generated spreadsheet for the selected period and write
/// it to `--out`, or to `money-report_<start>_to_<end>.xlsx`.
pub async fn download<G, S>(engine: &mut TransactionEngine<G, S>, sub: &ArgMatches) -> Result<PathBuf>
where
    G: TransactionGateway,
    S: StateStore,
{
    engine.select_period(period_from(sub, engine.period())?);
    let report = engine.export_report().await?;
    let out = sub
        .get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(report.file_name()));
    std::fs::write(&out, &report.bytes)
        .with_context(|| format!("Failed to write report to {}", out.display()))?;
    println!(
        "Saved report for {} ({} bytes) to {}",
        report.window,
        report.bytes.len(),
        out.display()
    );
    Ok(out)
}
