// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use moneytrack::clock::SystemClock;
use moneytrack::config::Config;
use moneytrack::gateway::HttpGateway;
use moneytrack::store::SqliteStore;
use moneytrack::utils::print_notices;
use moneytrack::{TransactionEngine, cli, commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli::build_cli().get_matches();

    let config = Config::from_env()?;
    let gateway = HttpGateway::from_config(&config).context("Failed to build HTTP client")?;
    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("Failed to open {}", config.db_path.display()))?;
    let mut engine = TransactionEngine::init(gateway, store, Arc::new(SystemClock))?;

    let outcome = match matches.subcommand() {
        Some(("init", _)) => {
            println!("State store ready at {}", config.db_path.display());
            println!("Backend: {}", engine.gateway().base_url());
            Ok(())
        }
        Some(("summary", sub)) => commands::summary::handle(&mut engine, sub).await,
        Some(("tx", sub)) => commands::transactions::handle(&mut engine, sub).await,
        Some(("transfer", sub)) => commands::transfers::handle(&mut engine, sub),
        Some(("account", sub)) => commands::accounts::handle(&engine, sub),
        Some(("category", sub)) => commands::categories::handle(sub),
        Some(("report", sub)) => commands::reports::handle(&mut engine, sub).await,
        Some(("export", sub)) => commands::exporter::handle(&mut engine, sub).await,
        _ => {
            cli::build_cli().print_help()?;
            println!();
            Ok(())
        }
    };
    print_notices(engine.drain_notices());
    outcome
}
