// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod categories;
pub mod exporter;
pub mod reports;
pub mod summary;
pub mod transactions;
pub mod transfers;

use anyhow::{Result, anyhow};
use clap::ArgMatches;

use crate::TransactionEngine;
use crate::filter::{CategoryFilter, DateRange, DivisionFilter, Filters};
use crate::gateway::TransactionGateway;
use crate::period::Period;
use crate::store::StateStore;
use crate::utils::parse_date;

/// Read `--division/--category/--from/--to`. Subcommands without those args
/// get the default (no filtering).
pub fn filters_from(sub: &ArgMatches) -> Result<Filters> {
    let mut filters = Filters::default();
    if let Some(d) = sub.try_get_one::<String>("division").ok().flatten() {
        filters.division = d.parse::<DivisionFilter>().map_err(|e| anyhow!(e))?;
    }
    if let Some(c) = sub.try_get_one::<String>("category").ok().flatten() {
        filters.category = CategoryFilter::parse(c);
    }
    let from = sub.try_get_one::<String>("from").ok().flatten();
    let to = sub.try_get_one::<String>("to").ok().flatten();
    if let (Some(from), Some(to)) = (from, to) {
        filters.date_range = Some(DateRange::new(parse_date(from)?, parse_date(to)?)?);
    }
    Ok(filters)
}

pub fn period_from(sub: &ArgMatches, fallback: Period) -> Result<Period> {
    match sub.try_get_one::<String>("period").ok().flatten() {
        Some(p) => Ok(p.parse::<Period>()?),
        None => Ok(fallback),
    }
}

/// Fetch the requested period. When the backend cannot be reached the cached
/// transactions stay in place and the caller keeps working with them.
pub async fn load_period<G, S>(engine: &mut TransactionEngine<G, S>, sub: &ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    let period = period_from(sub, engine.period())?;
    match engine.set_period(period).await {
        Ok(_) => Ok(()),
        Err(e) if e.is_remote() => {
            tracing::warn!(error = %e, "using cached transactions");
            eprintln!("Backend unavailable, showing cached data.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Fetch the period and apply the filters given on the command line.
pub async fn load_view<G, S>(engine: &mut TransactionEngine<G, S>, sub: &ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    load_period(engine, sub).await?;
    engine.set_filters(filters_from(sub)?);
    Ok(())
}

