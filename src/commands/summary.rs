// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use clap::ArgMatches;
use serde_json::json;

use crate::TransactionEngine;
use crate::commands::{load_view, period_from};
use crate::gateway::TransactionGateway;
use crate::registry;
use crate::store::StateStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub async fn handle<G, S>(engine: &mut TransactionEngine<G, S>, sub: &ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    if sub.get_flag("remote") {
        return remote(engine, sub).await;
    }
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    load_view(engine, sub).await?;
    let window = engine.current_window();
    let summary = engine.summary();

    let payload = json!({
        "period": engine.period(),
        "start": window.start_str(),
        "end": window.end_str(),
        "summary": summary,
    });
    if maybe_print_json(json_flag, jsonl_flag, &payload)? {
        return Ok(());
    }

    println!("{} ({})", engine.period(), window);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                fmt_money(&summary.income),
                fmt_money(&summary.expense),
                fmt_money(&summary.balance),
            ]],
        )
    );

    let rows: Vec<Vec<String>> = summary
        .categories
        .iter()
        .map(|c| {
            vec![
                registry::category_name(&c.category)
                    .unwrap_or(c.category.as_str())
                    .to_string(),
                fmt_money(&c.income),
                fmt_money(&c.expense),
                fmt_money(&c.total),
                registry::category_color(&c.category).to_string(),
            ]
        })
        .collect();
    if !rows.is_empty() {
        println!(
            "{}",
            pretty_table(&["Category", "Income", "Expense", "Total", "Color"], rows)
        );
    }
    Ok(())
}

async fn remote<G, S>(engine: &mut TransactionEngine<G, S>, sub: &ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    engine.select_period(period_from(sub, engine.period())?);
    let totals = engine.remote_summary().await?;
    let by_category = engine.remote_category_summary().await?;

    let payload = json!({ "summary": totals, "categories": by_category });
    if maybe_print_json(json_flag, jsonl_flag, &payload)? {
        return Ok(());
    }
    println!("{} ({}, server totals)", engine.period(), engine.current_window());
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                fmt_money(&totals.total_income),
                fmt_money(&totals.total_expense),
                fmt_money(&totals.balance),
            ]],
        )
    );
    let rows: Vec<Vec<String>> = by_category
        .iter()
        .map(|(cat, amt)| vec![cat.clone(), fmt_money(amt)])
        .collect();
    println!("{}", pretty_table(&["Category", "Amount"], rows));
    Ok(())
}
