// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDateTime;
use clap::ArgMatches;
use serde::Serialize;

use crate::TransactionEngine;
use crate::commands::{load_period, load_view};
use crate::draft::TransactionDraft;
use crate::gateway::TransactionGateway;
use crate::models::{Division, Transaction, TransactionPatch, TransactionType};
use crate::registry;
use crate::store::StateStore;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub async fn handle<G, S>(engine: &mut TransactionEngine<G, S>, m: &ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    match m.subcommand() {
        Some(("add", sub)) => add(engine, sub).await?,
        Some(("list", sub)) => list(engine, sub).await?,
        Some(("update", sub)) => update(engine, sub).await?,
        Some(("rm", sub)) => remove(engine, sub).await?,
        _ => {}
    }
    Ok(())
}

fn parse_type(s: &str) -> Result<TransactionType> {
    s.parse::<TransactionType>().map_err(|e| anyhow!(e))
}

fn parse_division(s: &str) -> Result<Division> {
    s.parse::<Division>().map_err(|e| anyhow!(e))
}

fn parse_day(s: &str) -> Result<NaiveDateTime> {
    let d = parse_date(s)?;
    d.and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("Invalid date '{}'", s))
}

pub fn draft_from(sub: &ArgMatches) -> Result<TransactionDraft> {
    let kind = parse_type(sub.get_one::<String>("type").map(String::as_str).unwrap_or("expense"))?;
    let division = parse_division(
        sub.get_one::<String>("division")
            .map(String::as_str)
            .unwrap_or("personal"),
    )?;
    let mut draft = TransactionDraft::new(kind, division);
    draft.amount = sub
        .get_one::<String>("amount")
        .map(|s| parse_decimal(s))
        .transpose()?;
    draft.description = sub
        .get_one::<String>("description")
        .cloned()
        .unwrap_or_default();
    draft.category = sub.get_one::<String>("category").cloned();
    draft.date = sub
        .get_one::<String>("date")
        .map(|s| parse_day(s))
        .transpose()?;
    Ok(draft)
}

pub fn patch_from(sub: &ArgMatches) -> Result<TransactionPatch> {
    Ok(TransactionPatch {
        r#type: sub
            .get_one::<String>("type")
            .map(|s| parse_type(s))
            .transpose()?,
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        description: sub.get_one::<String>("description").cloned(),
        category: sub.get_one::<String>("category").cloned(),
        division: sub
            .get_one::<String>("division")
            .map(|s| parse_division(s))
            .transpose()?,
        transaction_date: sub
            .get_one::<String>("date")
            .map(|s| parse_day(s))
            .transpose()?,
    })
}

async fn add<G, S>(engine: &mut TransactionEngine<G, S>, sub: &ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    let draft = draft_from(sub)?;
    let created = engine.create(&draft).await?.into_inner();
    println!(
        "Recorded {} {} on {} ({}, {})",
        created.r#type,
        fmt_money(&created.amount),
        created.date.date(),
        created.category.as_deref().unwrap_or("-"),
        created.division
    );
    load_period(engine, sub).await
}

async fn update<G, S>(engine: &mut TransactionEngine<G, S>, sub: &ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    let id = sub
        .get_one::<String>("id")
        .ok_or_else(|| anyhow!("missing transaction id"))?;
    let patch = patch_from(sub)?;
    // Load first so the edit window can be checked against the stored row.
    load_period(engine, sub).await?;
    let updated = engine.update(id, &patch).await?.into_inner();
    println!("Updated {} ({})", updated.id, fmt_money(&updated.amount));
    load_period(engine, sub).await
}

async fn remove<G, S>(engine: &mut TransactionEngine<G, S>, sub: &ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    let id = sub
        .get_one::<String>("id")
        .ok_or_else(|| anyhow!("missing transaction id"))?;
    load_period(engine, sub).await?;
    let _confirmation = engine.delete(id).await?.into_inner();
    load_period(engine, sub).await
}

async fn list<G, S>(engine: &mut TransactionEngine<G, S>, sub: &ArgMatches) -> Result<()>
where
    G: TransactionGateway,
    S: StateStore,
{
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(engine, sub).await?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.division.clone(),
                    r.description.clone(),
                    if r.editable { "yes".into() } else { "no".into() },
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Amount", "Category", "Division", "Description", "Editable", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub amount: String,
    pub category: String,
    pub division: String,
    pub description: String,
    pub editable: bool,
}

impl TransactionRow {
    fn from_tx(t: &Transaction, editable: bool) -> Self {
        let category = match t.category.as_deref() {
            Some(id) => registry::category_name(id).unwrap_or(id).to_string(),
            None => String::new(),
        };
        TransactionRow {
            id: t.id.clone(),
            date: t.date.date().to_string(),
            r#type: t.r#type.to_string(),
            amount: fmt_money(&t.amount),
            category,
            division: t.division.to_string(),
            description: t.description.clone(),
            editable,
        }
    }
}

/// Fetch the period, apply the command-line filters and return the view,
/// newest first, cut to `--limit`.
pub async fn query_rows<G, S>(
    engine: &mut TransactionEngine<G, S>,
    sub: &ArgMatches,
) -> Result<Vec<TransactionRow>>
where
    G: TransactionGateway,
    S: StateStore,
{
    load_view(engine, sub).await?;
    let limit = sub
        .try_get_one::<usize>("limit")
        .ok()
        .flatten()
        .copied()
        .unwrap_or(usize::MAX);
    Ok(engine
        .filtered()
        .iter()
        .take(limit)
        .map(|t| TransactionRow::from_tx(t, engine.can_edit(t)))
        .collect())
}
