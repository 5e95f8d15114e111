// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use moneytrack::TransactionEngine;
use moneytrack::clock::FixedClock;
use moneytrack::gateway::{GatewayError, GatewayResult, RemoteSummary, TransactionGateway};
use moneytrack::models::{
    Division, NewTransaction, Transaction, TransactionPatch, TransactionType,
};
use moneytrack::store::SqliteStore;
use moneytrack::summary::summarize;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

pub fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn tx(
    id: &str,
    kind: TransactionType,
    amount: &str,
    category: &str,
    division: Division,
    date: &str,
) -> Transaction {
    let at = dt(date);
    Transaction {
        id: id.to_string(),
        r#type: kind,
        amount: dec(amount),
        description: format!("{} {}", category, id),
        category: Some(category.to_string()),
        division,
        date: at,
        created_at: at,
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub create: usize,
    pub update: usize,
    pub delete: usize,
    pub list: usize,
    pub summary: usize,
    pub report: usize,
}

#[derive(Default)]
struct FakeState {
    rows: Vec<Transaction>,
    fail: bool,
    calls: Calls,
    next_id: u64,
    created_at: Option<NaiveDateTime>,
}

/// In-memory backend. Filters `/range` by logical date like the real server.
#[derive(Default)]
pub struct FakeGateway {
    state: Mutex<FakeState>,
}

impl FakeGateway {
    pub fn with_rows(rows: Vec<Transaction>) -> Self {
        let gw = Self::default();
        gw.state.lock().unwrap().rows = rows;
        gw
    }

    pub fn set_failing(&self, fail: bool) {
        self.state.lock().unwrap().fail = fail;
    }

    pub fn set_rows(&self, rows: Vec<Transaction>) {
        self.state.lock().unwrap().rows = rows;
    }

    /// Server-side creation timestamp for new rows.
    pub fn stamp_created_at(&self, at: NaiveDateTime) {
        self.state.lock().unwrap().created_at = Some(at);
    }

    pub fn rows(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().rows.clone()
    }

    pub fn calls(&self) -> Calls {
        self.state.lock().unwrap().calls
    }

    fn outage() -> GatewayError {
        GatewayError::Status {
            status: 503,
            message: "backend down".into(),
        }
    }
}

#[async_trait]
impl TransactionGateway for FakeGateway {
    async fn create(&self, new: &NewTransaction) -> GatewayResult<Transaction> {
        let mut s = self.state.lock().unwrap();
        s.calls.create += 1;
        if s.fail {
            return Err(Self::outage());
        }
        s.next_id += 1;
        let created = Transaction {
            id: format!("srv-{}", s.next_id),
            r#type: new.r#type,
            amount: new.amount,
            description: new.description.clone(),
            category: Some(new.category.clone()),
            division: new.division,
            date: new.transaction_date,
            created_at: s.created_at.unwrap_or(new.transaction_date),
        };
        s.rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &TransactionPatch) -> GatewayResult<Transaction> {
        let mut s = self.state.lock().unwrap();
        s.calls.update += 1;
        if s.fail {
            return Err(Self::outage());
        }
        let row = s
            .rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(GatewayError::Status {
                status: 404,
                message: "not found".into(),
            })?;
        if let Some(k) = patch.r#type {
            row.r#type = k;
        }
        if let Some(a) = patch.amount {
            row.amount = a;
        }
        if let Some(d) = &patch.description {
            row.description = d.clone();
        }
        if let Some(c) = &patch.category {
            row.category = Some(c.clone());
        }
        if let Some(d) = patch.division {
            row.division = d;
        }
        if let Some(d) = patch.transaction_date {
            row.date = d;
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> GatewayResult<String> {
        let mut s = self.state.lock().unwrap();
        s.calls.delete += 1;
        if s.fail {
            return Err(Self::outage());
        }
        s.rows.retain(|t| t.id != id);
        Ok("Transaction deleted".into())
    }

    async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> GatewayResult<Vec<Transaction>> {
        let mut s = self.state.lock().unwrap();
        s.calls.list += 1;
        if s.fail {
            return Err(Self::outage());
        }
        Ok(s
            .rows
            .iter()
            .filter(|t| t.date.date() >= start && t.date.date() <= end)
            .cloned()
            .collect())
    }

    async fn summary(&self, start: NaiveDate, end: NaiveDate) -> GatewayResult<RemoteSummary> {
        let rows = self.list_by_date_range(start, end).await?;
        let mut s = self.state.lock().unwrap();
        s.calls.summary += 1;
        let sum = summarize(&rows);
        Ok(RemoteSummary {
            total_income: sum.income,
            total_expense: sum.expense,
            balance: sum.balance,
        })
    }

    async fn category_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> GatewayResult<BTreeMap<String, Decimal>> {
        let rows = self.list_by_date_range(start, end).await?;
        Ok(summarize(&rows)
            .categories
            .into_iter()
            .map(|c| (c.category, c.income + c.expense))
            .collect())
    }

    async fn export_report(&self, start: NaiveDate, end: NaiveDate) -> GatewayResult<Vec<u8>> {
        let mut s = self.state.lock().unwrap();
        s.calls.report += 1;
        if s.fail {
            return Err(Self::outage());
        }
        Ok(format!("report {} {}", start, end).into_bytes())
    }
}

pub type TestEngine = TransactionEngine<FakeGateway, SqliteStore>;

pub fn engine_at(now: &str, rows: Vec<Transaction>) -> (TestEngine, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(dt(now)));
    let engine = TransactionEngine::init(
        FakeGateway::with_rows(rows),
        SqliteStore::in_memory().unwrap(),
        clock.clone(),
    )
    .unwrap();
    (engine, clock)
}
