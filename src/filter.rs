// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::Serialize;
use std::str::FromStr;

use crate::error::EngineError;
use crate::models::{Division, Transaction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum DivisionFilter {
    #[default]
    All,
    Only(Division),
}

impl FromStr for DivisionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(DivisionFilter::All);
        }
        s.parse::<Division>().map(DivisionFilter::Only)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        }
    }
}

/// Inclusive calendar range, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, EngineError> {
        if from > to {
            return Err(EngineError::Validation(format!(
                "date range starts after it ends ({} > {})",
                from, to
            )));
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
    pub division: DivisionFilter,
    pub category: CategoryFilter,
    pub date_range: Option<DateRange>,
}

impl Filters {
    pub fn is_active(&self) -> bool {
        self != &Filters::default()
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        if let Some(range) = &self.date_range {
            if !range.contains(t.date.date()) {
                return false;
            }
        }
        if let DivisionFilter::Only(d) = self.division {
            if t.division != d {
                return false;
            }
        }
        if let CategoryFilter::Only(c) = &self.category {
            if t.category.as_deref() != Some(c.as_str()) {
                return false;
            }
        }
        true
    }

    /// Matching transactions, newest logical date first. Equal dates keep
    /// their input order.
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let mut out: Vec<Transaction> = transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }
}
