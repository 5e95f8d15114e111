// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Transaction, TransactionType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub category: String,
    pub income: Decimal,
    pub expense: Decimal,
    /// income - expense
    pub total: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    /// Groups in order of first appearance in the input.
    pub categories: Vec<CategoryTotals>,
}

impl Summary {
    pub fn category(&self, id: &str) -> Option<&CategoryTotals> {
        self.categories.iter().find(|c| c.category == id)
    }
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    let mut categories: Vec<CategoryTotals> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for t in transactions {
        match t.r#type {
            TransactionType::Income => income += t.amount,
            TransactionType::Expense => expense += t.amount,
        }

        let Some(cat) = t.category.as_deref() else {
            continue;
        };
        let slot = *index.entry(cat).or_insert_with(|| {
            categories.push(CategoryTotals {
                category: cat.to_string(),
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
                total: Decimal::ZERO,
            });
            categories.len() - 1
        });
        let group = &mut categories[slot];
        match t.r#type {
            TransactionType::Income => group.income += t.amount,
            TransactionType::Expense => group.expense += t.amount,
        }
        group.total = group.income - group.expense;
    }

    Summary {
        income,
        expense,
        balance: income - expense,
        categories,
    }
}
