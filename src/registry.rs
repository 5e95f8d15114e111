// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fixed category and account tables.
//!
//! Lookups return `Option` so that transactions carrying an id outside the
//! registry (older server data, typos) are handled explicitly by callers.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::{Account, Category, TransactionType};

pub const FALLBACK_COLOR: &str = "hsl(220 15% 50%)";

pub static CATEGORIES: &[Category] = &[
    Category { id: "fuel", name: "Fuel", icon: "Fuel", color: "hsl(25 85% 55%)" },
    Category { id: "food", name: "Food", icon: "UtensilsCrossed", color: "hsl(35 90% 50%)" },
    Category { id: "movie", name: "Entertainment", icon: "Film", color: "hsl(280 65% 55%)" },
    Category { id: "shopping", name: "Shopping", icon: "ShoppingBag", color: "hsl(330 70% 55%)" },
    Category { id: "medical", name: "Medical", icon: "Heart", color: "hsl(0 70% 55%)" },
    Category { id: "loan", name: "Loan", icon: "Landmark", color: "hsl(220 70% 55%)" },
    Category { id: "transport", name: "Transport", icon: "Car", color: "hsl(200 65% 50%)" },
    Category { id: "utilities", name: "Utilities", icon: "Zap", color: "hsl(45 90% 50%)" },
    Category { id: "salary", name: "Salary", icon: "Wallet", color: "hsl(152 60% 42%)" },
    Category { id: "investment", name: "Investment", icon: "TrendingUp", color: "hsl(185 60% 40%)" },
    Category { id: "freelance", name: "Freelance", icon: "Briefcase", color: "hsl(260 55% 55%)" },
    Category { id: "gift", name: "Gift", icon: "Gift", color: "hsl(340 75% 55%)" },
    Category { id: "other", name: "Other", icon: "MoreHorizontal", color: FALLBACK_COLOR },
];

/// Categories that only make sense as income.
const INCOME_ONLY: &[&str] = &["salary", "investment", "freelance"];
/// Shared categories that may also be picked for income.
const INCOME_SHARED: &[&str] = &["gift", "other"];

struct AccountSpec {
    id: &'static str,
    name: &'static str,
    color: &'static str,
}

static DEFAULT_ACCOUNTS: &[AccountSpec] = &[
    AccountSpec { id: "cash", name: "Cash", color: "hsl(152 60% 42%)" },
    AccountSpec { id: "bank", name: "Bank Account", color: "hsl(220 70% 55%)" },
    AccountSpec { id: "credit", name: "Credit Card", color: "hsl(12 76% 61%)" },
];

static BY_ID: Lazy<HashMap<&'static str, &'static Category>> =
    Lazy::new(|| CATEGORIES.iter().map(|c| (c.id, c)).collect());

pub fn category(id: &str) -> Option<&'static Category> {
    BY_ID.get(id).copied()
}

pub fn category_name(id: &str) -> Option<&'static str> {
    category(id).map(|c| c.name)
}

pub fn category_color(id: &str) -> &'static str {
    category(id).map(|c| c.color).unwrap_or(FALLBACK_COLOR)
}

pub fn is_eligible(id: &str, kind: TransactionType) -> bool {
    if category(id).is_none() {
        return false;
    }
    match kind {
        TransactionType::Income => INCOME_ONLY.contains(&id) || INCOME_SHARED.contains(&id),
        TransactionType::Expense => !INCOME_ONLY.contains(&id),
    }
}

/// Categories a transaction of the given type may be tagged with, in
/// registry order.
pub fn categories_for(kind: TransactionType) -> impl Iterator<Item = &'static Category> {
    CATEGORIES.iter().filter(move |c| is_eligible(c.id, kind))
}

pub fn default_accounts() -> Vec<Account> {
    DEFAULT_ACCOUNTS
        .iter()
        .map(|a| Account {
            id: a.id.to_string(),
            name: a.name.to_string(),
            balance: Decimal::ZERO,
            color: a.color.to_string(),
        })
        .collect()
}

