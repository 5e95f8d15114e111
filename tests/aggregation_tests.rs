// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{day, dec, dt, tx};
use moneytrack::filter::{CategoryFilter, DateRange, DivisionFilter, Filters};
use moneytrack::models::Division::{Office, Personal};
use moneytrack::models::TransactionType::{Expense, Income};
use moneytrack::models::{Division, Transaction};
use moneytrack::summary::summarize;
use rust_decimal::Decimal;

fn march() -> Vec<Transaction> {
    vec![
        tx("1", Income, "5000", "salary", Office, "2025-03-01 09:00"),
        tx("2", Expense, "1200", "food", Personal, "2025-03-05 12:00"),
        tx("3", Expense, "800", "food", Office, "2025-03-10 13:30"),
        tx("4", Expense, "300", "fuel", Personal, "2025-03-12 08:15"),
        tx("5", Income, "250", "gift", Personal, "2025-03-20 18:00"),
    ]
}

#[test]
fn totals_and_category_groups() {
    let rows = vec![
        tx("a", Income, "5000", "salary", Office, "2025-03-01 09:00"),
        tx("b", Expense, "2000", "food", Personal, "2025-03-02 09:00"),
    ];
    let s = summarize(&rows);
    assert_eq!(s.income, dec("5000"));
    assert_eq!(s.expense, dec("2000"));
    assert_eq!(s.balance, dec("3000"));

    let food = s.category("food").unwrap();
    assert_eq!(food.expense, dec("2000"));
    assert_eq!(food.income, Decimal::ZERO);
    assert_eq!(food.total, dec("-2000"));
    assert_eq!(s.category("salary").unwrap().total, dec("5000"));
}

#[test]
fn shared_category_nets_income_against_expense() {
    let rows = vec![
        tx("a", Income, "5000", "food", Personal, "2025-03-01 09:00"),
        tx("b", Expense, "2000", "food", Personal, "2025-03-02 09:00"),
    ];
    let s = summarize(&rows);
    assert_eq!(s.balance, dec("3000"));
    assert_eq!(s.categories.len(), 1);
    let food = &s.categories[0];
    assert_eq!(food.category, "food");
    assert_eq!(food.income, dec("5000"));
    assert_eq!(food.expense, dec("2000"));
    assert_eq!(food.total, dec("3000"));
}

#[test]
fn month_range_excludes_previous_month() {
    let rows = vec![
        tx("feb", Expense, "10", "food", Personal, "2025-02-28 23:59"),
        tx("mar", Expense, "20", "food", Personal, "2025-03-15 12:00"),
    ];
    let filters = Filters {
        date_range: Some(DateRange::new(day("2025-03-01"), day("2025-03-31")).unwrap()),
        ..Filters::default()
    };
    let out = filters.apply(&rows);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "mar");
}

#[test]
fn groups_follow_first_appearance() {
    let s = summarize(&march());
    let order: Vec<&str> = s.categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(order, ["salary", "food", "fuel", "gift"]);
    assert_eq!(s.category("food").unwrap().expense, dec("2000"));
}

#[test]
fn groups_reconcile_with_totals() {
    let s = summarize(&march());
    let income: Decimal = s.categories.iter().map(|c| c.income).sum();
    let expense: Decimal = s.categories.iter().map(|c| c.expense).sum();
    assert_eq!(income, s.income);
    assert_eq!(expense, s.expense);
    assert_eq!(s.balance, s.income - s.expense);
}

#[test]
fn uncategorized_rows_count_in_totals_only() {
    let mut rows = march();
    let mut loose = tx("6", Expense, "40", "other", Personal, "2025-03-21 10:00");
    loose.category = None;
    rows.push(loose);
    let s = summarize(&rows);
    assert_eq!(s.expense, dec("2340"));
    let grouped: Decimal = s.categories.iter().map(|c| c.expense).sum();
    assert_eq!(grouped, dec("2300"));
}

#[test]
fn empty_input_is_all_zero() {
    let s = summarize(&[]);
    assert_eq!(s.income, Decimal::ZERO);
    assert_eq!(s.balance, Decimal::ZERO);
    assert!(s.categories.is_empty());
}

#[test]
fn date_range_is_inclusive_on_both_ends() {
    let filters = Filters {
        date_range: Some(DateRange::new(day("2025-03-05"), day("2025-03-12")).unwrap()),
        ..Filters::default()
    };
    let ids: Vec<String> = filters.apply(&march()).into_iter().map(|t| t.id).collect();
    assert_eq!(ids, ["4", "3", "2"]);
}

#[test]
fn reversed_range_is_rejected() {
    assert!(DateRange::new(day("2025-03-12"), day("2025-03-05")).is_err());
    assert!(DateRange::new(day("2025-03-05"), day("2025-03-05")).is_ok());
}

#[test]
fn division_and_category_filters_combine() {
    let filters = Filters {
        division: DivisionFilter::Only(Division::Personal),
        category: CategoryFilter::Only("food".into()),
        date_range: None,
    };
    let out = filters.apply(&march());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "2");
    assert!(filters.is_active());
    assert!(!Filters::default().is_active());
}

#[test]
fn filtering_never_raises_totals() {
    let all = summarize(&march());
    let choices = [
        Filters {
            division: DivisionFilter::Only(Office),
            ..Filters::default()
        },
        Filters {
            category: CategoryFilter::Only("food".into()),
            ..Filters::default()
        },
        Filters {
            category: CategoryFilter::Only("no-such".into()),
            ..Filters::default()
        },
        Filters {
            date_range: Some(DateRange::new(day("2025-03-10"), day("2025-03-31")).unwrap()),
            ..Filters::default()
        },
    ];
    for f in choices {
        let s = summarize(&f.apply(&march()));
        assert!(s.income <= all.income);
        assert!(s.expense <= all.expense);
    }
}

#[test]
fn view_is_newest_first_and_stable_on_ties() {
    let rows = vec![
        tx("x", Expense, "1", "food", Personal, "2025-03-01 10:00"),
        tx("y", Expense, "2", "food", Personal, "2025-03-03 10:00"),
        tx("z", Expense, "3", "food", Personal, "2025-03-01 10:00"),
    ];
    let ids: Vec<String> = Filters::default()
        .apply(&rows)
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, ["y", "x", "z"]);
    assert_eq!(rows[0].date, dt("2025-03-01 10:00"));
}

#[test]
fn filter_keywords_parse() {
    assert_eq!("all".parse::<DivisionFilter>().unwrap(), DivisionFilter::All);
    assert_eq!(
        "office".parse::<DivisionFilter>().unwrap(),
        DivisionFilter::Only(Office)
    );
    assert!("team".parse::<DivisionFilter>().is_err());
    assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
    assert_eq!(
        CategoryFilter::parse("fuel"),
        CategoryFilter::Only("fuel".into())
    );
}
