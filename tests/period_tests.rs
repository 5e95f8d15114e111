// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::{Datelike, Weekday};
use common::day;
use moneytrack::period::{Period, PeriodError, window_for};

#[test]
fn every_window_contains_today_and_is_ordered() {
    let samples = [
        "2024-01-01",
        "2024-02-29",
        "2025-03-15",
        "2025-06-30",
        "2025-12-31",
        "2026-10-17",
    ];
    for s in samples {
        let today = day(s);
        for p in Period::ALL {
            let w = p.window(today);
            assert!(w.start <= w.end, "{} {}", p, s);
            assert!(w.contains(today), "{} {}", p, s);
        }
    }
}

#[test]
fn daily_window_is_a_single_day() {
    let w = Period::Daily.window(day("2025-03-15"));
    assert_eq!(w.start, day("2025-03-15"));
    assert_eq!(w.end, day("2025-03-15"));
    assert_eq!(w.days(), 1);
}

#[test]
fn weekly_window_runs_sunday_to_saturday() {
    // 2025-03-15 is a Saturday
    let w = Period::Weekly.window(day("2025-03-15"));
    assert_eq!(w.start, day("2025-03-09"));
    assert_eq!(w.end, day("2025-03-15"));
    assert_eq!(w.start.weekday(), Weekday::Sun);
    assert_eq!(w.days(), 7);

    // Sunday starts its own week
    let w = Period::Weekly.window(day("2025-03-16"));
    assert_eq!(w.start, day("2025-03-16"));
    assert_eq!(w.end, day("2025-03-22"));
}

#[test]
fn weekly_window_crosses_month_and_year_ends() {
    let w = Period::Weekly.window(day("2025-01-01"));
    assert_eq!(w.start, day("2024-12-29"));
    assert_eq!(w.end, day("2025-01-04"));
}

#[test]
fn monthly_window_ends_on_last_day() {
    let w = Period::Monthly.window(day("2025-03-15"));
    assert_eq!(w.start_str(), "2025-03-01");
    assert_eq!(w.end_str(), "2025-03-31");

    let w = Period::Monthly.window(day("2024-02-10"));
    assert_eq!(w.end, day("2024-02-29"));

    let w = Period::Monthly.window(day("2025-02-10"));
    assert_eq!(w.end, day("2025-02-28"));

    let w = Period::Monthly.window(day("2025-12-31"));
    assert_eq!(w.start, day("2025-12-01"));
    assert_eq!(w.end, day("2025-12-31"));
}

#[test]
fn yearly_window_covers_calendar_year() {
    let w = Period::Yearly.window(day("2024-07-04"));
    assert_eq!(w.start, day("2024-01-01"));
    assert_eq!(w.end, day("2024-12-31"));
    assert_eq!(w.days(), 366);
}

#[test]
fn keywords_resolve_and_unknown_ones_fail() {
    let w = window_for("weekly", day("2025-03-12")).unwrap();
    assert_eq!(w.to_string(), "2025-03-09 to 2025-03-15");
    assert_eq!("MONTHLY".parse::<Period>().unwrap(), Period::Monthly);
    assert_eq!(Period::default(), Period::Monthly);

    let err = window_for("fortnightly", day("2025-03-12")).unwrap_err();
    assert_eq!(err, PeriodError::InvalidPeriod("fortnightly".into()));
}
