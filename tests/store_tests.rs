// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::{DateTime, Local, NaiveDateTime};
use common::{dec, tx};
use moneytrack::models::Division::Personal;
use moneytrack::models::Transfer;
use moneytrack::models::TransactionType::Expense;
use moneytrack::registry;
use moneytrack::store::{LocalState, SLOT_KEY, SqliteStore, StateStore};
use tempfile::tempdir;

fn millis(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.3f").unwrap()
}

#[test]
fn empty_store_seeds_default_accounts() {
    let store = SqliteStore::in_memory().unwrap();
    assert!(store.load().unwrap().is_none());
    let state = store.load_or_seed().unwrap();
    assert!(state.transactions.is_empty());
    assert!(state.transfers.is_empty());
    let ids: Vec<&str> = state.accounts.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["cash", "bank", "credit"]);
}

#[test]
fn state_round_trips_with_millisecond_dates() {
    let store = SqliteStore::in_memory().unwrap();
    let mut t = tx("1", Expense, "12.34", "food", Personal, "2025-03-15 10:00");
    t.created_at = millis("2025-03-15T10:00:00.250");
    let mut state = LocalState::seed();
    state.transactions.push(t);
    state.transfers.push(Transfer {
        id: "tr-1".into(),
        from_account_id: "bank".into(),
        to_account_id: "cash".into(),
        amount: dec("40"),
        description: "ATM".into(),
        transaction_date: millis("2025-03-14T18:30:05.007"),
    });
    store.save(&state).unwrap();

    let back = store.load().unwrap().unwrap();
    assert_eq!(back, state);
    let raw = store.raw().unwrap().unwrap();
    assert!(raw.contains("2025-03-15T10:00:00.250"));
}

#[test]
fn on_disk_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("state.sqlite");
    let mut state = LocalState::seed();
    state.accounts[0].balance = dec("75");
    {
        let store = SqliteStore::open(&path).unwrap();
        store.save(&state).unwrap();
    }
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.load_or_seed().unwrap(), state);
}

#[test]
fn unreadable_slot_falls_back_to_seed() {
    let store = SqliteStore::in_memory().unwrap();
    store.put_raw("{not json").unwrap();
    assert!(store.load().is_err());
    assert_eq!(store.load_or_seed().unwrap(), LocalState::seed());
}

#[test]
fn missing_accounts_field_gets_defaults() {
    let store = SqliteStore::in_memory().unwrap();
    store
        .put_raw(
            r#"{"transactions":[{"id":"9","type":"INCOME","amount":"10","category":"gift",
               "division":"PERSONAL","transactionDate":"2025-03-01T09:00:00Z",
               "createdAt":"2025-03-01"}]}"#,
        )
        .unwrap();
    let state = store.load().unwrap().unwrap();
    assert_eq!(state.accounts, registry::default_accounts());
    let t = &state.transactions[0];
    assert_eq!(t.description, "");
    let local = DateTime::parse_from_rfc3339("2025-03-01T09:00:00Z")
        .unwrap()
        .with_timezone(&Local)
        .naive_local();
    assert_eq!(t.date, local);
    assert_eq!(t.created_at, millis("2025-03-01T00:00:00.000"));
}

#[test]
fn slots_are_independent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.sqlite");
    SqliteStore::open(&path)
        .unwrap()
        .save(&LocalState::seed())
        .unwrap();
    let other = SqliteStore::open(&path).unwrap().with_key("scratch");
    assert!(other.load().unwrap().is_none());
    let main = SqliteStore::open(&path).unwrap();
    assert!(main.raw().unwrap().is_some());
    assert_eq!(SLOT_KEY, "money-manager-data");
}
