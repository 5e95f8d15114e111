// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable mirror of the local state.
//!
//! The whole state is serialized as one JSON document into a single named
//! slot. Dates are written as ISO-8601 strings and come back as chrono values.

use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::models::{Account, Transaction, Transfer};
use crate::registry;

pub const SLOT_KEY: &str = "money-manager-data";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("could not encode state: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("could not prepare storage location: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalState {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub transfers: Vec<Transfer>,
    #[serde(default = "registry::default_accounts")]
    pub accounts: Vec<Account>,
}

impl LocalState {
    /// Empty ledgers and the default account set.
    pub fn seed() -> Self {
        Self {
            transactions: Vec::new(),
            transfers: Vec::new(),
            accounts: registry::default_accounts(),
        }
    }
}

impl Default for LocalState {
    fn default() -> Self {
        Self::seed()
    }
}

/// Persistence port used by the engine.
pub trait StateStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<LocalState>, StoreError>;
    fn save(&self, state: &LocalState) -> Result<(), StoreError>;

    /// Load the saved state, or the seed when the slot is empty or unreadable.
    fn load_or_seed(&self) -> Result<LocalState, StoreError> {
        match self.load() {
            Ok(Some(state)) => Ok(state),
            Ok(None) => {
                tracing::debug!("no saved state, seeding defaults");
                Ok(LocalState::seed())
            }
            Err(StoreError::Serde(e)) => {
                tracing::warn!(error = %e, "saved state is unreadable, seeding defaults");
                Ok(LocalState::seed())
            }
            Err(e) => Err(e),
        }
    }
}

pub struct SqliteStore {
    conn: Connection,
    key: String,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    pub fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        init_schema(&conn)?;
        Ok(Self {
            conn,
            key: SLOT_KEY.to_string(),
        })
    }

    /// Use a slot other than the default one.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Raw slot contents, mostly useful for inspection and tests.
    pub fn raw(&self) -> Result<Option<String>, StoreError> {
        let v = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key=?1",
                params![self.key],
                |r| r.get::<_, String>(0),
            )
            .optional()?;
        Ok(v)
    }

    pub fn put_raw(&self, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO slots(key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
            params![self.key, value, Local::now().naive_local()],
        )?;
        Ok(())
    }
}

impl StateStore for SqliteStore {
    fn load(&self) -> Result<Option<LocalState>, StoreError> {
        match self.raw()? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &LocalState) -> Result<(), StoreError> {
        let raw = serde_json::to_string(state)?;
        self.put_raw(&raw)?;
        tracing::debug!(
            key = %self.key,
            transactions = state.transactions.len(),
            transfers = state.transfers.len(),
            "state saved"
        );
        Ok(())
    }
}

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS slots(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}
