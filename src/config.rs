// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::time::Duration;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Moneytrack", "moneytrack"));

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/transactions";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const ENV_API_URL: &str = "MONEYTRACK_API_URL";
pub const ENV_DB: &str = "MONEYTRACK_DB";
pub const ENV_TIMEOUT: &str = "MONEYTRACK_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub db_path: PathBuf,
    pub timeout: Duration,
}

impl Config {
    /// Resolve from the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(ENV_API_URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let db_path = match lookup(ENV_DB).filter(|v| !v.trim().is_empty()) {
            Some(p) => PathBuf::from(p),
            None => default_db_path()?,
        };

        let timeout_secs = match lookup(ENV_TIMEOUT) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid {} '{}'", ENV_TIMEOUT, raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            api_url,
            db_path,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().join("moneytrack.sqlite"))
}
