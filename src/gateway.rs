// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Contract with the transaction backend and its HTTP implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::models::{NewTransaction, Transaction, TransactionPatch};
use crate::utils::DATE_FORMAT;

const UA: &str = concat!(
    "moneytrack/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/moneytrack)"
);

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Totals computed by the backend for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

#[async_trait]
pub trait TransactionGateway: Send + Sync {
    async fn create(&self, tx: &NewTransaction) -> GatewayResult<Transaction>;

    async fn update(&self, id: &str, patch: &TransactionPatch) -> GatewayResult<Transaction>;

    /// Returns the server's confirmation message.
    async fn delete(&self, id: &str) -> GatewayResult<String>;

    /// Both bounds inclusive.
    async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> GatewayResult<Vec<Transaction>>;

    async fn summary(&self, start: NaiveDate, end: NaiveDate) -> GatewayResult<RemoteSummary>;

    async fn category_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> GatewayResult<BTreeMap<String, Decimal>>;

    /// Spreadsheet (xlsx) report for the range.
    async fn export_report(&self, start: NaiveDate, end: NaiveDate) -> GatewayResult<Vec<u8>>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> GatewayResult<Self> {
        let client = Client::builder().timeout(timeout).user_agent(UA).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> GatewayResult<Self> {
        Self::new(config.api_url.clone(), config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn range_query(start: NaiveDate, end: NaiveDate) -> [(&'static str, String); 2] {
        [
            ("start", start.format(DATE_FORMAT).to_string()),
            ("end", end.format(DATE_FORMAT).to_string()),
        ]
    }

    async fn get_range(&self, path: &str, start: NaiveDate, end: NaiveDate) -> GatewayResult<Response> {
        let resp = self
            .client
            .get(self.url(path))
            .query(&Self::range_query(start, end))
            .send()
            .await?;
        check(resp).await
    }
}

/// Turn a non-2xx response into `GatewayError::Status`, preferring the JSON
/// `message` field over the raw body.
async fn check(resp: Response) -> GatewayResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body.trim().to_string()
            }
        });
    Err(GatewayError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TransactionGateway for HttpGateway {
    async fn create(&self, tx: &NewTransaction) -> GatewayResult<Transaction> {
        let resp = self.client.post(self.url("/")).json(tx).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn update(&self, id: &str, patch: &TransactionPatch) -> GatewayResult<Transaction> {
        let resp = self
            .client
            .put(self.url(&format!("/{}", id)))
            .json(patch)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn delete(&self, id: &str) -> GatewayResult<String> {
        let resp = self
            .client
            .delete(self.url(&format!("/{}", id)))
            .send()
            .await?;
        Ok(check(resp).await?.text().await?)
    }

    async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> GatewayResult<Vec<Transaction>> {
        Ok(self.get_range("/range", start, end).await?.json().await?)
    }

    async fn summary(&self, start: NaiveDate, end: NaiveDate) -> GatewayResult<RemoteSummary> {
        Ok(self.get_range("/summary", start, end).await?.json().await?)
    }

    async fn category_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> GatewayResult<BTreeMap<String, Decimal>> {
        Ok(self
            .get_range("/category-summary", start, end)
            .await?
            .json()
            .await?)
    }

    async fn export_report(&self, start: NaiveDate, end: NaiveDate) -> GatewayResult<Vec<u8>> {
        let bytes = self
            .get_range("/excelReport", start, end)
            .await?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}
