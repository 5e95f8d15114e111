// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The transaction aggregation engine.
//!
//! Owns the loaded transaction set, the local transfer/account ledger and the
//! filter selections. The filtered view and its summary are recomputed
//! eagerly whenever the loaded set or a filter changes.
//!
//! The backend is the source of truth for transactions. Mutations never patch
//! the loaded set; they return [`Invalidated`] and leave the engine stale
//! until the caller refreshes. Fetches are sequenced with [`FetchTicket`]s so
//! that a slow response for an older request cannot overwrite a newer one.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::draft::{TransactionDraft, TransferDraft, validate_patch};
use crate::error::EngineError;
use crate::filter::{CategoryFilter, DateRange, DivisionFilter, Filters};
use crate::gateway::{GatewayError, GatewayResult, RemoteSummary, TransactionGateway};
use crate::models::{Account, Transaction, TransactionPatch, TransactionType, Transfer};
use crate::period::{Period, PeriodWindow};
use crate::store::{LocalState, StateStore};
use crate::summary::{Summary, summarize};

/// Hours after creation during which a transaction may still change.
pub const EDIT_WINDOW_HOURS: i64 = 12;

/// Whole elapsed hours, truncated, must be strictly below the window.
pub fn is_editable(now: NaiveDateTime, created_at: NaiveDateTime) -> bool {
    (now - created_at).num_hours() < EDIT_WINDOW_HOURS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short user-facing message produced by an engine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Handle for one in-flight fetch of the period window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    period: Period,
    window: PeriodWindow,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn window(&self) -> PeriodWindow {
        self.window
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied { count: usize },
    /// A newer fetch was issued after this one; the response was dropped.
    Stale,
}

/// Result of a successful mutation. The loaded set no longer reflects the
/// backend until [`TransactionEngine::refresh`] is called.
#[must_use = "the loaded transactions are stale until refreshed"]
#[derive(Debug, Clone, PartialEq)]
pub struct Invalidated<T> {
    pub value: T,
}

impl<T> Invalidated<T> {
    pub fn into_inner(self) -> T {
        self.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub window: PeriodWindow,
    pub bytes: Vec<u8>,
}

impl Report {
    pub fn file_name(&self) -> String {
        format!(
            "money-report_{}_to_{}.xlsx",
            self.window.start_str(),
            self.window.end_str()
        )
    }
}

pub struct TransactionEngine<G, S> {
    gateway: G,
    store: S,
    clock: Arc<dyn Clock>,
    transactions: Vec<Transaction>,
    transfers: Vec<Transfer>,
    accounts: Vec<Account>,
    period: Period,
    filters: Filters,
    view: Vec<Transaction>,
    summary: Summary,
    issued: u64,
    stale: bool,
    notices: Vec<Notice>,
}

impl<G: TransactionGateway, S: StateStore> TransactionEngine<G, S> {
    /// Hydrate from the store, or seed it when empty. The cached transactions
    /// count as stale until the first successful refresh.
    pub fn init(gateway: G, store: S, clock: Arc<dyn Clock>) -> Result<Self, EngineError> {
        let state = store.load_or_seed()?;
        let mut engine = Self {
            gateway,
            store,
            clock,
            transactions: state.transactions,
            transfers: state.transfers,
            accounts: state.accounts,
            period: Period::default(),
            filters: Filters::default(),
            view: Vec::new(),
            summary: Summary::default(),
            issued: 0,
            stale: true,
            notices: Vec::new(),
        };
        engine.recompute();
        Ok(engine)
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn current_window(&self) -> PeriodWindow {
        self.period.window(self.clock.today())
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Everything loaded for the current period, unfiltered.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The filtered view, newest first.
    pub fn filtered(&self) -> &[Transaction] {
        &self.view
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn can_edit(&self, t: &Transaction) -> bool {
        is_editable(self.clock.now(), t.created_at)
    }

    /// Select a period and fetch its window.
    pub async fn set_period(&mut self, period: Period) -> Result<RefreshOutcome, EngineError> {
        self.select_period(period);
        self.refresh().await
    }

    /// Select a period without fetching. A change of period leaves the
    /// loaded set stale and supersedes fetches for the old window.
    pub fn select_period(&mut self, period: Period) {
        if period != self.period {
            self.period = period;
            self.invalidate();
        }
    }

    /// Mark the loaded set as out of date. Fetches issued before this point
    /// can no longer replace it.
    fn invalidate(&mut self) {
        self.stale = true;
        self.issued += 1;
    }

    pub async fn refresh(&mut self) -> Result<RefreshOutcome, EngineError> {
        let ticket = self.begin_refresh();
        let result = self
            .gateway
            .list_by_date_range(ticket.window.start, ticket.window.end)
            .await;
        self.complete_refresh(ticket, result)
    }

    /// Issue a ticket for the current period window. Only the most recently
    /// issued ticket can replace the loaded set.
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.issued += 1;
        let ticket = FetchTicket {
            seq: self.issued,
            period: self.period,
            window: self.current_window(),
        };
        debug!(seq = ticket.seq, period = %ticket.period, window = %ticket.window, "fetch issued");
        ticket
    }

    pub fn complete_refresh(
        &mut self,
        ticket: FetchTicket,
        result: GatewayResult<Vec<Transaction>>,
    ) -> Result<RefreshOutcome, EngineError> {
        if ticket.seq != self.issued {
            warn!(
                seq = ticket.seq,
                latest = self.issued,
                "discarding response for superseded fetch"
            );
            return Ok(RefreshOutcome::Stale);
        }
        match result {
            Ok(list) => {
                let count = list.len();
                self.transactions = list;
                self.stale = false;
                self.recompute();
                self.persist_quietly();
                info!(count, window = %ticket.window, "transactions loaded");
                Ok(RefreshOutcome::Applied { count })
            }
            Err(e) => {
                self.stale = true;
                Err(self.remote_failure("Failed to load display data", e))
            }
        }
    }

    pub fn set_division_filter(&mut self, division: DivisionFilter) {
        self.filters.division = division;
        self.recompute();
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        self.filters.category = category;
        self.recompute();
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.filters.date_range = range;
        self.recompute();
    }

    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(Filters::default());
    }

    fn recompute(&mut self) {
        self.view = self.filters.apply(&self.transactions);
        self.summary = summarize(&self.view);
        debug!(
            loaded = self.transactions.len(),
            shown = self.view.len(),
            groups = self.summary.categories.len(),
            "derived views recomputed"
        );
    }

    pub async fn create(
        &mut self,
        draft: &TransactionDraft,
    ) -> Result<Invalidated<Transaction>, EngineError> {
        let tx = draft.validate(self.clock.now())?;
        let result = self.gateway.create(&tx).await;
        match result {
            Ok(created) => {
                info!(id = %created.id, "transaction created");
                self.invalidate();
                self.notices
                    .push(Notice::success("Transaction added successfully"));
                Ok(Invalidated { value: created })
            }
            Err(e) => Err(self.remote_failure("Failed to add transaction", e)),
        }
    }

    pub async fn update(
        &mut self,
        id: &str,
        patch: &TransactionPatch,
    ) -> Result<Invalidated<Transaction>, EngineError> {
        let current = self.loaded_editable(id)?;
        validate_patch(patch, current.as_ref().map(|(kind, cat)| (*kind, cat.as_deref())))?;
        let result = self.gateway.update(id, patch).await;
        match result {
            Ok(updated) => {
                info!(id, "transaction updated");
                self.invalidate();
                self.notices
                    .push(Notice::success("Transaction updated successfully"));
                Ok(Invalidated { value: updated })
            }
            Err(e) => Err(self.remote_failure("Failed to update transaction", e)),
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<Invalidated<String>, EngineError> {
        self.loaded_editable(id)?;
        let result = self.gateway.delete(id).await;
        match result {
            Ok(message) => {
                info!(id, "transaction deleted");
                self.invalidate();
                let text = if message.trim().is_empty() {
                    "Transaction deleted successfully".to_string()
                } else {
                    message.trim().to_string()
                };
                self.notices.push(Notice::success(text));
                Ok(Invalidated { value: message })
            }
            Err(e) => Err(self.remote_failure("Failed to delete transaction", e)),
        }
    }

    /// Refuses changes to a loaded transaction whose edit window has closed.
    /// Returns its stored type and category so patches can be checked
    /// against them.
    fn loaded_editable(
        &mut self,
        id: &str,
    ) -> Result<Option<(TransactionType, Option<String>)>, EngineError> {
        let Some((kind, category, created_at)) = self
            .transactions
            .iter()
            .find(|t| t.id == id)
            .map(|t| (t.r#type, t.category.clone(), t.created_at))
        else {
            return Ok(None);
        };
        if !is_editable(self.clock.now(), created_at) {
            self.notices.push(Notice::error(format!(
                "Transaction can only be changed within {} hours of creation",
                EDIT_WINDOW_HOURS
            )));
            return Err(EngineError::EditWindowClosed(id.to_string()));
        }
        Ok(Some((kind, category)))
    }

    fn remote_failure(&mut self, what: &str, e: GatewayError) -> EngineError {
        warn!(error = %e, "{}", what);
        let message = match &e {
            GatewayError::Status { message, .. } => format!("{}: {}", what, message),
            GatewayError::Request(_) => what.to_string(),
        };
        self.notices.push(Notice::error(message));
        EngineError::RemoteUnavailable(e)
    }

    /// Move money between two tracked accounts. Transfers live only in the
    /// local ledger and never count as income or expense.
    pub fn record_transfer(&mut self, draft: &TransferDraft) -> Result<Transfer, EngineError> {
        let (amount, description) = draft.validate(&self.accounts)?;
        let transfer = Transfer {
            id: Uuid::new_v4().to_string(),
            from_account_id: draft.from_account_id.clone(),
            to_account_id: draft.to_account_id.clone(),
            amount,
            description,
            transaction_date: self.clock.now(),
        };

        let mut next = self.snapshot();
        apply_transfer(&mut next.accounts, &transfer, amount);
        next.transfers.push(transfer.clone());
        self.store.save(&next)?;

        self.accounts = next.accounts;
        self.transfers = next.transfers;
        info!(id = %transfer.id, from = %transfer.from_account_id, to = %transfer.to_account_id, "transfer recorded");
        self.notices
            .push(Notice::success("Transfer added successfully"));
        Ok(transfer)
    }

    pub async fn remote_summary(&mut self) -> Result<RemoteSummary, EngineError> {
        let w = self.current_window();
        let result = self.gateway.summary(w.start, w.end).await;
        match result {
            Ok(s) => Ok(s),
            Err(e) => Err(self.remote_failure("Failed to load summary", e)),
        }
    }

    pub async fn remote_category_summary(
        &mut self,
    ) -> Result<BTreeMap<String, Decimal>, EngineError> {
        let w = self.current_window();
        let result = self.gateway.category_summary(w.start, w.end).await;
        match result {
            Ok(s) => Ok(s),
            Err(e) => Err(self.remote_failure("Failed to load category summary", e)),
        }
    }

    pub async fn export_report(&mut self) -> Result<Report, EngineError> {
        let window = self.current_window();
        let result = self.gateway.export_report(window.start, window.end).await;
        match result {
            Ok(bytes) => {
                info!(bytes = bytes.len(), %window, "report downloaded");
                Ok(Report { window, bytes })
            }
            Err(e) => Err(self.remote_failure("Failed to download report", e)),
        }
    }

    pub fn snapshot(&self) -> LocalState {
        LocalState {
            transactions: self.transactions.clone(),
            transfers: self.transfers.clone(),
            accounts: self.accounts.clone(),
        }
    }

    fn persist_quietly(&self) {
        if let Err(e) = self.store.save(&self.snapshot()) {
            warn!(error = %e, "could not update local mirror");
        }
    }
}

fn apply_transfer(accounts: &mut [Account], transfer: &Transfer, amount: Decimal) {
    for a in accounts.iter_mut() {
        if a.id == transfer.from_account_id {
            a.balance -= amount;
        } else if a.id == transfer.to_account_id {
            a.balance += amount;
        }
    }
}
