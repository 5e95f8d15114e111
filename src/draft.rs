// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User submissions, checked before anything reaches the backend.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::EngineError;
use crate::models::{Account, Division, NewTransaction, TransactionPatch, TransactionType};
use crate::registry;

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub r#type: TransactionType,
    pub amount: Option<Decimal>,
    pub description: String,
    pub category: Option<String>,
    pub division: Division,
    /// Defaults to "now" when absent.
    pub date: Option<NaiveDateTime>,
}

impl TransactionDraft {
    pub fn new(r#type: TransactionType, division: Division) -> Self {
        Self {
            r#type,
            amount: None,
            description: String::new(),
            category: None,
            division,
            date: None,
        }
    }

    pub fn validate(&self, now: NaiveDateTime) -> Result<NewTransaction, EngineError> {
        let amount = self
            .amount
            .ok_or_else(|| invalid("amount is required"))?;
        check_amount(amount)?;

        let description = self.description.trim();
        if description.is_empty() {
            return Err(invalid("description is required"));
        }

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| invalid("category is required"))?;
        check_category(category, self.r#type)?;

        Ok(NewTransaction {
            r#type: self.r#type,
            amount,
            description: description.to_string(),
            category: category.to_string(),
            division: self.division,
            transaction_date: self.date.unwrap_or(now),
        })
    }
}

/// Check the fields a patch would overwrite. `stored` is the type and
/// category of the stored transaction, if known. The category that results
/// from the patch must stay eligible for the type that results from it.
pub fn validate_patch(
    patch: &TransactionPatch,
    stored: Option<(TransactionType, Option<&str>)>,
) -> Result<(), EngineError> {
    if patch.is_empty() {
        return Err(invalid("nothing to update"));
    }
    if let Some(amount) = patch.amount {
        check_amount(amount)?;
    }
    if let Some(desc) = &patch.description {
        if desc.trim().is_empty() {
            return Err(invalid("description cannot be empty"));
        }
    }
    if let Some(cat) = &patch.category {
        if cat.trim().is_empty() {
            return Err(invalid("category cannot be empty"));
        }
    }
    if patch.category.is_none() && patch.r#type.is_none() {
        return Ok(());
    }

    let (stored_type, stored_category) = match stored {
        Some((kind, cat)) => (Some(kind), cat),
        None => (None, None),
    };
    let category = patch.category.as_deref().or(stored_category);
    match (patch.r#type.or(stored_type), category) {
        (Some(kind), Some(cat)) => check_category(cat, kind)?,
        (None, Some(cat)) => {
            if registry::category(cat).is_none() {
                return Err(invalid(&format!("unknown category '{}'", cat)));
            }
        }
        (_, None) => {}
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferDraft {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: Option<Decimal>,
    pub description: String,
}

impl TransferDraft {
    /// Returns the amount and the description to record, filling in the
    /// generated "Transfer from X to Y" text when none was given.
    pub fn validate(&self, accounts: &[Account]) -> Result<(Decimal, String), EngineError> {
        let from = find_account(accounts, &self.from_account_id)?;
        let to = find_account(accounts, &self.to_account_id)?;
        if from.id == to.id {
            return Err(invalid("source and destination accounts must differ"));
        }
        let amount = self
            .amount
            .ok_or_else(|| invalid("amount is required"))?;
        check_amount(amount)?;

        let description = match self.description.trim() {
            "" => format!("Transfer from {} to {}", from.name, to.name),
            d => d.to_string(),
        };
        Ok((amount, description))
    }
}

fn find_account<'a>(accounts: &'a [Account], id: &str) -> Result<&'a Account, EngineError> {
    accounts
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| invalid(&format!("unknown account '{}'", id)))
}

fn check_amount(amount: Decimal) -> Result<(), EngineError> {
    if amount <= Decimal::ZERO {
        return Err(invalid("amount must be greater than zero"));
    }
    Ok(())
}

fn check_category(id: &str, kind: TransactionType) -> Result<(), EngineError> {
    if registry::category(id).is_none() {
        return Err(invalid(&format!("unknown category '{}'", id)));
    }
    if !registry::is_eligible(id, kind) {
        return Err(invalid(&format!("category '{}' cannot be used for {}", id, kind)));
    }
    Ok(())
}

fn invalid(reason: &str) -> EngineError {
    EngineError::Validation(reason.to_string())
}
