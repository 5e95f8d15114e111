// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::period::PeriodError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Period(#[from] PeriodError),

    /// The backend could not be reached or refused the request. Local state
    /// is left as it was.
    #[error("remote unavailable: {0}")]
    RemoteUnavailable(#[from] GatewayError),

    /// Rejected before anything was sent to the backend.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("transaction {0} is past its edit window")]
    EditWindowClosed(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    pub fn is_remote(&self) -> bool {
        matches!(self, EngineError::RemoteUnavailable(_))
    }
}
