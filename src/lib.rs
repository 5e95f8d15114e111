// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod draft;
pub mod engine;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod models;
pub mod period;
pub mod registry;
pub mod store;
pub mod summary;
pub mod utils;

pub use engine::TransactionEngine;
pub use error::EngineError;
