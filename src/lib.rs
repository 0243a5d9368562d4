// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod poster;
pub mod query;
pub mod settings;
pub mod stats;
pub mod utils;
pub mod wallet;
pub mod commands;

pub use error::{LedgerError, Result};
pub use wallet::{Change, Wallet};
