// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Laurea — Core types, error definitions, configuration and certificate
// identity shared across all crates.

pub mod config;
pub mod error;
pub mod identity;
pub mod types;

pub use config::AppConfig;
pub use error::LaureaError;
pub use identity::{Clock, Identity, RandomSource, SystemClock, UuidRandom};
pub use types::*;
