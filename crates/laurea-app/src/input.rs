// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Input file parsing.

use laurea_core::CertificateRequest;
use laurea_core::error::{LaureaError, Result};
use serde::Deserialize;

/// One request or a batch of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Input {
    Batch(Vec<CertificateRequest>),
    Single(CertificateRequest),
}

impl Input {
    /// Malformed input is rejected here, before any certificate work starts.
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| {
            LaureaError::Validation(format!(
                "expected a certificate request or a list of them: {e}"
            ))
        })
    }
}
