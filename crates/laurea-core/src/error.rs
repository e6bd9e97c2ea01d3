// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Laurea.

use thiserror::Error;

/// Top-level error type for all Laurea operations.
#[derive(Debug, Error)]
pub enum LaureaError {
    // -- Pipeline stages --
    #[error("composition failed: {0}")]
    Composition(String),

    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("publication failed: {0}")]
    Publication(String),

    /// A caller-imposed time limit ran out.
    #[error("{0}")]
    Timeout(String),

    // -- Input / setup --
    /// Caller input that is not a certificate request at all.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LaureaError {
    /// The underlying failure message, without the stage prefix.
    ///
    /// This is what batch results record for a failed item.
    pub fn message(&self) -> String {
        match self {
            Self::Composition(msg)
            | Self::Encoding(msg)
            | Self::Publication(msg)
            | Self::Timeout(msg)
            | Self::Validation(msg)
            | Self::Config(msg) => msg.clone(),
            Self::Io(err) => err.to_string(),
            Self::Serialization(err) => err.to_string(),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LaureaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_strips_stage_prefix() {
        let err = LaureaError::Publication("remote returned 422".into());
        assert_eq!(err.to_string(), "publication failed: remote returned 422");
        assert_eq!(err.message(), "remote returned 422");
    }

    #[test]
    fn io_errors_keep_their_own_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = LaureaError::from(io);
        assert_eq!(err.message(), "no such file");
    }
}
