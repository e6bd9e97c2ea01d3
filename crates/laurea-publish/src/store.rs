// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The content store capability.

use std::sync::Arc;

use async_trait::async_trait;
use laurea_core::config::StoreConfig;
use laurea_core::error::Result;

use crate::filesystem::FsStore;
use crate::github::GitHubStore;

/// A remote, path-addressed repository for published certificates.
///
/// One call, one attempt: implementations do not retry. Publishing twice to
/// the same path overwrites or fails, depending on the backend.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Store `bytes` at `path` with a commit-style `message` and return the
    /// public locator of the stored object.
    async fn publish(&self, bytes: &[u8], path: &str, message: &str) -> Result<String>;
}

/// Build the backend selected in configuration.
pub fn from_config(config: &StoreConfig) -> Result<Arc<dyn ContentStore>> {
    Ok(match config {
        StoreConfig::Github(github) => Arc::new(GitHubStore::new(github.clone())?),
        StoreConfig::Filesystem { root } => Arc::new(FsStore::new(root.clone())),
    })
}
