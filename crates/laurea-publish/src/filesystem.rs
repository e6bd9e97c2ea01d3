// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local filesystem store. Writes each artifact under a root directory and
// returns a `file://` locator. Handy for offline runs and for mounting an
// object-storage bucket as a directory.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use laurea_core::error::{LaureaError, Result};
use tracing::{info, instrument};
use url::Url;

use crate::store::ContentStore;

#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a store path under the root, refusing anything that would
    /// escape it.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if path.is_empty() || escapes {
            return Err(LaureaError::Publication(format!(
                "refusing to write outside the store: {path:?}"
            )));
        }
        let root = std::path::absolute(&self.root)?;
        Ok(root.join(relative))
    }
}

#[async_trait]
impl ContentStore for FsStore {
    fn name(&self) -> &str {
        "filesystem"
    }

    #[instrument(skip(self, bytes), fields(bytes_len = bytes.len(), root = %self.root.display()))]
    async fn publish(&self, bytes: &[u8], path: &str, message: &str) -> Result<String> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                LaureaError::Publication(format!("create {}: {e}", parent.display()))
            })?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| LaureaError::Publication(format!("write {}: {e}", target.display())))?;

        let locator = Url::from_file_path(&target)
            .map_err(|()| {
                LaureaError::Publication(format!("no file URL for {}", target.display()))
            })?
            .to_string();
        info!(%locator, message, "published to filesystem");
        Ok(locator)
    }
}
