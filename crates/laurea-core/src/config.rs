// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{LaureaError, Result};
use crate::types::PageSetup;

/// Environment variable holding the GitHub access token.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Engine settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Page geometry for every certificate.
    pub page: PageSetup,
    /// Where finished certificates are published.
    pub store: StoreConfig,
    /// Batch behaviour.
    pub batch: BatchConfig,
    /// Issuing institution printed on the certificate.
    pub institution: Institution,
}

impl AppConfig {
    /// Read configuration from a JSON file. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        let config: Self = serde_json::from_str(&data)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Overlay secrets from the environment.
    pub fn apply_env(&mut self) {
        if let StoreConfig::Github(ref mut github) = self.store {
            if let Ok(token) = std::env::var(GITHUB_TOKEN_ENV) {
                if !token.is_empty() {
                    github.token = Some(token);
                }
            }
        }
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        match &self.store {
            StoreConfig::Github(github) => {
                for (field, value) in [
                    ("owner", &github.owner),
                    ("repo", &github.repo),
                    ("branch", &github.branch),
                    ("api_base", &github.api_base),
                    ("web_base", &github.web_base),
                ] {
                    if value.trim().is_empty() {
                        return Err(LaureaError::Config(format!("github.{field} is empty")));
                    }
                }
            }
            StoreConfig::Filesystem { root } => {
                if root.as_os_str().is_empty() {
                    return Err(LaureaError::Config("filesystem.root is empty".into()));
                }
            }
        }
        if self.batch.item_timeout_secs == Some(0) {
            return Err(LaureaError::Config(
                "batch.item_timeout_secs must be positive".into(),
            ));
        }
        if !(self.page.margin_pt.is_finite() && self.page.margin_pt >= 0.0) {
            return Err(LaureaError::Config("page.margin_pt must be >= 0".into()));
        }
        Ok(())
    }
}

/// Content store backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    Github(GitHubConfig),
    Filesystem { root: PathBuf },
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Github(GitHubConfig::default())
    }
}

/// Repository coordinate for the GitHub contents API.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API root.
    pub api_base: String,
    /// Root used to build public `blob` links.
    pub web_base: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".into(),
            web_base: "https://github.com".into(),
            owner: "carlos-Espinoza-perez".into(),
            repo: "certificate-hackathon-2025".into(),
            branch: "main".into(),
            token: None,
        }
    }
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_base", &self.api_base)
            .field("web_base", &self.web_base)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("branch", &self.branch)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Per-item time limit. `None` waits indefinitely.
    pub item_timeout_secs: Option<u64>,
}

/// A named, role-labelled signature on the certificate footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signatory {
    pub name: String,
    pub role: String,
}

/// Issuer branding. These are constants of the institution, never taken
/// from the student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Institution {
    pub title: String,
    pub tagline: String,
    /// Short glyph drawn inside the header emblem.
    pub emblem_glyph: String,
    /// Left and right signature blocks.
    pub signatories: [Signatory; 2],
    /// Where a reader can verify a certificate ID.
    pub verify_hint: String,
}

impl Default for Institution {
    fn default() -> Self {
        Self {
            title: "SUID ACADEMY".into(),
            tagline: "Academia de Ciberseguridad y Hacking Ético".into(),
            emblem_glyph: "{ }".into(),
            signatories: [
                Signatory {
                    name: "Christian Van Der Henst S".into(),
                    role: "CTO DE SUID ACADEMY".into(),
                },
                Signatory {
                    name: "John Freddy Vega".into(),
                    role: "CEO DE SUID ACADEMY".into(),
                },
            ],
            verify_hint: "suidacademy.com/verify".into(),
        }
    }
}
