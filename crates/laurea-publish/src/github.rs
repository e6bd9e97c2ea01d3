// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// GitHub contents-API store.
//
// Each publish is a single `PUT /repos/{owner}/{repo}/contents/{path}` with
// the file base64-encoded in the JSON body. No `sha` is sent, so publishing
// over an existing file is rejected by GitHub (422) and surfaces as a
// publication error.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use laurea_core::config::GitHubConfig;
use laurea_core::error::{LaureaError, Result};
use reqwest::{Client, StatusCode, header};
use serde::Serialize;
use tracing::{info, instrument, warn};
use url::Url;

use crate::store::ContentStore;

/// Request body of the create-or-update-file call.
#[derive(Debug, Serialize)]
struct PutContents<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
}

/// Publishes into one branch of one GitHub repository.
#[derive(Debug, Clone)]
pub struct GitHubStore {
    client: Client,
    api_base: Url,
    web_base: Url,
    config: GitHubConfig,
}

impl GitHubStore {
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let api_base = parse_base("api_base", &config.api_base)?;
        let web_base = parse_base("web_base", &config.web_base)?;
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(|e| LaureaError::Config(format!("http client: {e}")))?;
        if config.token.is_none() {
            warn!("no GitHub token configured; publishing will likely be rejected");
        }
        Ok(Self {
            client,
            api_base,
            web_base,
            config,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("laurea/", env!("CARGO_PKG_VERSION"))
    }

    /// API endpoint for a repository path.
    pub fn contents_url(&self, path: &str) -> Result<Url> {
        let c = &self.config;
        extend(
            &self.api_base,
            ["repos", c.owner.as_str(), c.repo.as_str(), "contents"],
            path,
        )
    }

    /// Public `blob` link for a repository path on the configured branch.
    pub fn locator(&self, path: &str) -> Result<Url> {
        let c = &self.config;
        extend(
            &self.web_base,
            [c.owner.as_str(), c.repo.as_str(), "blob", c.branch.as_str()],
            path,
        )
    }
}

#[async_trait]
impl ContentStore for GitHubStore {
    fn name(&self) -> &str {
        "github"
    }

    #[instrument(skip(self, bytes), fields(bytes_len = bytes.len(), repo = %self.config.repo))]
    async fn publish(&self, bytes: &[u8], path: &str, message: &str) -> Result<String> {
        let url = self.contents_url(path)?;
        let body = PutContents {
            message,
            content: BASE64.encode(bytes),
            branch: &self.config.branch,
        };

        let mut request = self
            .client
            .put(url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .json(&body);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LaureaError::Publication(format!("GitHub request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LaureaError::Publication(describe_failure(status, &text)));
        }

        let locator = self.locator(path)?.to_string();
        info!(%status, %locator, "published to GitHub");
        Ok(locator)
    }
}

fn parse_base(field: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| LaureaError::Config(format!("{field}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(LaureaError::Config(format!("{field}: {raw} cannot be a base URL")));
    }
    Ok(url)
}

/// Append fixed segments and then each `/`-separated part of `path`,
/// percent-encoding as needed.
fn extend<'a>(
    base: &Url,
    fixed: impl IntoIterator<Item = &'a str>,
    path: &str,
) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| LaureaError::Config(format!("{base} cannot be a base URL")))?;
        segments.pop_if_empty();
        segments.extend(fixed);
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
    }
    Ok(url)
}

/// Error text for a non-2xx response, preferring GitHub's `message` field.
fn describe_failure(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_owned());
    if detail.is_empty() {
        format!("GitHub returned {status}")
    } else {
        format!("GitHub returned {status}: {detail}")
    }
}
