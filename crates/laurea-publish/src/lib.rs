// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Laurea Publish — persisting encoded certificates to a path-addressed
// content store and returning a public locator.  The pipeline only sees the
// `ContentStore` trait; backends are picked from configuration.

pub mod filesystem;
pub mod github;
pub mod store;

pub use filesystem::FsStore;
pub use github::GitHubStore;
pub use store::{ContentStore, from_config};
