// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Laurea Engine — the per-certificate pipeline (identity, composition,
// encoding, publication) and the sequential batch runner on top of it.

pub mod batch;
pub mod pipeline;

pub use pipeline::{ARTIFACT_DIRECTORY, CertificateGenerator};

#[cfg(test)]
mod testing;
