// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — turning a composed page canvas into PDF bytes.

pub mod encoder;
pub mod metrics;

pub use encoder::PdfEncoder;
