// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — drawing directives, the page canvas, and the composer.

pub mod canvas;
pub mod composer;
pub mod directive;

pub use canvas::{Canvas, PageCanvas};
pub use composer::Composer;
pub use directive::{Align, Directive, FontWeight, TextBlock};
