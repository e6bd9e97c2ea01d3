// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// laurea-document — Certificate layout and encoding.
//
// The layout composer turns a theme, an institution and a student record into
// an ordered list of drawing directives on a page canvas. The PDF encoder
// turns that canvas into a finished single-page PDF byte buffer.

pub mod integrity;
pub mod layout;
pub mod pdf;
pub mod theme;

// Re-export the primary structs so callers can use `laurea_document::Composer` etc.
pub use layout::canvas::{Canvas, PageCanvas};
pub use layout::composer::Composer;
pub use layout::directive::Directive;
pub use pdf::encoder::PdfEncoder;
pub use theme::Theme;
