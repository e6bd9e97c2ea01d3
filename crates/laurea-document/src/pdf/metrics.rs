// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text metrics from the Helvetica faces printpdf ships as subset TrueType
// fonts. Widths come from the font's horizontal advances, so centring and
// wrapping match what the viewer draws.

use laurea_core::error::{LaureaError, Result};
use printpdf::{BuiltinFont, ParsedFont, PdfWarnMsg};

use crate::layout::directive::FontWeight;

/// Baseline offset below the top of a line, as a fraction of font size.
pub const ASCENT: f32 = 0.718;

/// Distance between consecutive baselines, as a fraction of font size.
pub const LINE_HEIGHT: f32 = 1.16;

/// One parsed face plus the resource name it is registered under.
pub struct Typeface {
    pub builtin: BuiltinFont,
    pub font: ParsedFont,
    units_per_em: f32,
}

impl Typeface {
    pub fn load(builtin: BuiltinFont) -> Result<Self> {
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = builtin.get_subset_font().bytes;
        let font = ParsedFont::from_bytes(&bytes, 0, &mut warnings).ok_or_else(|| {
            LaureaError::Encoding(format!("cannot parse built-in face {}", builtin.get_id()))
        })?;
        let units_per_em = match font.font_metrics.units_per_em {
            0 => 1000.0,
            n => f32::from(n),
        };
        Ok(Self {
            builtin,
            font,
            units_per_em,
        })
    }

    /// Resource name, also written as the PDF `BaseFont`.
    pub fn name(&self) -> &'static str {
        self.builtin.get_id()
    }

    /// Advance width of `c` at 1pt. Characters missing from the face take the
    /// width of `.notdef`.
    fn advance(&self, c: char) -> f32 {
        let glyph = self.font.lookup_glyph_index(c as u32).unwrap_or(0);
        f32::from(self.font.get_horizontal_advance(glyph)) / self.units_per_em
    }

    /// Width of `text` set at `size` points.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.advance(c)).sum::<f32>() * size
    }

    /// Break `text` into lines no wider than `max_width`.
    ///
    /// Splits on existing newlines first, then word-wraps each paragraph. A
    /// word wider than the box is force-broken between characters.
    pub fn wrap(&self, text: &str, max_width: f32, size: f32) -> Vec<String> {
        let fits = |s: &str| self.text_width(s, size) <= max_width;
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current = String::new();

            for word in paragraph.split_whitespace() {
                let candidate = if current.is_empty() {
                    word.to_owned()
                } else {
                    format!("{current} {word}")
                };
                if fits(&candidate) {
                    current = candidate;
                    continue;
                }
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                if fits(word) {
                    current.push_str(word);
                    continue;
                }
                // Force-break the oversized word.
                for c in word.chars() {
                    current.push(c);
                    if !fits(&current) && current.chars().count() > 1 {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(c);
                    }
                }
            }

            lines.push(current);
        }

        lines
    }
}

/// The regular and bold Helvetica faces used for every text block.
pub struct Typefaces {
    regular: Typeface,
    bold: Typeface,
}

impl Typefaces {
    pub fn helvetica() -> Result<Self> {
        Ok(Self {
            regular: Typeface::load(BuiltinFont::Helvetica)?,
            bold: Typeface::load(BuiltinFont::HelveticaBold)?,
        })
    }

    pub fn get(&self, weight: FontWeight) -> &Typeface {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Typeface> {
        [&self.regular, &self.bold].into_iter()
    }
}
