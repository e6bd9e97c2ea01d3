// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Colour theme of the certificate.

use serde::{Deserialize, Serialize};

/// An sRGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Build from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    /// Channels scaled to `0.0..=1.0`.
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

/// Semantic colour roles used by every layout phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Full-page base fill.
    pub background: Color,
    pub primary: Color,
    pub secondary: Color,
    pub dark: Color,
    pub accent: Color,
    pub white: Color,
    pub black: Color,
    pub gray: Color,
}

impl Theme {
    /// The academy palette: violet and teal on deep navy.
    pub const SUID: Theme = Theme {
        background: Color::hex(0x1a1a2e),
        primary: Color::hex(0xA855F7),
        secondary: Color::hex(0x2D1B69),
        dark: Color::hex(0x0B1739),
        accent: Color::hex(0x1DE9B6),
        white: Color::hex(0xFFFFFF),
        black: Color::hex(0x000000),
        gray: Color::hex(0x6B7280),
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::SUID
    }
}
