// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Drawing directives. Coordinates are in points with the origin at the
// top-left corner of the page and y growing downward.

use crate::theme::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A text block positioned by the top-left corner of its box.
///
/// Text longer than `width` wraps on word boundaries inside the box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
    pub align: Align,
}

/// One drawing operation on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    FillCircle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
        /// `0.0` transparent to `1.0` opaque.
        opacity: f32,
    },
    StrokeLine {
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        width: f32,
    },
    Text(TextBlock),
}

impl Directive {
    /// The text of a text directive.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(block) => Some(&block.text),
            _ => None,
        }
    }

    /// Every coordinate and extent carried by the directive.
    pub(crate) fn numbers(&self) -> Vec<f32> {
        match self {
            Self::FillRect {
                x,
                y,
                width,
                height,
                ..
            } => vec![*x, *y, *width, *height],
            Self::FillCircle {
                cx,
                cy,
                radius,
                opacity,
                ..
            } => vec![*cx, *cy, *radius, *opacity],
            Self::StrokeLine {
                from, to, width, ..
            } => vec![from.0, from.1, to.0, to.1, *width],
            Self::Text(block) => vec![block.x, block.y, block.width, block.size],
        }
    }
}
