// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page canvas — the surface the composer draws onto.

use laurea_core::PageSetup;
use laurea_core::error::{LaureaError, Result};

use super::directive::Directive;

/// A drawing surface of fixed size.
pub trait Canvas {
    /// Page size in points (width, height).
    fn size(&self) -> (f32, f32);

    /// Uniform page margin in points.
    fn margin(&self) -> f32;

    /// Append one directive. Fails with `LaureaError::Composition` when the
    /// directive cannot be drawn.
    fn draw(&mut self, directive: Directive) -> Result<()>;
}

/// A single page that records the directives drawn onto it, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCanvas {
    width: f32,
    height: f32,
    margin: f32,
    directives: Vec<Directive>,
}

impl PageCanvas {
    pub fn new(setup: &PageSetup) -> Self {
        let (width, height) = setup.dimensions_pt();
        Self {
            width,
            height,
            margin: setup.margin_pt,
            directives: Vec::new(),
        }
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn into_directives(self) -> Vec<Directive> {
        self.directives
    }
}

impl Canvas for PageCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn margin(&self) -> f32 {
        self.margin
    }

    fn draw(&mut self, directive: Directive) -> Result<()> {
        if directive.numbers().iter().any(|n| !n.is_finite()) {
            return Err(LaureaError::Composition(format!(
                "non-finite geometry in {directive:?}"
            )));
        }
        match &directive {
            Directive::FillCircle { radius, opacity, .. } => {
                if *radius < 0.0 || !(0.0..=1.0).contains(opacity) {
                    return Err(LaureaError::Composition(format!(
                        "invalid circle radius {radius} / opacity {opacity}"
                    )));
                }
            }
            Directive::Text(block) if block.size <= 0.0 || block.width <= 0.0 => {
                return Err(LaureaError::Composition(format!(
                    "text block {:?} has no room (size {}, width {})",
                    block.text, block.size, block.width
                )));
            }
            _ => {}
        }
        self.directives.push(directive);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn records_in_draw_order() {
        let mut canvas = PageCanvas::new(&PageSetup::default());
        let line = Directive::StrokeLine {
            from: (0.0, 1.0),
            to: (2.0, 1.0),
            color: Theme::SUID.accent,
            width: 2.0,
        };
        let rect = Directive::FillRect {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            color: Theme::SUID.dark,
        };
        canvas.draw(line.clone()).unwrap();
        canvas.draw(rect.clone()).unwrap();
        assert_eq!(canvas.directives(), &[line, rect]);
    }

    #[test]
    fn rejects_nan_geometry() {
        let mut canvas = PageCanvas::new(&PageSetup::default());
        let err = canvas
            .draw(Directive::FillCircle {
                cx: f32::NAN,
                cy: 0.0,
                radius: 1.0,
                color: Theme::SUID.primary,
                opacity: 1.0,
            })
            .unwrap_err();
        assert!(matches!(err, LaureaError::Composition(_)));
        assert!(canvas.directives().is_empty());
    }

    #[test]
    fn rejects_out_of_range_opacity() {
        let mut canvas = PageCanvas::new(&PageSetup::default());
        let result = canvas.draw(Directive::FillCircle {
            cx: 0.0,
            cy: 0.0,
            radius: 1.0,
            color: Theme::SUID.primary,
            opacity: 1.5,
        });
        assert!(result.is_err());
    }
}
