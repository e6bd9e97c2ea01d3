// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout composer — lays out a certificate in four fixed phases:
// background, header, body, footer.
//
// Every block sits at a fixed offset from its phase origin. Optional body
// blocks that are absent from the record are skipped; the blocks after them
// keep their own slots and do not move up.

use chrono::{DateTime, Locale, Utc};
use laurea_core::StudentRecord;
use laurea_core::config::Institution;
use laurea_core::error::{LaureaError, Result};
use tracing::{debug, instrument};

use super::canvas::Canvas;
use super::directive::{Align, Directive, FontWeight, TextBlock};
use crate::theme::{Color, Theme};

/// Header origin, from the top of the page.
const HEADER_Y: f32 = 80.0;
/// Body origin, from the top of the page.
const BODY_Y: f32 = 200.0;
/// Footer origin, from the bottom of the page.
const FOOTER_FROM_BOTTOM: f32 = 150.0;
/// Width of each signature block.
const SIGNATURE_WIDTH: f32 = 150.0;

pub const INTRO_LINE: &str = "Certifican a";
pub const COURSE_INTRO_LINE: &str = "Por participar y aprobar el";

/// Stateless composer over a theme and an issuing institution.
#[derive(Debug, Clone, Copy)]
pub struct Composer<'a> {
    theme: &'a Theme,
    institution: &'a Institution,
}

impl<'a> Composer<'a> {
    pub fn new(theme: &'a Theme, institution: &'a Institution) -> Self {
        Self { theme, institution }
    }

    /// Run all four phases in order.
    ///
    /// `certificate_id` is printed in the footer, so it has to be issued
    /// before composition starts.
    #[instrument(skip(self, canvas, record), fields(student = %record.student_name))]
    pub fn compose(
        &self,
        canvas: &mut dyn Canvas,
        record: &StudentRecord,
        certificate_id: &str,
    ) -> Result<()> {
        validate(record)?;
        self.background(canvas)?;
        self.header(canvas)?;
        self.body(canvas, record)?;
        self.footer(canvas, certificate_id)?;
        debug!("certificate composed");
        Ok(())
    }

    // -- Background ----------------------------------------------------------

    pub fn background(&self, canvas: &mut dyn Canvas) -> Result<()> {
        let (w, h) = canvas.size();
        let t = self.theme;

        canvas.draw(Directive::FillRect {
            x: 0.0,
            y: 0.0,
            width: w,
            height: h,
            color: t.background,
        })?;
        canvas.draw(Directive::FillCircle {
            cx: 100.0,
            cy: 100.0,
            radius: 80.0,
            color: t.primary,
            opacity: 0.1,
        })?;
        canvas.draw(Directive::FillCircle {
            cx: w - 100.0,
            cy: h - 100.0,
            radius: 60.0,
            color: t.accent,
            opacity: 0.1,
        })?;
        canvas.draw(Directive::StrokeLine {
            from: (0.0, h * 0.15),
            to: (w, h * 0.15),
            color: t.primary,
            width: 2.0,
        })?;
        canvas.draw(Directive::StrokeLine {
            from: (0.0, h * 0.85),
            to: (w, h * 0.85),
            color: t.accent,
            width: 2.0,
        })
    }

    // -- Header --------------------------------------------------------------

    pub fn header(&self, canvas: &mut dyn Canvas) -> Result<()> {
        let cx = canvas.size().0 / 2.0;
        let t = self.theme;

        canvas.draw(Directive::FillCircle {
            cx: cx - 100.0,
            cy: HEADER_Y + 30.0,
            radius: 25.0,
            color: t.accent,
            opacity: 1.0,
        })?;
        canvas.draw(Directive::Text(TextBlock {
            text: self.institution.emblem_glyph.clone(),
            x: cx - 110.0,
            y: HEADER_Y + 20.0,
            width: 20.0,
            size: 20.0,
            weight: FontWeight::Regular,
            color: t.dark,
            align: Align::Center,
        }))?;
        canvas.draw(Directive::Text(TextBlock {
            text: self.institution.title.clone(),
            x: cx - 50.0,
            y: HEADER_Y + 10.0,
            width: 200.0,
            size: 28.0,
            weight: FontWeight::Bold,
            color: t.white,
            align: Align::Left,
        }))?;
        canvas.draw(Directive::Text(TextBlock {
            text: self.institution.tagline.clone(),
            x: cx - 50.0,
            y: HEADER_Y + 45.0,
            width: 300.0,
            size: 12.0,
            weight: FontWeight::Regular,
            color: t.gray,
            align: Align::Left,
        }))
    }

    // -- Body ----------------------------------------------------------------

    pub fn body(&self, canvas: &mut dyn Canvas, record: &StudentRecord) -> Result<()> {
        let span = Span::of(canvas);
        let cx = canvas.size().0 / 2.0;
        let t = self.theme;
        let y = BODY_Y;

        canvas.draw(span.centered(INTRO_LINE, y, 18.0, FontWeight::Regular, t.gray))?;
        canvas.draw(span.centered(
            &record.student_name.to_uppercase(),
            y + 40.0,
            36.0,
            FontWeight::Bold,
            t.primary,
        ))?;
        canvas.draw(Directive::StrokeLine {
            from: (cx - 150.0, y + 85.0),
            to: (cx + 150.0, y + 85.0),
            color: t.accent,
            width: 2.0,
        })?;
        canvas.draw(span.centered(
            COURSE_INTRO_LINE,
            y + 110.0,
            16.0,
            FontWeight::Regular,
            t.white,
        ))?;
        canvas.draw(span.centered(
            &format!("CURSO DE {}", record.course_name.to_uppercase()),
            y + 140.0,
            32.0,
            FontWeight::Bold,
            t.white,
        ))?;

        if let Some(description) = present(&record.course_description) {
            canvas.draw(span.centered(
                description,
                y + 190.0,
                14.0,
                FontWeight::Regular,
                t.gray,
            ))?;
        }
        if let Some(mention) = present(&record.special_mention) {
            canvas.draw(span.centered(
                mention,
                y + 220.0,
                16.0,
                FontWeight::Bold,
                t.accent,
            ))?;
        }
        if let Some(date) = record.completion_date {
            canvas.draw(span.centered(
                &format!("Completado el {}", format_completion_date(&date)),
                y + 250.0,
                14.0,
                FontWeight::Regular,
                t.gray,
            ))?;
        }
        if let Some(duration) = present(&record.duration) {
            canvas.draw(span.centered(
                &format!("Duración: {duration}"),
                y + 270.0,
                12.0,
                FontWeight::Regular,
                t.gray,
            ))?;
        }
        Ok(())
    }

    // -- Footer --------------------------------------------------------------

    pub fn footer(&self, canvas: &mut dyn Canvas, certificate_id: &str) -> Result<()> {
        let (w, h) = canvas.size();
        let cx = w / 2.0;
        let footer_y = h - FOOTER_FROM_BOTTOM;
        let sign_y = footer_y + 40.0;
        let t = self.theme;
        let span = Span::of(canvas);
        let lefts = [cx - 250.0, cx + 100.0];

        for left in lefts {
            canvas.draw(Directive::StrokeLine {
                from: (left, sign_y),
                to: (left + SIGNATURE_WIDTH, sign_y),
                color: t.gray,
                width: 1.0,
            })?;
        }
        for (left, signatory) in lefts.iter().zip(&self.institution.signatories) {
            canvas.draw(signature_text(
                &signatory.name,
                *left,
                sign_y + 10.0,
                12.0,
                FontWeight::Bold,
                t.white,
            ))?;
        }
        for (left, signatory) in lefts.iter().zip(&self.institution.signatories) {
            canvas.draw(signature_text(
                &signatory.role,
                *left,
                sign_y + 25.0,
                10.0,
                FontWeight::Regular,
                t.gray,
            ))?;
        }

        canvas.draw(span.centered(
            &format!("Certificación ID: {certificate_id}"),
            footer_y + 80.0,
            10.0,
            FontWeight::Regular,
            t.accent,
        ))?;
        canvas.draw(span.centered(
            &format!("Verificar en: {}", self.institution.verify_hint),
            footer_y + 95.0,
            10.0,
            FontWeight::Regular,
            t.gray,
        ))
    }
}

/// Spanish long date, e.g. `7 de marzo de 2025`.
pub fn format_completion_date(date: &DateTime<Utc>) -> String {
    date.format_localized("%-d de %B de %Y", Locale::es_ES).to_string()
}

fn validate(record: &StudentRecord) -> Result<()> {
    if record.student_name.trim().is_empty() {
        return Err(LaureaError::Composition("student name is empty".into()));
    }
    if record.course_name.trim().is_empty() {
        return Err(LaureaError::Composition("course name is empty".into()));
    }
    Ok(())
}

/// Optional text that is present and non-empty. Whitespace still counts as
/// content and gets its block.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Horizontal extent between the side margins.
#[derive(Debug, Clone, Copy)]
struct Span {
    x: f32,
    width: f32,
}

impl Span {
    fn of(canvas: &dyn Canvas) -> Self {
        let margin = canvas.margin();
        Self {
            x: margin,
            width: canvas.size().0 - 2.0 * margin,
        }
    }

    /// A block across the whole span, centred.
    fn centered(
        &self,
        text: &str,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Color,
    ) -> Directive {
        Directive::Text(TextBlock {
            text: text.to_owned(),
            x: self.x,
            y,
            width: self.width,
            size,
            weight,
            color,
            align: Align::Center,
        })
    }
}

fn signature_text(
    text: &str,
    x: f32,
    y: f32,
    size: f32,
    weight: FontWeight,
    color: Color,
) -> Directive {
    Directive::Text(TextBlock {
        text: text.to_owned(),
        x,
        y,
        width: SIGNATURE_WIDTH,
        size,
        weight,
        color,
        align: Align::Center,
    })
}
