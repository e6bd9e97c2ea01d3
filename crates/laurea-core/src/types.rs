// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Laurea certificate engine.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Points per millimetre (1 pt = 1/72 in, 1 in = 25.4 mm).
const PT_PER_MM: f32 = 72.0 / 25.4;

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height), portrait.
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Paper, orientation and margins of a certificate page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    /// Uniform margin in points. Full-width text blocks span the page
    /// between the side margins.
    pub margin_pt: f32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Landscape,
            margin_pt: 50.0,
        }
    }
}

impl PageSetup {
    /// Page dimensions in points (width, height) after applying orientation.
    pub fn dimensions_pt(&self) -> (f32, f32) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        let (w, h) = (w_mm as f32 * PT_PER_MM, h_mm as f32 * PT_PER_MM);
        match self.orientation {
            Orientation::Portrait => (w.min(h), w.max(h)),
            Orientation::Landscape => (w.max(h), w.min(h)),
        }
    }
}

/// Completion data for one student, as rendered onto a certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub student_name: String,
    pub course_name: String,
    #[serde(default)]
    pub course_description: Option<String>,
    /// Absent (or unparseable upstream) dates omit the date block.
    #[serde(default)]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub instructors: Vec<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub special_mention: Option<String>,
}

impl StudentRecord {
    /// Minimal record with only the two required content fields.
    pub fn new(student_name: impl Into<String>, course_name: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            course_name: course_name.into(),
            course_description: None,
            completion_date: None,
            duration: None,
            instructors: Vec::new(),
            grade: None,
            special_mention: None,
        }
    }
}

pub const DEFAULT_STUDENT_NAME: &str = "Juan Carlos Pérez";
pub const DEFAULT_COURSE_NAME: &str = "Ciberseguridad y Hacking Ético";
pub const DEFAULT_COURSE_DESCRIPTION: &str =
    "Fundamentos de seguridad, pentesting y análisis de vulnerabilidades";
pub const DEFAULT_DURATION: &str = "120 horas académicas";
pub const DEFAULT_INSTRUCTORS: [&str; 2] = ["Christian Van Der Henst S", "John Freddy Vega"];

/// Partial certificate input as received from callers.
///
/// Any field left out is filled from the defaults in [`CertificateRequest::into_record`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    pub student_name: Option<String>,
    pub course_name: Option<String>,
    pub course_description: Option<String>,
    /// ISO-8601 datetime or plain `YYYY-MM-DD`.
    pub completion_date: Option<String>,
    pub duration: Option<String>,
    pub instructors: Option<Vec<String>>,
    pub grade: Option<String>,
    pub special_mention: Option<String>,
}

impl CertificateRequest {
    /// Merge the request over the defaults. Caller-supplied fields win.
    ///
    /// A supplied completion date that does not parse is kept absent rather
    /// than replaced by `now`.
    pub fn into_record(self, now: DateTime<Utc>) -> StudentRecord {
        let completion_date = match self.completion_date {
            Some(raw) => parse_completion_date(&raw),
            None => Some(now),
        };

        StudentRecord {
            student_name: self
                .student_name
                .unwrap_or_else(|| DEFAULT_STUDENT_NAME.to_owned()),
            course_name: self
                .course_name
                .unwrap_or_else(|| DEFAULT_COURSE_NAME.to_owned()),
            course_description: self
                .course_description
                .or_else(|| Some(DEFAULT_COURSE_DESCRIPTION.to_owned())),
            completion_date,
            duration: self.duration.or_else(|| Some(DEFAULT_DURATION.to_owned())),
            instructors: self.instructors.unwrap_or_else(|| {
                DEFAULT_INSTRUCTORS.iter().map(|s| (*s).to_owned()).collect()
            }),
            grade: self.grade,
            special_mention: self.special_mention,
        }
    }
}

/// Parse an RFC 3339 datetime or a bare `YYYY-MM-DD` date (taken as midnight UTC).
pub fn parse_completion_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A finalized, encoded certificate ready for publication.
#[derive(Debug, Clone)]
pub struct EncodedArtifact {
    pub bytes: Vec<u8>,
    pub assigned_name: String,
    pub certificate_id: String,
    /// SHA-256 of `bytes`, lowercase hex.
    pub sha256: String,
}

/// Outcome of publishing one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationResult {
    pub success: bool,
    pub locator: String,
    pub assigned_name: String,
}

/// Outcome of one record within a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub success: bool,
    pub student_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl BatchItemResult {
    pub fn published(student_name: impl Into<String>, result: PublicationResult) -> Self {
        Self {
            success: true,
            student_name: student_name.into(),
            locator: Some(result.locator),
            assigned_name: Some(result.assigned_name),
            error_message: None,
        }
    }

    pub fn failed(student_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            student_name: student_name.into(),
            locator: None,
            assigned_name: None,
            error_message: Some(message.into()),
        }
    }
}
