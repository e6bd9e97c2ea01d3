// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF encoder — serialise a composed page canvas with `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: a page is a `Vec<Op>` and the whole
// document is serialised in one `PdfDocument::save()` call, so encoding is a
// plain function from directives to an owned byte buffer.

use std::collections::BTreeMap;

use laurea_core::error::{LaureaError, Result};
use printpdf::{
    Color, ExtendedGraphicsState, ExtendedGraphicsStateId, FontId, Line, LinePoint, Mm, Op,
    PaintMode, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Polygon, PolygonRing, Pt,
    Rgb, TextItem, WindingOrder,
};
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

use super::metrics::{ASCENT, LINE_HEIGHT, Typefaces};
use crate::layout::canvas::{Canvas, PageCanvas};
use crate::layout::directive::{Align, Directive, TextBlock};
use crate::theme;

/// Segments used to approximate a circle outline.
const CIRCLE_SEGMENTS: usize = 72;

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Trailer file identifier as written by the serialiser: two 32-byte
/// literal strings.
const ID_MARKER: &[u8] = b"/ID[(";
const ID_LEN: usize = 32;

/// Encodes one composed page into a finished PDF byte buffer.
///
/// Text is set in Helvetica embedded as a TrueType subset, so every
/// character of the page (accents included) is written as a glyph ID.
/// Resource names and the file identifier are derived from the page itself:
/// the same page always encodes to the same bytes.
#[derive(Debug, Clone)]
pub struct PdfEncoder {
    /// Title metadata embedded in the PDF /Info dictionary.
    title: String,
}

impl Default for PdfEncoder {
    fn default() -> Self {
        Self::new("Certificado")
    }
}

impl PdfEncoder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Serialise the page. Returns the complete document bytes.
    #[instrument(skip(self, page), fields(directives = page.directives().len()))]
    pub fn encode(&self, page: &PageCanvas) -> Result<Vec<u8>> {
        let (width, height) = page.size();
        let faces = Typefaces::helvetica()?;
        let mut doc = PdfDocument::new(&self.title);
        for face in faces.iter() {
            doc.resources
                .fonts
                .map
                .insert(FontId(face.name().to_owned()), face.font.clone());
        }

        let mut alpha_states: BTreeMap<u32, ExtendedGraphicsStateId> = BTreeMap::new();
        let mut ops: Vec<Op> = Vec::new();

        for directive in page.directives() {
            match directive {
                Directive::FillRect {
                    x,
                    y,
                    width: w,
                    height: h,
                    color,
                } => {
                    let corners = [(*x, *y), (x + w, *y), (x + w, y + h), (*x, y + h)];
                    ops.push(Op::SetFillColor { col: rgb(color) });
                    ops.push(fill_polygon(
                        corners.iter().map(|(px, py)| flip(*px, *py, height)).collect(),
                    ));
                }
                Directive::FillCircle {
                    cx,
                    cy,
                    radius,
                    color,
                    opacity,
                } => {
                    let translucent = *opacity < 1.0;
                    if translucent {
                        // Quantised so equal opacities share one graphics state.
                        let key = (opacity * 1000.0).round() as u32;
                        let gs = alpha_states
                            .entry(key)
                            .or_insert_with(|| {
                                let id = ExtendedGraphicsStateId(format!("GSa{key}"));
                                doc.resources.extgstates.map.insert(
                                    id.clone(),
                                    ExtendedGraphicsState::default()
                                        .with_current_fill_alpha(*opacity),
                                );
                                id
                            })
                            .clone();
                        ops.push(Op::SaveGraphicsState);
                        ops.push(Op::LoadGraphicsState { gs });
                    }
                    ops.push(Op::SetFillColor { col: rgb(color) });
                    ops.push(fill_polygon(circle_points(*cx, *cy, *radius, height)));
                    if translucent {
                        ops.push(Op::RestoreGraphicsState);
                    }
                }
                Directive::StrokeLine {
                    from,
                    to,
                    color,
                    width: stroke,
                } => {
                    ops.push(Op::SetOutlineColor { col: rgb(color) });
                    ops.push(Op::SetOutlineThickness { pt: Pt(*stroke) });
                    ops.push(Op::DrawLine {
                        line: Line {
                            points: vec![
                                line_point(flip(from.0, from.1, height)),
                                line_point(flip(to.0, to.1, height)),
                            ],
                            is_closed: false,
                        },
                    });
                }
                Directive::Text(block) => push_text(&mut ops, &faces, block, height),
            }
        }

        let page = PdfPage::new(Mm(width * MM_PER_PT), Mm(height * MM_PER_PT), ops);
        doc.with_pages(vec![page]);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let mut output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "printpdf reported warnings");
        }

        if !output.starts_with(b"%PDF") {
            return Err(LaureaError::Encoding(format!(
                "encoder produced {} bytes without a PDF header",
                output.len()
            )));
        }
        if !stamp_file_id(&mut output) {
            warn!("no trailer file identifier found; output is not reproducible");
        }

        info!(bytes = output.len(), title = %self.title, "certificate encoded");
        Ok(output)
    }
}

/// Replace the trailer `/ID` pair with the SHA-256 of everything before it.
///
/// The pair is overwritten in place with the same number of bytes, so no
/// cross-reference offset moves. Returns `false` when no identifier of the
/// expected shape is present.
pub(crate) fn stamp_file_id(pdf: &mut [u8]) -> bool {
    let Some(start) = pdf
        .windows(ID_MARKER.len())
        .rposition(|w| w == ID_MARKER)
    else {
        return false;
    };
    let first = start + ID_MARKER.len();
    let second = first + ID_LEN + 2;
    let shaped = pdf.len() >= second + ID_LEN + 2
        && &pdf[first + ID_LEN..second] == b")("
        && &pdf[second + ID_LEN..second + ID_LEN + 2] == b")]";
    if !shaped {
        return false;
    }

    let digest = hex::encode_upper(Sha256::digest(&pdf[..start]));
    let digest = digest.as_bytes();
    pdf[first..first + ID_LEN].copy_from_slice(&digest[..ID_LEN]);
    pdf[second..second + ID_LEN].copy_from_slice(&digest[ID_LEN..]);
    true
}

/// Emit one text section per wrapped line.
fn push_text(ops: &mut Vec<Op>, faces: &Typefaces, block: &TextBlock, page_height: f32) {
    let face = faces.get(block.weight);
    let font = FontId(face.name().to_owned());

    for (idx, line) in face.wrap(&block.text, block.width, block.size).into_iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let x = match block.align {
            Align::Left => block.x,
            Align::Center => {
                let line_w = face.text_width(&line, block.size);
                block.x + (block.width - line_w).max(0.0) / 2.0
            }
        };
        let baseline = block.y + block.size * ASCENT + idx as f32 * block.size * LINE_HEIGHT;

        ops.push(Op::StartTextSection);
        ops.push(Op::SetFillColor {
            col: rgb(&block.color),
        });
        ops.push(Op::SetTextCursor {
            pos: flip(x, baseline, page_height),
        });
        ops.push(Op::SetFontSize {
            size: Pt(block.size),
            font: font.clone(),
        });
        ops.push(Op::WriteText {
            items: vec![TextItem::Text(line)],
            font: font.clone(),
        });
        ops.push(Op::EndTextSection);
    }
}

/// Convert top-left page coordinates to PDF user space (origin bottom-left).
fn flip(x: f32, y: f32, page_height: f32) -> Point {
    Point {
        x: Pt(x),
        y: Pt(page_height - y),
    }
}

fn line_point(p: Point) -> LinePoint {
    LinePoint { p, bezier: false }
}

fn fill_polygon(points: Vec<Point>) -> Op {
    Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing {
                points: points.into_iter().map(line_point).collect(),
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        },
    }
}

fn circle_points(cx: f32, cy: f32, radius: f32, page_height: f32) -> Vec<Point> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
            flip(
                cx + radius * angle.cos(),
                cy + radius * angle.sin(),
                page_height,
            )
        })
        .collect()
}

fn rgb(color: &theme::Color) -> Color {
    let (r, g, b) = color.unit();
    Color::Rgb(Rgb::new(r, g, b, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::composer::Composer;
    use crate::layout::directive::FontWeight;
    use crate::theme::Theme;
    use laurea_core::config::Institution;
    use laurea_core::{PageSetup, StudentRecord};

    fn composed_page() -> PageCanvas {
        let theme = Theme::SUID;
        let institution = Institution::default();
        let mut page = PageCanvas::new(&PageSetup::default());
        let mut record = StudentRecord::new("Ana Li", "Redes");
        record.course_description = Some("Fundamentos de redes".into());
        record.duration = Some("40 horas".into());
        Composer::new(&theme, &institution)
            .compose(&mut page, &record, "SUID-LOYW3V28-00007")
            .unwrap();
        page
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn encodes_a_pdf() {
        let bytes = PdfEncoder::default().encode(&composed_page()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn empty_page_still_encodes() {
        let page = PageCanvas::new(&PageSetup::default());
        let bytes = PdfEncoder::new("blank").encode(&page).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn accented_labels_are_written_as_glyph_ids() {
        let bytes = PdfEncoder::default().encode(&composed_page()).unwrap();

        // "ó" followed by "n", as raw UTF-8 in a hex text string, would read
        // as "Ã³n" under WinAnsi ("Certificación", "Duración").
        assert!(!contains(&bytes, b"C3B36E"));
        // "Certificaci" as single-byte codes.
        assert!(!contains(&bytes, b"4365727469666963616369"));
        assert!(!contains(&bytes, "Certificación".as_bytes()));
        assert!(contains(&bytes, b"Identity-H"));
        assert!(contains(&bytes, b"/Helvetica-Bold"));
    }

    #[test]
    fn same_page_same_bytes() {
        let page = composed_page();
        let encoder = PdfEncoder::new("Certificado SUID-LOYW3V28-00007");
        let first = encoder.encode(&page).unwrap();
        let second = encoder.encode(&page).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn opacity_states_are_named_by_alpha() {
        let bytes = PdfEncoder::default().encode(&composed_page()).unwrap();
        assert!(contains(&bytes, b"/GSa100"));
        assert!(contains(&bytes, b"/CA 0.1"));
    }

    #[test]
    fn file_id_is_stamped_from_the_preceding_bytes() {
        let mut pdf = format!(
            "%PDF-1.3 body trailer<</ID[({})({})]>>",
            "A".repeat(ID_LEN),
            "B".repeat(ID_LEN)
        )
        .into_bytes();
        let len = pdf.len();
        assert!(stamp_file_id(&mut pdf));
        assert_eq!(pdf.len(), len);

        let digest = hex::encode_upper(Sha256::digest(b"%PDF-1.3 body trailer<<"));
        let expected = format!("/ID[({})({})]>>", &digest[..32], &digest[32..]);
        assert!(pdf.ends_with(expected.as_bytes()));
    }

    #[test]
    fn missing_file_id_is_left_alone() {
        let mut pdf = b"%PDF-1.3 trailer<</Size 3>>".to_vec();
        let before = pdf.clone();
        assert!(!stamp_file_id(&mut pdf));
        assert_eq!(pdf, before);
    }

    #[test]
    fn flip_moves_origin_to_bottom() {
        let p = flip(10.0, 100.0, 595.0);
        assert_eq!(p.x, Pt(10.0));
        assert_eq!(p.y, Pt(495.0));
    }

    #[test]
    fn circle_points_lie_on_the_radius() {
        for p in circle_points(100.0, 100.0, 80.0, 600.0) {
            let dx = p.x.0 - 100.0;
            let dy = (600.0 - p.y.0) - 100.0;
            assert!(((dx * dx + dy * dy).sqrt() - 80.0).abs() < 1e-3);
        }
    }

    #[test]
    fn centred_text_is_offset_into_its_box() {
        let faces = Typefaces::helvetica().unwrap();
        let mut ops = Vec::new();
        let block = TextBlock {
            text: "SUID".into(),
            x: 0.0,
            y: 0.0,
            width: 200.0,
            size: 10.0,
            weight: FontWeight::Regular,
            color: Theme::SUID.white,
            align: Align::Center,
        };
        push_text(&mut ops, &faces, &block, 100.0);
        let cursor = ops
            .iter()
            .find_map(|op| match op {
                Op::SetTextCursor { pos } => Some(pos.x.0),
                _ => None,
            })
            .unwrap();
        let width = faces.get(FontWeight::Regular).text_width("SUID", 10.0);
        let expected = (200.0 - width) / 2.0;
        assert!((cursor - expected).abs() < 1e-3);
    }
}
