//! Document Assembler: one A4 page built through printpdf.
//!
//! Callers pass millimetres from the top-left corner. printpdf measures from
//! the bottom-left, so every placement goes through `pdf_y`.
//!
//! Sequence: `begin` → `place_header` → `place_column`* → `finish`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use printpdf::image_crate::{self, GenericImageView};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Rect,
};
use tracing::{debug, info, warn};

use crate::errors::CvError;
use crate::fonts::LoadedFont;
use crate::layout::{BodyFont, FontStyle, LineWrapper, WrappedLine, MM_PER_PT};
use crate::models::ColumnBlock;
use crate::render::style::{
    Align, DocumentStyle, Rgb8, DARK_TEXT, HEADER_FILL, LIGHT_TEXT, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
};

/// Height of the header bar.
const HEADER_HEIGHT_MM: f32 = 8.0;
/// Top edge of the background image (directly under the header bar).
const BACKGROUND_TOP_MM: f32 = 8.0;
/// Resolution the background image is assumed to have before scaling.
const BACKGROUND_DPI: f32 = 300.0;
/// Horizontal padding inside a text cell.
const CELL_PADDING_MM: f32 = 1.0;
/// Vertical gap left after each column block.
const BLOCK_SPACING_MM: f32 = 20.0;
const UNDERLINE_THICKNESS_PT: f32 = 0.5;

/// The four built-in faces of the body family.
struct BodyFaces {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

impl BodyFaces {
    fn register(pdf: &PdfDocumentReference, family: BodyFont) -> Result<Self, CvError> {
        let [regular, bold, italic, bold_italic] = match family {
            BodyFont::Courier => [
                BuiltinFont::Courier,
                BuiltinFont::CourierBold,
                BuiltinFont::CourierOblique,
                BuiltinFont::CourierBoldOblique,
            ],
            BodyFont::Helvetica => [
                BuiltinFont::Helvetica,
                BuiltinFont::HelveticaBold,
                BuiltinFont::HelveticaOblique,
                BuiltinFont::HelveticaBoldOblique,
            ],
            BodyFont::Times => [
                BuiltinFont::TimesRoman,
                BuiltinFont::TimesBold,
                BuiltinFont::TimesItalic,
                BuiltinFont::TimesBoldItalic,
            ],
        };
        let add = |font: BuiltinFont| {
            pdf.add_builtin_font(font)
                .map_err(|e| CvError::Pdf(e.to_string()))
        };

        Ok(BodyFaces {
            regular: add(regular)?,
            bold: add(bold)?,
            italic: add(italic)?,
            bold_italic: add(bold_italic)?,
        })
    }

    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match (style.bold, style.italic) {
            (false, false) => &self.regular,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (true, true) => &self.bold_italic,
        }
    }
}

/// The page being assembled. Owned by one generation run and consumed by
/// [`Document::finish`].
pub struct Document {
    pdf: PdfDocumentReference,
    layer: PdfLayerReference,
    style: DocumentStyle,
    faces: BodyFaces,
    text_color: Rgb8,
    left_margin: f32,
    right_margin: f32,
    cursor_y: f32,
    font_size: f32,
}

impl Document {
    /// Creates the page and, when given, draws the background image full
    /// width under the header bar. Body text turns light over a background.
    pub fn begin(style: DocumentStyle, background: Option<&Path>) -> Result<Self, CvError> {
        let (pdf, page, layer) = PdfDocument::new(
            "Curriculum Vitae",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let layer = pdf.get_page(page).get_layer(layer);
        let faces = BodyFaces::register(&pdf, style.body_font)?;

        let text_color = match background {
            Some(path) => {
                draw_background(&layer, path)?;
                LIGHT_TEXT
            }
            None => DARK_TEXT,
        };

        debug!(
            "Document started: font={} size={}pt background={}",
            style.body_font,
            style.body_size_pt,
            background.is_some()
        );

        Ok(Document {
            pdf,
            layer,
            font_size: style.body_size_pt,
            style,
            faces,
            text_color,
            left_margin: 0.0,
            right_margin: 0.0,
            cursor_y: 0.0,
        })
    }

    /// Draws the dark header bar across the top of the page with `text`
    /// right-aligned in it.
    ///
    /// `font` is a resolved TTF path; without one the regular body face is
    /// used. Page margins are zero from here on.
    pub fn place_header(&mut self, text: &str, font: Option<&Path>) -> Result<(), CvError> {
        self.left_margin = 0.0;
        self.right_margin = 0.0;
        let size = self.style.header_size_pt;

        let (font_ref, text_width) = match font {
            Some(path) => {
                let loaded = LoadedFont::load(path)?;
                let font_ref = self
                    .pdf
                    .add_external_font(loaded.bytes())
                    .map_err(|e| CvError::FontLoad {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    })?;
                debug!("Header font embedded from {}", loaded.path().display());
                (font_ref, loaded.measure_mm(text, size))
            }
            None => {
                let width = LineWrapper::new(self.style.body_font, size, PAGE_WIDTH_MM)
                    .measure(text, FontStyle::default());
                (self.faces.regular.clone(), width)
            }
        };

        self.layer.set_fill_color(HEADER_FILL.to_pdf());
        self.layer.add_rect(
            Rect::new(
                Mm(0.0),
                Mm(pdf_y(HEADER_HEIGHT_MM)),
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
            )
            .with_mode(PaintMode::Fill),
        );

        let x = (PAGE_WIDTH_MM - self.right_margin - CELL_PADDING_MM - text_width).max(0.0);
        let baseline = baseline_in_cell(0.0, HEADER_HEIGHT_MM, size);
        self.layer.set_fill_color(LIGHT_TEXT.to_pdf());
        self.layer
            .use_text(text, size, Mm(x), Mm(pdf_y(baseline)), &font_ref);

        self.cursor_y = HEADER_HEIGHT_MM;
        Ok(())
    }

    /// Writes one block of wrapped, emphasis-aware text at the block's
    /// coordinates, then leaves a fixed gap below it.
    pub fn place_column(&mut self, block: &ColumnBlock) {
        self.left_margin = block.left;
        self.cursor_y = resolve_y(block.y);
        if let Some(size) = block.font_size {
            self.font_size = size;
        }

        let width = if block.width > 0.0 {
            block.width
        } else {
            PAGE_WIDTH_MM - self.right_margin - self.left_margin
        };
        let text_width = (width - 2.0 * CELL_PADDING_MM).max(0.0);
        let wrapper = LineWrapper::new(self.style.body_font, self.font_size, text_width);
        let lines = wrapper.wrap(&block.text);
        let line_height = self.font_size * MM_PER_PT;

        self.layer.set_fill_color(self.text_color.to_pdf());
        for line in &lines {
            let baseline = baseline_in_cell(self.cursor_y, line_height, self.font_size);
            self.draw_line(line, text_width, baseline);
            self.cursor_y += line_height;
        }

        if self.cursor_y > PAGE_HEIGHT_MM {
            warn!(
                "Column at left={}mm runs {:.1}mm past the bottom of the page",
                block.left,
                self.cursor_y - PAGE_HEIGHT_MM
            );
        }
        debug!(
            "Placed column: left={} y={} width={} lines={}",
            block.left,
            block.y,
            width,
            lines.len()
        );

        self.cursor_y += BLOCK_SPACING_MM;
    }

    fn draw_line(&self, line: &WrappedLine, avail: f32, baseline: f32) {
        let stretch = match self.style.align {
            Align::Justify if !line.ends_paragraph && line.words.len() > 1 => {
                (avail - line.width).max(0.0) / (line.words.len() - 1) as f32
            }
            _ => 0.0,
        };

        let mut x = self.left_margin + CELL_PADDING_MM;
        for (i, word) in line.words.iter().enumerate() {
            x += word.gap_before;
            if i > 0 {
                x += stretch;
            }
            for fragment in &word.fragments {
                let font = self.faces.get(fragment.emphasis.font_style());
                self.layer.use_text(
                    fragment.text.as_str(),
                    self.font_size,
                    Mm(x),
                    Mm(pdf_y(baseline)),
                    font,
                );
                if fragment.emphasis.underline {
                    self.underline(x, x + fragment.width, baseline);
                }
                x += fragment.width;
            }
        }
    }

    fn underline(&self, from: f32, to: f32, baseline: f32) {
        let y = pdf_y(baseline + 0.1 * self.font_size * MM_PER_PT);
        self.layer.set_outline_color(self.text_color.to_pdf());
        self.layer.set_outline_thickness(UNDERLINE_THICKNESS_PT);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(from), Mm(y)), false),
                (Point::new(Mm(to), Mm(y)), false),
            ],
            is_closed: false,
        });
    }

    /// Serializes the page to `output`. Every failure maps to
    /// [`CvError::OutputWrite`]; a partially written file is left as is.
    pub fn finish(self, output: &Path) -> Result<PathBuf, CvError> {
        let write_err = |reason: String| CvError::OutputWrite {
            path: output.to_path_buf(),
            reason,
        };

        let file = File::create(output).map_err(|e| write_err(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        self.pdf
            .save(&mut writer)
            .map_err(|e| write_err(e.to_string()))?;
        writer.flush().map_err(|e| write_err(e.to_string()))?;

        info!("Wrote {}", output.display());
        Ok(output.to_path_buf())
    }
}

fn draw_background(layer: &PdfLayerReference, path: &Path) -> Result<(), CvError> {
    let decoded = image_crate::open(path).map_err(|e| CvError::Background {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let (width_px, height_px) = decoded.dimensions();
    if width_px == 0 || height_px == 0 {
        return Err(CvError::Background {
            path: path.to_path_buf(),
            reason: "image has no pixels".to_string(),
        });
    }

    let px_to_mm = 25.4 / BACKGROUND_DPI;
    let scale = PAGE_WIDTH_MM / (width_px as f32 * px_to_mm);
    let height_mm = height_px as f32 * px_to_mm * scale;

    Image::from_dynamic_image(&decoded).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(pdf_y(BACKGROUND_TOP_MM + height_mm))),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(BACKGROUND_DPI),
            ..Default::default()
        },
    );
    debug!(
        "Background {} placed at {:.1}mm tall",
        path.display(),
        height_mm
    );
    Ok(())
}

/// Converts a top-origin y offset to printpdf's bottom-origin coordinate.
fn pdf_y(from_top: f32) -> f32 {
    PAGE_HEIGHT_MM - from_top
}

/// Negative offsets count up from the bottom edge of the page.
fn resolve_y(y: f32) -> f32 {
    if y < 0.0 {
        PAGE_HEIGHT_MM + y
    } else {
        y
    }
}

/// Baseline (from the top) for text vertically centred in a cell.
fn baseline_in_cell(cell_top: f32, cell_height: f32, size_pt: f32) -> f32 {
    cell_top + 0.5 * cell_height + 0.3 * size_pt * MM_PER_PT
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn two_columns() -> Vec<ColumnBlock> {
        vec![
            ColumnBlock::new(
                "**Experience**\nBuilt a PDF generator in __Rust__.\n\nShipped it.",
                20.0,
                30.0,
                100.0,
            ),
            ColumnBlock::new("--Contact--\nme@example.com", 130.0, -180.0, 60.0)
                .with_font_size(10.0),
        ]
    }

    #[test]
    fn test_resolve_y_negative_counts_from_bottom() {
        assert_eq!(resolve_y(-180.0), 117.0);
        assert_eq!(resolve_y(30.0), 30.0);
    }

    #[test]
    fn test_begin_without_background_uses_dark_text() {
        let doc = Document::begin(DocumentStyle::default(), None).unwrap();
        assert_eq!(doc.text_color, DARK_TEXT);
        assert_eq!(doc.font_size, 12.0);
    }

    #[test]
    fn test_begin_with_unreadable_background_fails() {
        let dir = tempfile::tempdir().unwrap();
        let bg = dir.path().join("bg.jpg");
        fs::write(&bg, b"not an image").unwrap();

        let err = Document::begin(DocumentStyle::default(), Some(&bg))
            .err()
            .unwrap();
        assert!(matches!(err, CvError::Background { .. }));
    }

    #[test]
    fn test_header_moves_cursor_below_bar() {
        let mut doc = Document::begin(DocumentStyle::default(), None).unwrap();
        doc.place_header("Oct 2026  ", None).unwrap();
        assert_eq!(doc.cursor_y, HEADER_HEIGHT_MM);
        assert_eq!(doc.left_margin, 0.0);
    }

    #[test]
    fn test_begin_with_background_uses_light_text() {
        let dir = tempfile::tempdir().unwrap();
        let bg = dir.path().join("bg.png");
        image_crate::RgbImage::from_pixel(60, 40, image_crate::Rgb([40, 60, 80]))
            .save(&bg)
            .unwrap();

        let doc = Document::begin(DocumentStyle::default(), Some(&bg)).unwrap();
        assert_eq!(doc.text_color, LIGHT_TEXT);

        let output = dir.path().join("cv.pdf");
        doc.finish(&output).unwrap();
        assert!(fs::read(&output).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_header_with_ttf_font_embeds_glyph_header() {
        let dir = tempfile::tempdir().unwrap();
        let font = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/RobotoMedium.ttf");
        let output = dir.path().join("cv.pdf");

        let mut doc = Document::begin(DocumentStyle::default(), None).unwrap();
        doc.place_header("\u{1F5D3} Oct 2026  ", Some(&font)).unwrap();
        assert_eq!(doc.cursor_y, HEADER_HEIGHT_MM);
        doc.place_column(&ColumnBlock::new("Experience", 20.0, 30.0, 100.0));

        doc.finish(&output).unwrap();
        assert!(fs::read(&output).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_header_with_missing_font_file_fails() {
        let mut doc = Document::begin(DocumentStyle::default(), None).unwrap();
        let err = doc
            .place_header("Oct 2026  ", Some(Path::new("/nonexistent/Symbola.ttf")))
            .unwrap_err();
        assert!(matches!(err, CvError::FontLoad { .. }));
    }

    #[test]
    fn test_place_column_advances_cursor() {
        let mut doc = Document::begin(DocumentStyle::default(), None).unwrap();
        doc.place_column(&ColumnBlock::new("one\ntwo\nthree", 20.0, 30.0, 100.0));

        let line_height = 12.0 * MM_PER_PT;
        let expected = 30.0 + 3.0 * line_height + BLOCK_SPACING_MM;
        assert!(
            (doc.cursor_y - expected).abs() < 1e-3,
            "cursor {} expected {}",
            doc.cursor_y,
            expected
        );
    }

    #[test]
    fn test_place_column_keeps_indented_lines() {
        let mut doc = Document::begin(DocumentStyle::default(), None).unwrap();
        doc.place_column(&ColumnBlock::new("Skills:\n    - Rust\n\t- Go", 20.0, 30.0, 100.0));

        let line_height = 12.0 * MM_PER_PT;
        let expected = 30.0 + 3.0 * line_height + BLOCK_SPACING_MM;
        assert!((doc.cursor_y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_place_column_font_size_persists() {
        let mut doc = Document::begin(DocumentStyle::default(), None).unwrap();
        doc.place_column(&ColumnBlock::new("small", 20.0, 30.0, 100.0).with_font_size(9.0));
        doc.place_column(&ColumnBlock::new("still small", 20.0, 60.0, 100.0));
        assert_eq!(doc.font_size, 9.0);
    }

    #[test]
    fn test_finish_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("cv.pdf");

        let style = DocumentStyle {
            align: Align::Justify,
            body_font: BodyFont::Helvetica,
            ..DocumentStyle::default()
        };
        let mut doc = Document::begin(style, None).unwrap();
        doc.place_header("Oct 2026  ", None).unwrap();
        for block in two_columns() {
            doc.place_column(&block);
        }
        let written = doc.finish(&output).unwrap();

        assert_eq!(written, output);
        let bytes = fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_finish_to_missing_directory_is_output_write() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("cv.pdf");

        let doc = Document::begin(DocumentStyle::default(), None).unwrap();
        let err = doc.finish(&output).unwrap_err();
        assert!(err.is_output_failure());
        assert!(!output.exists());
    }
}
