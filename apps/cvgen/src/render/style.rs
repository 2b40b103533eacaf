use clap::ValueEnum;
use printpdf::{Color, Rgb};
use serde::{Deserialize, Serialize};

use crate::layout::BodyFont;

/// A4 portrait, in millimetres.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Header bar background.
pub const HEADER_FILL: Rgb8 = Rgb8(26, 28, 29);
/// Header text, and body text over a background image.
pub const LIGHT_TEXT: Rgb8 = Rgb8(255, 255, 255);
pub const DARK_TEXT: Rgb8 = Rgb8(0, 0, 0);

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl Rgb8 {
    pub fn to_pdf(self) -> Color {
        let Rgb8(r, g, b) = self;
        Color::Rgb(Rgb::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            None,
        ))
    }
}

/// Horizontal alignment of column text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    /// Stretch inter-word gaps to fill the column; paragraph ends stay ragged.
    Justify,
}

/// Typography shared by every block on the page.
#[derive(Debug, Clone)]
pub struct DocumentStyle {
    pub body_font: BodyFont,
    pub body_size_pt: f32,
    pub header_size_pt: f32,
    pub align: Align,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        DocumentStyle {
            body_font: BodyFont::Courier,
            body_size_pt: 12.0,
            header_size_pt: 14.0,
            align: Align::Left,
        }
    }
}
