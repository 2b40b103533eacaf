use serde::{Deserialize, Serialize};

/// Footer placement: left 36mm, 280mm from the top, 160mm wide, 9pt.
const FOOTER_LEFT_MM: f32 = 36.0;
const FOOTER_Y_MM: f32 = 280.0;
const FOOTER_WIDTH_MM: f32 = 160.0;
const FOOTER_SIZE_PT: f32 = 9.0;

/// One placed region of text on the page. All offsets are in millimetres.
///
/// A negative `y` is measured up from the bottom edge of the page and a
/// `width` of 0 extends the block to the right page edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnBlock {
    pub text: String,
    pub left: f32,
    pub y: f32,
    pub width: f32,
    /// Font size in points; `None` keeps the current size.
    pub font_size: Option<f32>,
}

impl ColumnBlock {
    pub fn new(text: impl Into<String>, left: f32, y: f32, width: f32) -> Self {
        ColumnBlock {
            text: text.into(),
            left,
            y,
            width,
            font_size: None,
        }
    }

    pub fn with_font_size(mut self, size_pt: f32) -> Self {
        self.font_size = Some(size_pt);
        self
    }

    /// The small source/credits line at the bottom of the page.
    pub fn footer(text: impl Into<String>) -> Self {
        ColumnBlock::new(text, FOOTER_LEFT_MM, FOOTER_Y_MM, FOOTER_WIDTH_MM)
            .with_font_size(FOOTER_SIZE_PT)
    }
}
