// PDF assembly on top of printpdf: page setup, header bar, column blocks.

pub mod document;
pub mod header;
pub mod style;

pub use document::Document;
pub use header::{current_header_text, DEFAULT_CALENDAR_GLYPH};
pub use style::{Align, DocumentStyle};
