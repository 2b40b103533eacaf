// Text layout: glyph-width tables, inline emphasis, and word-wrap.
// The PDF library only places glyphs at coordinates; line breaking happens here.

pub mod font_metrics;
pub mod markup;
pub mod wrap;

pub use font_metrics::{BodyFont, FontStyle, MM_PER_PT};
pub use wrap::{LineWrapper, WrappedLine};
