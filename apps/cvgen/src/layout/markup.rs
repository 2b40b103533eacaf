//! Lightweight inline emphasis.
//!
//! Only three paired markers are understood, matching what the résumé content
//! files use:
//! - `**bold**`
//! - `__italic__`
//! - `--underline--`
//!
//! A marker only opens a run if the same marker appears again later in the
//! text, possibly on a following line; otherwise it is kept as literal text.
//! Anything else (headings, lists, links) passes through untouched.

use crate::layout::font_metrics::FontStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Emphasis {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Emphasis {
    pub fn font_style(self) -> FontStyle {
        FontStyle {
            bold: self.bold,
            italic: self.italic,
        }
    }

    fn is_set(self, marker: Marker) -> bool {
        match marker {
            Marker::Bold => self.bold,
            Marker::Italic => self.italic,
            Marker::Underline => self.underline,
        }
    }

    fn toggle(&mut self, marker: Marker) {
        match marker {
            Marker::Bold => self.bold = !self.bold,
            Marker::Italic => self.italic = !self.italic,
            Marker::Underline => self.underline = !self.underline,
        }
    }
}

/// A run of text sharing one emphasis state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Bold,
    Italic,
    Underline,
}

impl Marker {
    const ALL: [Marker; 3] = [Marker::Bold, Marker::Italic, Marker::Underline];

    fn token(self) -> &'static str {
        match self {
            Marker::Bold => "**",
            Marker::Italic => "__",
            Marker::Underline => "--",
        }
    }
}

/// Earliest marker in `text`, with its byte offset.
fn next_marker(text: &str) -> Option<(usize, Marker)> {
    Marker::ALL
        .iter()
        .filter_map(|&m| text.find(m.token()).map(|pos| (pos, m)))
        .min_by_key(|&(pos, _)| pos)
}

fn flush(spans: &mut Vec<Span>, buf: &mut String, emphasis: Emphasis) {
    if !buf.is_empty() {
        spans.push(Span {
            text: std::mem::take(buf),
            emphasis,
        });
    }
}

/// Splits content into emphasis spans, dropping the markers. Newlines stay
/// inside the span text.
pub fn parse_emphasis(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut emphasis = Emphasis::default();
    let mut buf = String::new();
    let mut remaining = text;

    while let Some((pos, marker)) = next_marker(remaining) {
        buf.push_str(&remaining[..pos]);
        let after = &remaining[pos + 2..];

        if emphasis.is_set(marker) || after.contains(marker.token()) {
            flush(&mut spans, &mut buf, emphasis);
            emphasis.toggle(marker);
        } else {
            // No closing marker, keep it as text
            buf.push_str(marker.token());
        }
        remaining = after;
    }

    buf.push_str(remaining);
    flush(&mut spans, &mut buf, emphasis);
    spans
}
