//! Greedy word-wrap over emphasis spans.
//!
//! Each input line is a paragraph. Words are split on whitespace and may carry
//! several fragments when emphasis changes mid-word (`**Rust**,`). A word that
//! is wider than the column is placed alone on its line and overflows.
//!
//! Whitespace is kept as measured gaps: a paragraph's leading indentation and
//! runs of spaces between words render at their full width. A gap that falls
//! at a wrap point is dropped.

use crate::layout::font_metrics::{get_metrics, BodyFont, FontStyle};
use crate::layout::markup::{parse_emphasis, Emphasis};

/// Spaces a tab stands for.
const TAB_SPACES: usize = 4;

/// A piece of a word in a single emphasis state.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub emphasis: Emphasis,
    /// Rendered width in mm.
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Word {
    pub fragments: Vec<Fragment>,
    pub width: f32,
    /// Whitespace in mm between the previous word (or the paragraph start)
    /// and this one.
    pub gap_before: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub words: Vec<Word>,
    /// Width in mm of words plus the gaps before them.
    pub width: f32,
    /// Last line of its paragraph; never stretched when justifying.
    pub ends_paragraph: bool,
}

/// Measures and wraps text for one column.
pub struct LineWrapper {
    font: BodyFont,
    size_pt: f32,
    max_width: f32,
}

impl LineWrapper {
    pub fn new(font: BodyFont, size_pt: f32, max_width_mm: f32) -> Self {
        LineWrapper {
            font,
            size_pt,
            max_width: max_width_mm,
        }
    }

    /// Width of the inter-word space in mm.
    pub fn space_width(&self) -> f32 {
        get_metrics(self.font, FontStyle::default()).space_mm(self.size_pt)
    }

    /// Rendered width of a fragment in mm.
    pub fn measure(&self, text: &str, style: FontStyle) -> f32 {
        get_metrics(self.font, style).measure_mm(text, self.size_pt)
    }

    /// Wraps `text` into lines no wider than the column where possible.
    ///
    /// Emphasis runs may span several lines. An empty input line produces an
    /// empty output line.
    pub fn wrap(&self, text: &str) -> Vec<WrappedLine> {
        let mut lines = Vec::new();
        for words in self.paragraphs(text) {
            self.wrap_paragraph(words, &mut lines);
        }
        lines
    }

    fn wrap_paragraph(&self, words: Vec<Word>, lines: &mut Vec<WrappedLine>) {
        if words.is_empty() {
            lines.push(WrappedLine {
                words: Vec::new(),
                width: 0.0,
                ends_paragraph: true,
            });
            return;
        }

        let mut current: Vec<Word> = Vec::new();
        let mut current_width = 0.0_f32;

        for mut word in words {
            if !current.is_empty() && current_width + word.gap_before + word.width > self.max_width
            {
                // Line is full, start a new one without the gap
                lines.push(WrappedLine {
                    words: std::mem::take(&mut current),
                    width: current_width,
                    ends_paragraph: false,
                });
                word.gap_before = 0.0;
                current_width = word.width;
            } else {
                current_width += word.gap_before + word.width;
            }
            current.push(word);
        }

        lines.push(WrappedLine {
            words: current,
            width: current_width,
            ends_paragraph: true,
        });
    }

    /// Splits `text` into paragraphs of measured words.
    fn paragraphs(&self, text: &str) -> Vec<Vec<Word>> {
        let space_w = self.space_width();
        let mut paragraphs = Vec::new();
        let mut words = Vec::new();
        let mut word = Word::default();
        let mut pending_spaces = 0_usize;

        for span in parse_emphasis(text) {
            let mut piece = String::new();
            for c in span.text.chars() {
                match c {
                    '\r' => {}
                    '\n' => {
                        self.push_fragment(&mut word, &mut piece, span.emphasis);
                        end_word(&mut words, &mut word);
                        paragraphs.push(std::mem::take(&mut words));
                        pending_spaces = 0;
                    }
                    c if c.is_whitespace() => {
                        self.push_fragment(&mut word, &mut piece, span.emphasis);
                        end_word(&mut words, &mut word);
                        pending_spaces += if c == '\t' { TAB_SPACES } else { 1 };
                    }
                    c => {
                        if word.fragments.is_empty() && piece.is_empty() {
                            word.gap_before = pending_spaces as f32 * space_w;
                            pending_spaces = 0;
                        }
                        piece.push(c);
                    }
                }
            }
            self.push_fragment(&mut word, &mut piece, span.emphasis);
        }

        end_word(&mut words, &mut word);
        paragraphs.push(words);
        paragraphs
    }

    fn push_fragment(&self, word: &mut Word, piece: &mut String, emphasis: Emphasis) {
        if piece.is_empty() {
            return;
        }
        let width = self.measure(piece, emphasis.font_style());
        word.width += width;
        word.fragments.push(Fragment {
            text: std::mem::take(piece),
            emphasis,
            width,
        });
    }
}

fn end_word(words: &mut Vec<Word>, word: &mut Word) {
    if !word.fragments.is_empty() {
        words.push(std::mem::take(word));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Courier 10pt: every glyph 0.6em * 10pt = 6pt ≈ 2.1167mm
    const GLYPH_MM: f32 = 6.0 * 25.4 / 72.0;

    fn courier(max_glyphs: f32) -> LineWrapper {
        LineWrapper::new(BodyFont::Courier, 10.0, max_glyphs * GLYPH_MM + 0.01)
    }

    fn word_text(word: &Word) -> String {
        word.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    fn texts(lines: &[WrappedLine]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.words.iter().map(word_text).collect::<Vec<_>>().join(" "))
            .collect()
    }

    #[test]
    fn test_empty_text_is_one_blank_line() {
        let lines = courier(20.0).wrap("");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].words.is_empty());
        assert!(lines[0].ends_paragraph);
    }

    #[test]
    fn test_single_word_one_line() {
        let lines = courier(20.0).wrap("Rust");
        assert_eq!(lines.len(), 1);
        assert_eq!(texts(&lines), vec!["Rust"]);
        assert!((lines[0].width - 4.0 * GLYPH_MM).abs() < 1e-3);
    }

    #[test]
    fn test_long_text_wraps_greedily() {
        // 10 glyphs per line: "aaaa bbbb" (9) fits, adding " cccc" (14) does not
        let lines = courier(10.0).wrap("aaaa bbbb cccc dddd");
        assert_eq!(texts(&lines), vec!["aaaa bbbb", "cccc dddd"]);
        assert!(!lines[0].ends_paragraph);
        assert!(lines[1].ends_paragraph);
    }

    #[test]
    fn test_blank_line_between_paragraphs_is_kept() {
        let lines = courier(40.0).wrap("Experience\n\nEducation");
        assert_eq!(texts(&lines), vec!["Experience", "", "Education"]);
        assert!(lines.iter().all(|l| l.ends_paragraph));
    }

    #[test]
    fn test_overlong_word_sits_alone() {
        let lines = courier(5.0).wrap("hi supercalifragilistic ok");
        assert_eq!(texts(&lines), vec!["hi", "supercalifragilistic", "ok"]);
        assert!(lines[1].width > 5.0 * GLYPH_MM);
    }

    #[test]
    fn test_emphasis_markers_do_not_count_toward_width() {
        let wrapper = courier(40.0);
        let marked = wrapper.wrap("**Rust**");
        let plain = wrapper.wrap("Rust");
        assert!((marked[0].width - plain[0].width).abs() < 1e-4);
        assert!(marked[0].words[0].fragments[0].emphasis.bold);
    }

    #[test]
    fn test_word_with_mixed_emphasis_has_fragments() {
        let lines = courier(40.0).wrap("**Rust**, Go");
        let first = &lines[0].words[0];
        assert_eq!(word_text(first), "Rust,");
        assert_eq!(first.fragments.len(), 2);
        assert!(first.fragments[0].emphasis.bold);
        assert!(!first.fragments[1].emphasis.bold);
    }

    #[test]
    fn test_crlf_line_endings() {
        let lines = courier(40.0).wrap("one\r\ntwo");
        assert_eq!(texts(&lines), vec!["one", "two"]);
    }

    #[test]
    fn test_leading_indentation_preserved() {
        let lines = courier(40.0).wrap("Skills:\n    - Rust      Python");
        assert_eq!(texts(&lines), vec!["Skills:", "- Rust Python"]);

        let words = &lines[1].words;
        assert!((words[0].gap_before - 4.0 * GLYPH_MM).abs() < 1e-3);
        assert!((words[1].gap_before - GLYPH_MM).abs() < 1e-3);
        assert!((words[2].gap_before - 6.0 * GLYPH_MM).abs() < 1e-3);
        // 11 spaces plus 11 glyphs
        assert!((lines[1].width - 22.0 * GLYPH_MM).abs() < 1e-3);
    }

    #[test]
    fn test_tab_indents_four_spaces() {
        let lines = courier(40.0).wrap("\tRust");
        assert!((lines[0].words[0].gap_before - 4.0 * GLYPH_MM).abs() < 1e-3);
    }

    #[test]
    fn test_gap_dropped_at_wrap_point() {
        let lines = courier(10.0).wrap("aaaa    bbbb");
        assert_eq!(texts(&lines), vec!["aaaa", "bbbb"]);
        assert_eq!(lines[1].words[0].gap_before, 0.0);
        assert!((lines[1].width - 4.0 * GLYPH_MM).abs() < 1e-3);
    }

    #[test]
    fn test_emphasis_spans_lines() {
        let lines = courier(40.0).wrap("**Senior\nEngineer** at Acme");
        assert_eq!(texts(&lines), vec!["Senior", "Engineer at Acme"]);
        assert!(lines[0].words[0].fragments[0].emphasis.bold);
        assert!(lines[1].words[0].fragments[0].emphasis.bold);
        assert!(!lines[1].words[1].fragments[0].emphasis.bold);
    }
}
