use chrono::{Local, NaiveDate};

/// U+1F5D3 SPIRAL CALENDAR PAD.
pub const DEFAULT_CALENDAR_GLYPH: char = '\u{1F5D3}';

/// Header label for `date`: `"🗓 Oct 2026  "`, or `"Oct 2026  "` without a glyph.
///
/// The trailing spaces keep the date off the right edge of the bar.
pub fn header_text(date: NaiveDate, glyph: Option<char>) -> String {
    let month_year = date.format("%b %Y");
    match glyph {
        Some(glyph) => format!("{glyph} {month_year}  "),
        None => format!("{month_year}  "),
    }
}

/// Header label for today in the local timezone.
pub fn current_header_text(glyph: Option<char>) -> String {
    header_text(Local::now().date_naive(), glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_header_text_without_glyph() {
        assert_eq!(header_text(date(2022, 4, 26), None), "Apr 2022  ");
    }

    #[test]
    fn test_header_text_with_calendar_glyph() {
        assert_eq!(
            header_text(date(2026, 10, 19), Some(DEFAULT_CALENDAR_GLYPH)),
            "\u{1F5D3} Oct 2026  "
        );
    }

    #[test]
    fn test_current_header_text_ends_with_year() {
        let text = current_header_text(None);
        let year = Local::now().date_naive().format("%Y").to_string();
        assert!(text.trim_end().ends_with(&year), "got {text:?}");
    }
}
