//! Résumé generation: one run from configuration to a PDF on disk.
//!
//! Flow: resolve header font (if configured) → begin document → header bar →
//!       column blocks → footer → finish.

use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::errors::CvError;
use crate::fonts::{resolve, FontSpec};
use crate::models::ColumnBlock;
use crate::render::{current_header_text, Document};

/// Generates the document described by `config` and returns the output path.
///
/// The header font is resolved before anything is drawn, so a bad font name
/// fails without touching the output file.
pub fn generate(config: &Config) -> Result<PathBuf, CvError> {
    let header_font = match &config.header_font {
        Some(name) => {
            let spec = FontSpec::normalize(name)?;
            let path = resolve(&spec, Some(config.font_paths.as_slice()))?;
            info!("Header font {} resolved to {}", spec.name(), path.display());
            Some(path)
        }
        None => None,
    };

    // Built-in PDF fonts cannot encode the calendar glyph.
    let glyph = header_font.as_ref().map(|_| config.calendar_glyph);
    let header = current_header_text(glyph);

    let mut document = Document::begin(config.style.clone(), config.background.as_deref())?;
    document.place_header(&header, header_font.as_deref())?;

    for block in &config.columns {
        document.place_column(block);
    }
    if let Some(footer) = &config.footer {
        document.place_column(&ColumnBlock::footer(footer.as_str()));
    }
    info!(
        "Placed {} column(s){}",
        config.columns.len(),
        if config.footer.is_some() { " and footer" } else { "" }
    );

    document.finish(&config.output)
}
