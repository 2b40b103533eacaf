use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{ensure, Context, Result};
use clap::Parser;

use crate::errors::CvError;
use crate::layout::BodyFont;
use crate::models::{ColumnBlock, LayoutManifest};
use crate::render::{Align, DocumentStyle, DEFAULT_CALENDAR_GLYPH};

const DEFAULT_OUTPUT: &str = "cv.pdf";

/// Command-line arguments. Most flags fall back to `CVGEN_*` environment
/// variables, which may also come from a `.env` file.
#[derive(Debug, Parser)]
#[command(name = "cvgen", version, about = "Generate a single-page PDF résumé")]
pub struct Cli {
    /// Column read from a text file, in millimetres (negative Y counts from the bottom).
    #[arg(long = "column", value_name = "FILE:LEFT:Y:WIDTH[:SIZE]")]
    pub columns: Vec<ColumnArg>,

    /// JSON layout manifest; explicit flags override its values.
    #[arg(long, env = "CVGEN_LAYOUT")]
    pub layout: Option<PathBuf>,

    /// Background image drawn under the header bar.
    #[arg(long, env = "CVGEN_BACKGROUND")]
    pub background: Option<PathBuf>,

    /// Body font family: courier, helvetica or times.
    #[arg(long, env = "CVGEN_FONT")]
    pub font: Option<BodyFont>,

    /// TrueType font for the header (e.g. Symbola); enables the calendar glyph.
    #[arg(long, env = "CVGEN_HEADER_FONT")]
    pub header_font: Option<String>,

    #[arg(long, default_value_t = DEFAULT_CALENDAR_GLYPH)]
    pub calendar_glyph: char,

    /// Font search directory; repeat to search several, in order.
    #[arg(long = "font-path", env = "CVGEN_FONT_PATHS", value_delimiter = ':')]
    pub font_paths: Vec<PathBuf>,

    #[arg(long, value_enum)]
    pub align: Option<Align>,

    /// Small footer line at the bottom of the page.
    #[arg(long)]
    pub footer: Option<String>,

    #[arg(short, long, env = "CVGEN_OUTPUT")]
    pub output: Option<PathBuf>,
}

/// `FILE:LEFT:Y:WIDTH[:SIZE]` as given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnArg {
    pub file: PathBuf,
    pub left: f32,
    pub y: f32,
    pub width: f32,
    pub size: Option<f32>,
}

impl FromStr for ColumnArg {
    type Err = CvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if !(4..=5).contains(&parts.len()) || parts[0].is_empty() {
            return Err(CvError::Column(format!(
                "'{s}' must look like FILE:LEFT:Y:WIDTH[:SIZE]"
            )));
        }

        let number = |field: &str, raw: &str| {
            raw.trim().parse::<f32>().map_err(|_| {
                CvError::Column(format!("{field} '{raw}' in '{s}' is not a number"))
            })
        };

        Ok(ColumnArg {
            file: PathBuf::from(parts[0]),
            left: number("LEFT", parts[1])?,
            y: number("Y", parts[2])?,
            width: number("WIDTH", parts[3])?,
            size: parts.get(4).map(|raw| number("SIZE", *raw)).transpose()?,
        })
    }
}

impl ColumnArg {
    fn to_block(&self) -> Result<ColumnBlock> {
        let text = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read column file {}", self.file.display()))?;
        let block = ColumnBlock::new(text, self.left, self.y, self.width);
        Ok(match self.size {
            Some(size) => block.with_font_size(size),
            None => block,
        })
    }
}

/// Everything one generation run needs, fully resolved.
#[derive(Debug, Clone)]
pub struct Config {
    pub columns: Vec<ColumnBlock>,
    pub style: DocumentStyle,
    pub background: Option<PathBuf>,
    pub header_font: Option<String>,
    pub calendar_glyph: char,
    /// Empty means the platform default font directories.
    pub font_paths: Vec<PathBuf>,
    pub footer: Option<String>,
    pub output: PathBuf,
}

impl Config {
    /// Merges CLI flags over the optional layout manifest and loads column text.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let manifest = match &cli.layout {
            Some(path) => LayoutManifest::load(path)?,
            None => LayoutManifest::default(),
        };

        let mut columns = manifest.column_blocks()?;
        for arg in &cli.columns {
            columns.push(arg.to_block()?);
        }
        ensure!(
            !columns.is_empty(),
            "No columns to place: pass --column FILE:LEFT:Y:WIDTH or --layout FILE"
        );

        let body_font = match (cli.font, manifest.font.as_deref()) {
            (Some(font), _) => font,
            (None, Some(name)) => name
                .parse::<BodyFont>()
                .map_err(anyhow::Error::msg)
                .context("Invalid 'font' in layout manifest")?,
            (None, None) => BodyFont::Courier,
        };

        let style = DocumentStyle {
            body_font,
            align: cli.align.or(manifest.align).unwrap_or_default(),
            ..DocumentStyle::default()
        };

        let font_paths = if cli.font_paths.is_empty() {
            manifest.font_paths
        } else {
            cli.font_paths
        };

        Ok(Config {
            columns,
            style,
            background: cli.background.or(manifest.background),
            header_font: cli.header_font.or(manifest.header_font),
            calendar_glyph: cli.calendar_glyph,
            font_paths,
            footer: cli.footer.or(manifest.footer),
            output: cli
                .output
                .or(manifest.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        })
    }
}
