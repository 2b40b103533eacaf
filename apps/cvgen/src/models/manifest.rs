//! JSON layout manifest: the whole page described in one file.
//!
//! ```json
//! {
//!   "font": "helvetica",
//!   "background": "bg.jpg",
//!   "columns": [
//!     { "file": "curriculum.txt", "left": 20, "y": 30, "width": 100 },
//!     { "text": "**Contact**\nme@example.com", "left": 130, "y": -180, "width": 60, "size": 10 }
//!   ]
//! }
//! ```
//!
//! Relative paths are resolved against the manifest's own directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::column::ColumnBlock;
use crate::render::Align;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutManifest {
    #[serde(default)]
    pub columns: Vec<ManifestColumn>,
    pub background: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub font: Option<String>,
    pub header_font: Option<String>,
    #[serde(default)]
    pub font_paths: Vec<PathBuf>,
    pub footer: Option<String>,
    pub align: Option<Align>,
}

/// A column whose content is given inline (`text`) or read from `file`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestColumn {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub left: f32,
    pub y: f32,
    pub width: f32,
    pub size: Option<f32>,
}

impl LayoutManifest {
    /// Reads a manifest and rebases its relative paths onto its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout manifest {}", path.display()))?;
        let mut manifest: LayoutManifest = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid layout manifest {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        manifest.rebase(base);
        Ok(manifest)
    }

    fn rebase(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(bg) = self.background.as_mut() {
            join(bg);
        }
        for column in &mut self.columns {
            if let Some(file) = column.file.as_mut() {
                join(file);
            }
        }
        self.font_paths.iter_mut().for_each(join);
    }

    /// Builds the column blocks, reading file-backed content.
    pub fn column_blocks(&self) -> Result<Vec<ColumnBlock>> {
        self.columns.iter().map(ManifestColumn::to_block).collect()
    }
}

impl ManifestColumn {
    fn to_block(&self) -> Result<ColumnBlock> {
        let text = match (&self.text, &self.file) {
            (Some(text), None) => text.clone(),
            (None, Some(file)) => fs::read_to_string(file)
                .with_context(|| format!("Failed to read column file {}", file.display()))?,
            (Some(_), Some(_)) => bail!("A manifest column takes either 'text' or 'file', not both"),
            (None, None) => bail!("A manifest column needs 'text' or 'file'"),
        };

        let block = ColumnBlock::new(text, self.left, self.y, self.width);
        Ok(match self.size {
            Some(size) => block.with_font_size(size),
            None => block,
        })
    }
}
