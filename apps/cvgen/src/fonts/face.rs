use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::CvError;
use crate::layout::MM_PER_PT;

/// A TrueType font read from disk, ready to embed and measure.
pub struct LoadedFont {
    path: PathBuf,
    bytes: Vec<u8>,
    units_per_em: f32,
}

impl LoadedFont {
    /// Reads and parses the font file. The face is re-parsed on each
    /// measurement since `ttf_parser::Face` borrows the bytes.
    pub fn load(path: &Path) -> Result<Self, CvError> {
        let bytes = fs::read(path).map_err(|e| CvError::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let face = ttf_parser::Face::parse(&bytes, 0).map_err(|e| CvError::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let units_per_em = f32::from(face.units_per_em());

        Ok(LoadedFont {
            path: path.to_path_buf(),
            bytes,
            units_per_em,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Advance width of `text` in mm at `size_pt`.
    ///
    /// Characters without a glyph (or mapped to `.notdef`) count as half an em.
    pub fn measure_mm(&self, text: &str, size_pt: f32) -> f32 {
        let Ok(face) = ttf_parser::Face::parse(&self.bytes, 0) else {
            return 0.0;
        };
        let fallback = self.units_per_em / 2.0;
        let units: f32 = text
            .chars()
            .map(|c| {
                face.glyph_index(c)
                    .filter(|id| id.0 != 0)
                    .and_then(|id| face.glyph_hor_advance(id))
                    .map(f32::from)
                    .unwrap_or(fallback)
            })
            .sum();
        units / self.units_per_em * size_pt * MM_PER_PT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roboto() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/RobotoMedium.ttf")
    }

    #[test]
    fn test_load_and_measure_ttf() {
        let font = LoadedFont::load(&roboto()).unwrap();
        assert_eq!(font.path(), roboto().as_path());
        assert!(!font.bytes().is_empty());

        let small = font.measure_mm("Oct 2026  ", 10.0);
        let large = font.measure_mm("Oct 2026  ", 20.0);
        assert!(small > 0.0);
        assert!((large - 2.0 * small).abs() < 1e-3);
        assert!(font.measure_mm("Oct 2026", 10.0) > font.measure_mm("Oct", 10.0));
        assert_eq!(font.measure_mm("", 10.0), 0.0);
    }

    #[test]
    fn test_missing_glyph_counts_half_an_em() {
        let font = LoadedFont::load(&roboto()).unwrap();
        // Roboto has no calendar glyph
        let width = font.measure_mm("\u{1F5D3}", 12.0);
        assert!((width - 0.5 * 12.0 * MM_PER_PT).abs() < 1e-3);
    }

    #[test]
    fn test_load_missing_file_is_font_load_error() {
        let err = LoadedFont::load(Path::new("/nonexistent/Symbola.ttf"))
            .err()
            .unwrap();
        assert!(matches!(err, CvError::FontLoad { .. }));
    }

    #[test]
    fn test_load_rejects_non_font_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Fake.ttf");
        fs::write(&path, b"definitely not a font").unwrap();

        let err = LoadedFont::load(&path).err().unwrap();
        assert!(
            matches!(&err, CvError::FontLoad { path: p, .. } if p == &path),
            "unexpected error: {err}"
        );
    }
}
