//! Font name normalization and lookup across font directories.
//!
//! Lookup is a plain recursive walk: the first file whose name matches the
//! normalized spec exactly wins, in search-root order. Enumeration order inside
//! a root is whatever the filesystem yields; nothing is sorted.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::CvError;

/// The only font-file extension accepted for embedded fonts.
pub const FONT_EXTENSION: &str = ".ttf";

/// System-wide TrueType directory searched after the per-user ones.
const SYSTEM_FONT_DIR: &str = "/usr/share/fonts/TTF/";

/// A validated font identifier and the file name it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    name: String,
    file_name: String,
}

impl FontSpec {
    /// Normalizes a short font name into a `.ttf` file name.
    ///
    /// `"Symbola"` becomes `"Symbola.ttf"`, `"Symbola.ttf"` is kept, and any
    /// other dotted name (`"Symbola.otf"`, `"My.Font"`) is rejected.
    pub fn normalize(name: &str) -> Result<Self, CvError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CvError::FontNotTtf(name.to_string()));
        }

        let file_name = if name.ends_with(FONT_EXTENSION) {
            name.to_string()
        } else if name.contains('.') {
            return Err(CvError::FontNotTtf(name.to_string()));
        } else {
            format!("{name}{FONT_EXTENSION}")
        };

        Ok(FontSpec {
            name: name.to_string(),
            file_name,
        })
    }

    /// The identifier as supplied, before normalization.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Platform-conventional font roots, built from `$HOME` when it is set.
pub fn default_search_paths() -> Vec<PathBuf> {
    search_paths_for_home(std::env::var("HOME").ok().as_deref())
}

fn search_paths_for_home(home: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);
    if let Some(home) = home.filter(|h| !h.is_empty()) {
        let home = Path::new(home);
        paths.push(home.join(".local/share/fonts/"));
        paths.push(home.join(".fonts"));
    }
    paths.push(PathBuf::from(SYSTEM_FONT_DIR));
    paths
}

/// Finds the font file for `spec` under the given roots.
///
/// `None` or an empty slice falls back to [`default_search_paths`]. Roots that
/// do not exist or cannot be read are skipped.
pub fn resolve(spec: &FontSpec, search_paths: Option<&[PathBuf]>) -> Result<PathBuf, CvError> {
    let defaults;
    let roots = match search_paths {
        Some(paths) if !paths.is_empty() => paths,
        _ => {
            defaults = default_search_paths();
            defaults.as_slice()
        }
    };

    for root in roots {
        debug!("Searching {} for {}", root.display(), spec.file_name());
        if let Some(found) = find_in_tree(root, spec.file_name()) {
            debug!("Resolved font {} to {}", spec.name(), found.display());
            return Ok(found);
        }
    }

    Err(CvError::FontNotFound(spec.file_name().to_string()))
}

/// Depth-first walk of `dir`; files in a directory are checked before its
/// subdirectories are entered.
fn find_in_tree(dir: &Path, file_name: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            subdirs.push(path);
        } else if entry.file_name() == file_name {
            return Some(path);
        }
    }

    subdirs
        .iter()
        .find_map(|sub| find_in_tree(sub, file_name))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
