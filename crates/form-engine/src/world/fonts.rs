//! Font loading and caching
//!
//! Fonts are loaded once per process: the fonts embedded by `typst-assets`
//! plus any directories named in the engine configuration.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use typst::foundations::Bytes;
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;

/// Global font cache singleton
static FONT_CACHE: OnceLock<FontCache> = OnceLock::new();

/// Get the global font cache, initializing it with embedded fonts only
pub fn global_font_cache() -> &'static FontCache {
    FONT_CACHE.get_or_init(|| FontCache::new(&[]))
}

/// Initialize the global font cache with extra font directories.
///
/// Only the first initialization loads fonts; later calls return the
/// existing cache unchanged.
pub fn init_global_font_cache(font_dirs: &[PathBuf]) -> &'static FontCache {
    if FONT_CACHE.get().is_some() && !font_dirs.is_empty() {
        tracing::debug!("Font cache already initialized, ignoring font_dirs");
    }
    FONT_CACHE.get_or_init(|| FontCache::new(font_dirs))
}

/// A cache of fonts available for compilation
pub struct FontCache {
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
}

impl FontCache {
    /// Create a font cache with embedded fonts and the fonts found in `font_dirs`
    pub fn new(font_dirs: &[PathBuf]) -> Self {
        let mut book = FontBook::new();
        let mut fonts = Vec::new();

        Self::load_embedded_fonts(&mut book, &mut fonts);
        let embedded = fonts.len();

        for dir in font_dirs {
            if dir.is_dir() {
                Self::scan_font_dir(dir, &mut book, &mut fonts);
            } else {
                tracing::warn!("Font directory not found: {}", dir.display());
            }
        }

        tracing::info!(
            "Font cache initialized with {} fonts ({} embedded)",
            fonts.len(),
            embedded
        );

        Self {
            book: LazyHash::new(book),
            fonts,
        }
    }

    fn load_embedded_fonts(book: &mut FontBook, fonts: &mut Vec<Font>) {
        for data in typst_assets::fonts() {
            let buffer = Bytes::from_static(data);
            for font in Font::iter(buffer) {
                book.push(font.info().clone());
                fonts.push(font);
            }
        }
    }

    /// Recursively scan a directory for font files
    fn scan_font_dir(dir: &Path, book: &mut FontBook, fonts: &mut Vec<Font>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };

        for entry in entries.flatten() {
            let path = entry.path();

            if path.is_dir() {
                Self::scan_font_dir(&path, book, fonts);
            } else if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if matches!(ext.as_str(), "ttf" | "otf" | "ttc" | "otc") {
                    Self::load_font_file(&path, book, fonts);
                }
            }
        }
    }

    fn load_font_file(path: &Path, book: &mut FontBook, fonts: &mut Vec<Font>) {
        let Ok(data) = std::fs::read(path) else {
            tracing::warn!("Could not read font file {}", path.display());
            return;
        };

        let buffer = Bytes::from(data);
        for font in Font::iter(buffer) {
            book.push(font.info().clone());
            fonts.push(font);
        }
    }

    /// The font book handed to Typst
    pub fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    /// Get a font by index
    pub fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Sorted, deduplicated font family names
    pub fn list_font_families(&self) -> Vec<String> {
        let mut families: Vec<String> = self
            .book
            .families()
            .map(|(name, _)| name.to_string())
            .collect();

        families.sort();
        families.dedup();
        families
    }

    /// Whether a family is available (case-insensitive)
    pub fn has_family(&self, family: &str) -> bool {
        self.fonts
            .iter()
            .any(|font| font.info().family.eq_ignore_ascii_case(family))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_cache_creation() {
        let cache = FontCache::new(&[]);
        assert!(!cache.is_empty(), "Font cache should not be empty");
    }

    #[test]
    fn test_default_form_font_is_embedded() {
        let cache = FontCache::new(&[]);
        assert!(cache.has_family("Libertinus Serif"));
        assert!(cache
            .list_font_families()
            .iter()
            .any(|f| f == "Libertinus Serif"));
    }

    #[test]
    fn test_missing_font_dir_is_skipped() {
        let embedded = FontCache::new(&[]).len();
        let cache = FontCache::new(&[PathBuf::from("/definitely/not/a/font/dir")]);
        assert_eq!(cache.len(), embedded);
    }

    #[test]
    fn test_global_cache_singleton() {
        let cache1 = global_font_cache();
        let cache2 = init_global_font_cache(&[]);
        assert!(std::ptr::eq(cache1, cache2));
    }
}
