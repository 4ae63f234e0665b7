//! Image assets (logo and signatures)
//!
//! Forms reference images by name. An [`AssetSource`] resolves a name to
//! bytes; the renderer mounts every resolved image at `/assets/<name>`.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use base64::Engine;
use typst::foundations::Bytes;

use crate::compiler::errors::EngineError;
use crate::world::virtual_fs::validate_path;

/// Resolves asset names to image bytes
pub trait AssetSource: Send + Sync {
    fn load(&self, name: &str) -> Result<Bytes, EngineError>;
}

/// Assets read from a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirectoryAssets {
    fn load(&self, name: &str) -> Result<Bytes, EngineError> {
        validate_path(name)?;
        if name.starts_with(['/', '\\']) {
            return Err(EngineError::PathSecurityViolation(format!(
                "Asset names must be relative to the assets directory: {}",
                name
            )));
        }
        if name.is_empty() {
            return Err(EngineError::AssetNotFound(name.to_string()));
        }

        let path = self.root.join(name);
        match std::fs::read(&path) {
            Ok(data) => {
                tracing::debug!(asset = name, bytes = data.len(), "Loaded asset");
                Ok(Bytes::from(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(EngineError::AssetNotFound(name.to_string()))
            }
            Err(e) => Err(EngineError::IoError(e)),
        }
    }
}

/// Assets held in memory, e.g. supplied with a render request
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: HashMap<String, Bytes>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), Bytes::from(data.into()));
    }

    /// Decode base64-encoded assets keyed by name
    pub fn from_base64(encoded: &HashMap<String, String>) -> Result<Self, EngineError> {
        let engine = base64::engine::general_purpose::STANDARD;

        let files = encoded
            .iter()
            .map(|(name, data)| {
                validate_path(name)?;
                let bytes = engine
                    .decode(data.trim())
                    .map_err(|e| EngineError::AssetError(name.clone(), e.to_string()))?;
                Ok((name.clone(), Bytes::from(bytes)))
            })
            .collect::<Result<HashMap<_, _>, EngineError>>()?;

        Ok(Self { files })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl AssetSource for MemoryAssets {
    fn load(&self, name: &str) -> Result<Bytes, EngineError> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::AssetNotFound(name.to_string()))
    }
}

/// A source with nothing in it
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetSource for NoAssets {
    fn load(&self, name: &str) -> Result<Bytes, EngineError> {
        Err(EngineError::AssetNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn test_directory_assets_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("signature.png"), b"png-bytes").unwrap();

        let assets = DirectoryAssets::new(dir.path());
        let bytes = assets.load("signature.png").unwrap();
        assert_eq!(bytes.as_slice(), b"png-bytes");
    }

    #[test]
    fn test_directory_assets_nested() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("signatures")).unwrap();
        std::fs::write(dir.path().join("signatures/a.png"), b"a").unwrap();

        let assets = DirectoryAssets::new(dir.path());
        assert!(assets.load("signatures/a.png").is_ok());
    }

    #[test]
    fn test_directory_assets_missing() {
        let dir = tempfile::tempdir().unwrap();
        let assets = DirectoryAssets::new(dir.path());
        assert!(matches!(
            assets.load("nobody.png"),
            Err(EngineError::AssetNotFound(name)) if name == "nobody.png"
        ));
    }

    #[test]
    fn test_directory_assets_reject_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let assets = DirectoryAssets::new(dir.path());
        assert!(matches!(
            assets.load("../secret.png"),
            Err(EngineError::PathSecurityViolation(_))
        ));
        assert!(matches!(
            assets.load("C:\\keys.png"),
            Err(EngineError::PathSecurityViolation(_))
        ));
    }

    #[test]
    fn test_directory_assets_reject_absolute_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("etc")).unwrap();
        std::fs::write(dir.path().join("etc/x.png"), b"x").unwrap();

        let assets = DirectoryAssets::new(dir.path());
        assert!(assets.load("etc/x.png").is_ok());
        assert!(matches!(
            assets.load("/etc/x.png"),
            Err(EngineError::PathSecurityViolation(_))
        ));
        assert!(matches!(
            assets.load("\\etc\\x.png"),
            Err(EngineError::PathSecurityViolation(_))
        ));
    }

    #[test]
    fn test_memory_assets_from_base64() {
        let mut encoded = HashMap::new();
        encoded.insert("pixel.png".to_string(), PIXEL_PNG.to_string());

        let assets = MemoryAssets::from_base64(&encoded).unwrap();
        let bytes = assets.load("pixel.png").unwrap();
        assert!(bytes.as_slice().starts_with(b"\x89PNG"));
        assert_eq!(assets.len(), 1);
    }

    #[test]
    fn test_memory_assets_bad_base64() {
        let mut encoded = HashMap::new();
        encoded.insert("logo.png".to_string(), "not base64!!".to_string());

        assert!(matches!(
            MemoryAssets::from_base64(&encoded),
            Err(EngineError::AssetError(name, _)) if name == "logo.png"
        ));
    }

    #[test]
    fn test_memory_assets_missing() {
        let assets = MemoryAssets::new();
        assert!(assets.is_empty());
        assert!(matches!(
            assets.load("logo.png"),
            Err(EngineError::AssetNotFound(_))
        ));
        assert!(NoAssets.load("logo.png").is_err());
    }
}
