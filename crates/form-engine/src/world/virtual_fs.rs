//! Virtual filesystem for in-memory compilation
//!
//! Form templates and their images (logo, signatures) never touch the real
//! filesystem during compilation: everything Typst reads is mounted here.

use std::collections::HashMap;
use std::path::Path;

use typst::foundations::Bytes;
use typst::syntax::{FileId, Source, VirtualPath};

use crate::compiler::errors::EngineError;

/// Virtual directory under which form images are mounted
pub const ASSET_ROOT: &str = "/assets";

/// Path of the main template file
const MAIN_PATH: &str = "/main.typ";

/// A file stored in the virtual filesystem
#[derive(Debug, Clone)]
pub struct VirtualFile {
    pub content: Bytes,
    pub path: VirtualPath,
}

/// A virtual filesystem for in-memory compilation
#[derive(Debug, Default)]
pub struct VirtualFilesystem {
    files: HashMap<FileId, VirtualFile>,
    main_id: Option<FileId>,
}

impl VirtualFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the main source file and return its id
    pub fn mount_main(&mut self, content: String) -> FileId {
        let id = Self::file_id(MAIN_PATH);
        self.files.insert(
            id,
            VirtualFile {
                content: content.as_bytes().into(),
                path: VirtualPath::new(MAIN_PATH),
            },
        );
        self.main_id = Some(id);
        id
    }

    /// Mount an additional file at a virtual path
    pub fn mount_file(&mut self, path: &str, content: Bytes) -> Result<FileId, EngineError> {
        validate_path(path)?;

        let normalized = normalize_path(path);
        let id = Self::file_id(&normalized);

        self.files.insert(
            id,
            VirtualFile {
                content,
                path: VirtualPath::new(&normalized),
            },
        );

        Ok(id)
    }

    pub fn main_id(&self) -> Option<FileId> {
        self.main_id
    }

    /// Get a source file by id (for .typ files)
    pub fn get_source(&self, id: FileId) -> Option<Source> {
        self.files.get(&id).and_then(|file| {
            let text = std::str::from_utf8(&file.content).ok()?;
            Some(Source::new(id, text.to_string()))
        })
    }

    /// Get a binary file by id (images)
    pub fn get_file(&self, id: FileId) -> Option<&Bytes> {
        self.files.get(&id).map(|f| &f.content)
    }

    /// Look up a file by path
    pub fn lookup_path(&self, path: &str) -> Option<FileId> {
        let id = Self::file_id(&normalize_path(path));
        self.files.contains_key(&id).then_some(id)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn file_id(path: &str) -> FileId {
        FileId::new(None, VirtualPath::new(path))
    }
}

/// Virtual path at which a form image reference is mounted
pub fn asset_path(name: &str) -> String {
    normalize_path(&format!("{}/{}", ASSET_ROOT, name))
}

/// Reject paths that could escape the virtual root
pub fn validate_path(path: &str) -> Result<(), EngineError> {
    if path.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(EngineError::PathSecurityViolation(format!(
            "Path traversal with '..' is not allowed: {}",
            path
        )));
    }

    // Absolute filesystem paths (C:\..., \\server\...) are not virtual paths
    let p = Path::new(path);
    if (p.is_absolute() && !path.starts_with('/')) || path.contains(':') {
        return Err(EngineError::PathSecurityViolation(format!(
            "Absolute filesystem paths are not allowed: {}",
            path
        )));
    }

    Ok(())
}

/// Normalize to a leading slash, forward slashes and no empty segments
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    format!("/{}", segments.join("/"))
}
