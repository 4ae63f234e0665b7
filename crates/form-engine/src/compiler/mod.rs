//! Typst compilation wrapper with timeout and error handling

pub mod errors;
pub mod output;
pub mod render;

pub use errors::{CompileError, EngineError, ErrorSeverity, RenderStatus};
pub use output::OutputFormat;
#[cfg(feature = "server")]
pub use render::compile_document;
pub use render::{compile_document_sync, validate_syntax};

use std::collections::HashMap;

use typst::foundations::Bytes;

/// A Typst document ready for compilation: source, inputs and mounted files
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    /// Typst source of the main file
    pub source: String,
    /// Variables injected into sys.inputs
    pub inputs: HashMap<String, serde_json::Value>,
    /// Binary files keyed by virtual path (e.g. `/assets/logo.jpg`)
    pub assets: HashMap<String, Bytes>,
    /// Output format (pdf, svg, png)
    pub format: OutputFormat,
    /// Pixels per inch for PNG output
    pub ppi: Option<u32>,
}

impl PreparedDocument {
    /// Create a PDF render of `source` with no inputs or assets
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            inputs: HashMap::new(),
            assets: HashMap::new(),
            format: OutputFormat::Pdf,
            ppi: None,
        }
    }
}

/// Response from rendering
#[derive(Debug, Clone)]
pub struct RenderResponse {
    pub status: RenderStatus,
    pub artifact: Option<RenderArtifact>,
    pub errors: Vec<CompileError>,
    pub warnings: Vec<CompileError>,
}

/// Rendered artifact bytes
#[derive(Debug, Clone)]
pub struct RenderArtifact {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub page_count: usize,
}
