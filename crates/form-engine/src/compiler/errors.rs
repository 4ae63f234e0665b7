//! Error types for form rendering

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status of a render operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStatus {
    Success,
    Error,
}

/// A compilation diagnostic with optional location information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileError {
    /// Human-readable error message
    pub message: String,
    /// Line number (1-indexed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Column number (1-indexed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Helpful hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Severity level
    pub severity: ErrorSeverity,
}

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    Error,
    Warning,
}

/// Errors raised while preparing or rendering a form
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Unknown form: {0}")]
    UnknownForm(String),

    #[error("Invalid form data: {0}")]
    InvalidFormData(String),

    #[error("Compilation failed: {}", summarize(.0))]
    CompileError(Vec<CompileError>),

    #[error("Compilation timeout after {0}ms")]
    Timeout(u64),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Invalid asset encoding for '{0}': {1}")]
    AssetError(String, String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Export failed: {0}")]
    ExportError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Path security violation: {0}")]
    PathSecurityViolation(String),
}

fn summarize(errors: &[CompileError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl CompileError {
    /// Create a new compile error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
            hint: None,
            severity: ErrorSeverity::Error,
        }
    }

    /// Set the location
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Set a hint
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set as warning
    pub fn as_warning(mut self) -> Self {
        self.severity = ErrorSeverity::Warning;
        self
    }
}
