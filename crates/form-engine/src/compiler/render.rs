//! Core rendering logic
//!
//! Compiles a [`PreparedDocument`] inside a [`VirtualWorld`], splits the
//! diagnostics and exports the result.

#[cfg(feature = "server")]
use std::time::Duration;

use typst::diag::{Severity, SourceDiagnostic, SourceResult, Warned};
use typst::model::Document;
use typst::World;

use super::errors::{CompileError, EngineError, RenderStatus};
use super::output::OutputFormat;
use super::{PreparedDocument, RenderArtifact, RenderResponse};
use crate::world::VirtualWorld;

/// Compile a document on the current thread
pub fn compile_document_sync(document: PreparedDocument) -> Result<RenderResponse, EngineError> {
    let PreparedDocument {
        source,
        inputs,
        assets,
        format,
        ppi,
    } = document;

    let world = VirtualWorld::new(source, inputs, assets)?;
    let warned = typst::compile(&world);
    finish(&world, warned, format, ppi)
}

/// Compile a document on the blocking pool, giving up after `timeout_ms`
#[cfg(feature = "server")]
pub async fn compile_document(
    document: PreparedDocument,
    timeout_ms: u64,
) -> Result<RenderResponse, EngineError> {
    let PreparedDocument {
        source,
        inputs,
        assets,
        format,
        ppi,
    } = document;

    let world = VirtualWorld::new(source, inputs, assets)?;

    let result = tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        tokio::task::spawn_blocking(move || {
            let warned = typst::compile(&world);
            (world, warned)
        }),
    )
    .await;

    let (world, warned) = match result {
        Ok(Ok(done)) => done,
        Ok(Err(join_error)) => {
            return Err(EngineError::ExportError(format!(
                "Compilation task panicked: {}",
                join_error
            )));
        }
        Err(_elapsed) => {
            tracing::warn!("Compilation exceeded {}ms", timeout_ms);
            return Err(EngineError::Timeout(timeout_ms));
        }
    };

    finish(&world, warned, format, ppi)
}

/// Validate Typst syntax without full compilation
pub fn validate_syntax(source: &str) -> Vec<CompileError> {
    use typst::syntax::parse;

    parse(source)
        .errors()
        .into_iter()
        .map(|error| CompileError::new(error.message.to_string()))
        .collect()
}

fn finish(
    world: &VirtualWorld,
    warned: Warned<SourceResult<Document>>,
    format: OutputFormat,
    ppi: Option<u32>,
) -> Result<RenderResponse, EngineError> {
    match warned.output {
        Ok(document) => {
            let artifact = export_document(&document, format, ppi)?;
            let (_, warnings) = categorize_diagnostics(world, &warned.warnings);
            for warning in &warnings {
                tracing::debug!("Typst warning: {}", warning.message);
            }
            Ok(RenderResponse {
                status: RenderStatus::Success,
                artifact: Some(artifact),
                errors: vec![],
                warnings,
            })
        }
        Err(diagnostics) => {
            let (errors, warnings) = categorize_diagnostics(world, &diagnostics);

            if errors.is_empty() {
                Err(EngineError::CompileError(vec![CompileError::new(
                    "Compilation failed with unknown error",
                )]))
            } else {
                Ok(RenderResponse {
                    status: RenderStatus::Error,
                    artifact: None,
                    errors,
                    warnings,
                })
            }
        }
    }
}

/// Export a compiled document to the requested format
fn export_document(
    document: &Document,
    format: OutputFormat,
    ppi: Option<u32>,
) -> Result<RenderArtifact, EngineError> {
    let page_count = document.pages.len();

    let data = match format {
        OutputFormat::Pdf => typst_pdf::pdf(document, &typst_pdf::PdfOptions::default())
            .map_err(|e| EngineError::ExportError(format!("PDF export failed: {:?}", e)))?,
        // SVG and PNG carry the first page only
        OutputFormat::Svg => {
            let page = document
                .pages
                .first()
                .ok_or_else(|| EngineError::ExportError("Document has no pages".to_string()))?;
            typst_svg::svg(page).into_bytes()
        }
        OutputFormat::Png => {
            let page = document
                .pages
                .first()
                .ok_or_else(|| EngineError::ExportError("Document has no pages".to_string()))?;
            let pixels_per_point = ppi.unwrap_or(144) as f32 / 72.0;
            typst_render::render(page, pixels_per_point)
                .encode_png()
                .map_err(|e| EngineError::ExportError(format!("PNG encoding failed: {}", e)))?
        }
    };

    Ok(RenderArtifact {
        data,
        mime_type: format.mime_type().to_string(),
        page_count,
    })
}

/// Categorize diagnostics into errors and warnings
fn categorize_diagnostics(
    world: &VirtualWorld,
    diagnostics: &[SourceDiagnostic],
) -> (Vec<CompileError>, Vec<CompileError>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for diag in diagnostics {
        let mut compile_error = CompileError::new(diag.message.to_string());

        if let Some((line, column)) = locate(world, diag) {
            compile_error = compile_error.with_location(line, column);
        }

        if !diag.hints.is_empty() {
            let hint = diag
                .hints
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            compile_error = compile_error.with_hint(hint);
        }

        match diag.severity {
            Severity::Error => errors.push(compile_error),
            Severity::Warning => warnings.push(compile_error.as_warning()),
        }
    }

    (errors, warnings)
}

/// 1-indexed line and column of a diagnostic's span start
fn locate(world: &VirtualWorld, diag: &SourceDiagnostic) -> Option<(usize, usize)> {
    let id = diag.span.id()?;
    let source = world.source(id).ok()?;
    let range = source.range(diag.span)?;
    let line = source.byte_to_line(range.start)?;
    let column = source.byte_to_column(range.start)?;
    Some((line + 1, column + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_simple_document() {
        let response = compile_document_sync(PreparedDocument::new("Hello, *World*!")).unwrap();

        assert_eq!(response.status, RenderStatus::Success);
        let artifact = response.artifact.unwrap();
        assert!(artifact.data.starts_with(b"%PDF"));
        assert_eq!(artifact.page_count, 1);
    }

    #[test]
    fn test_compile_with_inputs() {
        let mut document = PreparedDocument::new(
            r#"#let name = sys.inputs.at("name", default: "World")
Hello, #name!"#,
        );
        document
            .inputs
            .insert("name".to_string(), serde_json::json!("Alice"));

        let response = compile_document_sync(document).unwrap();
        assert_eq!(response.status, RenderStatus::Success);
    }

    #[test]
    fn test_compile_error_has_location() {
        let response =
            compile_document_sync(PreparedDocument::new("First line\n#undefined_thing")).unwrap();

        assert_eq!(response.status, RenderStatus::Error);
        assert!(response.artifact.is_none());
        let error = &response.errors[0];
        assert_eq!(error.line, Some(2));
    }

    #[test]
    fn test_svg_export() {
        let mut document = PreparedDocument::new("Gate pass");
        document.format = OutputFormat::Svg;

        let response = compile_document_sync(document).unwrap();
        let artifact = response.artifact.unwrap();
        assert_eq!(artifact.mime_type, "image/svg+xml");
        assert!(String::from_utf8_lossy(&artifact.data).contains("<svg"));
    }

    #[test]
    fn test_png_export() {
        let mut document = PreparedDocument::new("Fuel card");
        document.format = OutputFormat::Png;
        document.ppi = Some(72);

        let response = compile_document_sync(document).unwrap();
        let artifact = response.artifact.unwrap();
        assert!(artifact.data.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[cfg(feature = "server")]
    #[tokio::test]
    async fn test_compile_async() {
        let response = compile_document(PreparedDocument::new("Async *render*"), 10_000)
            .await
            .unwrap();
        assert_eq!(response.status, RenderStatus::Success);
    }

    #[cfg(feature = "server")]
    #[tokio::test]
    async fn test_compile_async_syntax_error() {
        let response = compile_document(PreparedDocument::new("#invalid{{{{"), 10_000)
            .await
            .unwrap();
        assert_eq!(response.status, RenderStatus::Error);
        assert!(!response.errors.is_empty());
    }

    #[test]
    fn test_validate_syntax() {
        assert!(validate_syntax("Hello, World!").is_empty());
        assert!(!validate_syntax("#let x = ").is_empty());
    }
}
