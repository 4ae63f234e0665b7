//! API handlers for the form server
//!
//! Provides REST endpoints for:
//! - Listing the available forms
//! - Sample data per form
//! - Rendering a form (base64 JSON or raw bytes)

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use base64::Engine;
use form_engine::forms::samples;
use form_engine::templates::{list_templates, TemplateInfo};
use form_engine::{FormData, FormKind, MemoryAssets, OutputFormat, RenderOptions, RenderedForm};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "form-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Form list response
#[derive(Serialize)]
pub struct FormListResponse {
    pub success: bool,
    pub forms: Vec<TemplateInfo>,
    pub count: usize,
}

/// Handler: GET /api/forms
pub async fn handle_list_forms() -> Json<FormListResponse> {
    let forms = list_templates();
    let count = forms.len();
    Json(FormListResponse {
        success: true,
        forms,
        count,
    })
}

/// Handler: GET /api/forms/:name/sample
pub async fn handle_sample(Path(name): Path<String>) -> Result<Json<serde_json::Value>, ServerError> {
    let kind = parse_kind(&name)?;
    Ok(Json(samples::sample(kind)))
}

/// Render request body
#[derive(Deserialize)]
pub struct RenderApiRequest {
    /// Form data dictionary
    pub data: serde_json::Value,

    /// Output format: "pdf", "svg", or "png"
    #[serde(default = "default_format")]
    pub format: String,

    /// PPI for PNG output (optional)
    pub ppi: Option<u32>,

    /// Base64-encoded images keyed by the names the data references
    #[serde(default)]
    pub assets: HashMap<String, String>,
}

fn default_format() -> String {
    "pdf".to_string()
}

/// Render response
#[derive(Serialize)]
pub struct RenderApiResponse {
    pub success: bool,
    /// Base64-encoded output (PDF/SVG/PNG)
    pub data: String,
    pub mime_type: String,
    pub page_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Handler: POST /api/forms/:name/render
pub async fn handle_render(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<RenderApiRequest>,
) -> Result<Json<RenderApiResponse>, ServerError> {
    let rendered = render(&state, &name, req).await?;
    let warnings = rendered
        .warnings
        .iter()
        .map(|w| w.message.clone())
        .collect();

    Ok(Json(RenderApiResponse {
        success: true,
        data: base64::engine::general_purpose::STANDARD.encode(&rendered.bytes),
        mime_type: rendered.mime_type,
        page_count: rendered.page_count,
        warnings,
    }))
}

/// Handler: POST /api/forms/:name/file
///
/// Same request body as `/render`, answered with the document itself.
pub async fn handle_render_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<RenderApiRequest>,
) -> Result<Response, ServerError> {
    let format = parse_format(&req.format)?;
    let rendered = render(&state, &name, req).await?;
    let disposition = format!("inline; filename=\"{}.{}\"", name, format.extension());

    Ok((
        [
            (header::CONTENT_TYPE, rendered.mime_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.bytes,
    )
        .into_response())
}

async fn render(
    state: &AppState,
    name: &str,
    req: RenderApiRequest,
) -> Result<RenderedForm, ServerError> {
    let kind = parse_kind(name)?;
    let format = parse_format(&req.format)?;
    info!("Render request: form={}, format={}, assets={}", kind, format, req.assets.len());
    debug!("Form data: {}", req.data);

    let form = FormData::from_json(kind, req.data)?;
    let mut options = RenderOptions::new(format).with_assets(MemoryAssets::from_base64(&req.assets)?);
    options.ppi = req.ppi;

    Ok(state.renderer.render_with_timeout(&form, &options).await?)
}

pub(crate) fn parse_kind(name: &str) -> Result<FormKind, ServerError> {
    name.parse::<FormKind>()
        .map_err(|_| ServerError::FormNotFound(name.to_string()))
}

pub(crate) fn parse_format(format: &str) -> Result<OutputFormat, ServerError> {
    format.parse::<OutputFormat>().map_err(|_| {
        ServerError::InvalidRequest(format!(
            "Invalid format '{}'. Must be 'pdf', 'svg', or 'png'",
            format
        ))
    })
}
