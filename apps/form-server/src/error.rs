//! Error types for the form server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use form_engine::EngineError;
use serde::Serialize;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Form not found: {0}")]
    FormNotFound(String),

    #[error("Invalid form data: {0}")]
    InvalidFormData(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Compilation error: {0}")]
    CompileError(String),

    #[error("Render timeout after {0}ms")]
    Timeout(u64),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServerError::FormNotFound(_) => (StatusCode::NOT_FOUND, "FORM_NOT_FOUND"),
            ServerError::InvalidFormData(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_FORM_DATA")
            }
            ServerError::AssetNotFound(_) => (StatusCode::BAD_REQUEST, "ASSET_NOT_FOUND"),
            ServerError::CompileError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "COMPILE_ERROR"),
            ServerError::Timeout(_) => (StatusCode::REQUEST_TIMEOUT, "TIMEOUT"),
            ServerError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::UnknownForm(name) | EngineError::TemplateNotFound(name) => {
                ServerError::FormNotFound(name)
            }
            EngineError::InvalidFormData(msg) => ServerError::InvalidFormData(msg),
            EngineError::AssetNotFound(name) => ServerError::AssetNotFound(name),
            EngineError::AssetError(name, msg) => {
                ServerError::InvalidRequest(format!("Asset '{}': {}", name, msg))
            }
            EngineError::PathSecurityViolation(msg) | EngineError::InvalidArgument(msg) => {
                ServerError::InvalidRequest(msg)
            }
            EngineError::Timeout(ms) => ServerError::Timeout(ms),
            EngineError::CompileError(errors) => {
                let msg = errors
                    .iter()
                    .map(|e| e.message.clone())
                    .collect::<Vec<_>>()
                    .join("; ");
                ServerError::CompileError(msg)
            }
            other => ServerError::Internal(other.to_string()),
        }
    }
}
