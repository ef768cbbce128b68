//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Problems with the diagram document itself: malformed input or ambiguous modeling.
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("invalid diagram json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {kind} identifier: '{value}'")]
    InvalidIdentifier { kind: &'static str, value: String },
    #[error("duplicate node key: {0}")]
    DuplicateKey(String),
    #[error("duplicate class name: {0}")]
    DuplicateName(String),
    #[error("link {from} -> {to} references a missing node")]
    DanglingLink { from: String, to: String },
    #[error("class {class} declares more than one key property")]
    MultipleKeys { class: String },
    #[error("class {class} has more than one superclass")]
    MultipleSuperclasses { class: String },
    #[error("class {class} cannot inherit from itself")]
    SelfInheritance { class: String },
    #[error("class {class} would declare field '{field}' twice")]
    DuplicateField { class: String, field: String },
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("invalid setting {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Failure of one generation request.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Diagram(#[from] DiagramError),
    #[error("working directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("internal: {0}")]
    Internal(String),
}

impl From<DiagramError> for AppError {
    fn from(e: DiagramError) -> Self {
        AppError::Generate(GenerateError::Diagram(e))
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Generate(GenerateError::Diagram(DiagramError::Parse(_))) => {
                (StatusCode::BAD_REQUEST, "malformed_diagram")
            }
            AppError::Generate(GenerateError::Diagram(_)) => (StatusCode::UNPROCESSABLE_ENTITY, "modeling_error"),
            AppError::Generate(GenerateError::Io(_)) | AppError::Generate(GenerateError::Archive(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "generation_failed")
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
