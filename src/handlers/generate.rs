//! Generation handlers: download the project archive or preview the generated files as JSON.

use crate::diagram::{Diagram, DiagramPayload};
use crate::error::{AppError, DiagramError};
use crate::packager::Artifact;
use crate::response::{success_many, SuccessMany};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

/// Body is parsed here rather than with the `Json` extractor so malformed input gets the standard error envelope.
fn read_payload(body: &[u8]) -> Result<Diagram, AppError> {
    let payload: DiagramPayload = serde_json::from_slice(body).map_err(DiagramError::Parse)?;
    Ok(payload.into_diagram()?)
}

/// POST /generate-orm: zip of the generated Spring Boot project.
pub async fn generate_orm(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let request_id = Uuid::new_v4();
    let diagram = read_payload(&body)?;
    tracing::info!(
        request_id = %request_id,
        nodes = diagram.node_data_array.len(),
        links = diagram.link_data_array.len(),
        "generate-orm request"
    );
    let generator = state.generator.clone();
    let archive = tokio::task::spawn_blocking(move || generator.package(&diagram, request_id))
        .await
        .map_err(|e| AppError::Internal(format!("generation task failed: {}", e)))??;

    let disposition = format!("attachment; filename=\"{}\"", archive.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        archive.bytes,
    )
        .into_response())
}

/// POST /generate-orm/preview: the same files as JSON, nothing written to disk.
pub async fn preview(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SuccessMany<Artifact>>), AppError> {
    let diagram = read_payload(&body)?;
    let artifacts = state.generator.generate(&diagram)?;
    tracing::debug!(files = artifacts.len(), "preview generated");
    Ok(success_many(artifacts))
}
