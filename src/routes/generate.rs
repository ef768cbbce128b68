//! Generation routes with a request body cap.

use crate::handlers::generate::{generate_orm, preview};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::{routing::post, Router};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

pub fn generate_routes(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/generate-orm", post(generate_orm))
        .route("/generate-orm/preview", post(preview))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
        .with_state(state)
}
