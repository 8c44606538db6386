pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::errors::AppError;
use crate::generation::handlers as generation;
use crate::ingest::handlers as ingest;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/jobs/analyze", post(analysis::handle_analyze_job))
        .route(
            "/api/v1/resumes/analyze",
            post(analysis::handle_analyze_resume),
        )
        // Upload API
        .route("/api/v1/resumes/upload", post(ingest::handle_upload_resume))
        // Generation API
        .route("/api/v1/resumes/optimize", post(generation::handle_optimize))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
