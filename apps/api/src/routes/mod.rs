pub mod candidates;
pub mod health;
pub mod jobs;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::ingest::handlers as ingest_handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route(
            "/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        // Candidates
        .route("/candidates", get(candidates::handle_list_candidates))
        .route("/candidates/:id", get(candidates::handle_get_candidate))
        .route(
            "/candidates/:id/report",
            get(candidates::handle_candidate_report),
        )
        // Storage notifications
        .route("/events/s3", post(ingest_handlers::handle_s3_event))
        .fallback(not_found)
        .with_state(state)
}
