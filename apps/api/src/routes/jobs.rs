use axum::{extract::State, http::StatusCode, Json};
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::job::{CreateJobRequest, JobRecord};
use crate::state::AppState;

#[derive(Serialize)]
pub struct JobListResponse {
    pub items: Vec<JobRecord>,
}

/// GET /jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<JobListResponse>, AppError> {
    let items = state.jobs.list_all().await?;
    Ok(Json(JobListResponse { items }))
}

/// POST /jobs
/// A body that is not a JSON object is read as an empty request, so it fails on
/// the missing title. Wrong-typed fields are tolerated (see `CreateJobRequest`).
pub async fn handle_create_job(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<JobRecord>), AppError> {
    let req: CreateJobRequest = serde_json::from_slice(&body).unwrap_or_default();

    let title = req
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("title is required".to_string()))?;

    let job = JobRecord::new(
        title,
        req.description.unwrap_or_default(),
        req.required_skills.unwrap_or_default(),
    );
    state.jobs.create(&job).await?;

    Ok((StatusCode::CREATED, Json(job)))
}
