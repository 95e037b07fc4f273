use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{CandidateProfile, CandidateSummary};
use crate::state::AppState;

#[derive(Serialize)]
pub struct CandidateListResponse {
    pub items: Vec<CandidateSummary>,
}

/// GET /candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<CandidateListResponse>, AppError> {
    let items = state
        .candidates
        .list()
        .await?
        .iter()
        .map(CandidateProfile::summary)
        .collect();
    Ok(Json(CandidateListResponse { items }))
}

/// GET /candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CandidateProfile>, AppError> {
    Ok(Json(load_candidate(&state, &id).await?))
}

/// GET /candidates/:id/report
/// Same document as the detail view, served as a JSON file download.
pub async fn handle_candidate_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let profile = load_candidate(&state, &id).await?;
    let body = serde_json::to_string_pretty(&profile).map_err(anyhow::Error::from)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"candidate-{}.json\"", profile.candidate_id),
            ),
        ],
        body,
    )
        .into_response())
}

/// Ids that are not UUIDs cannot exist, so they are reported as not found.
async fn load_candidate(state: &AppState, id: &str) -> Result<CandidateProfile, AppError> {
    let not_found = || AppError::NotFound("Candidate not found".to_string());
    let candidate_id = Uuid::parse_str(id).map_err(|_| not_found())?;
    state.candidates.get(candidate_id).await?.ok_or_else(not_found)
}
