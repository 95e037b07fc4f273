use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::queue::events::{messages_from_event, S3Event};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EnqueueResponse {
    pub message: String,
    pub enqueued: usize,
}

/// POST /events/s3
/// Translates an object-storage notification into one queue message per record.
pub async fn handle_s3_event(
    State(state): State<AppState>,
    Json(event): Json<S3Event>,
) -> Result<Json<EnqueueResponse>, AppError> {
    let messages = messages_from_event(&event);
    for message in &messages {
        state
            .queue
            .push(message)
            .await
            .map_err(|e| AppError::Queue(e.to_string()))?;
    }

    Ok(Json(EnqueueResponse {
        message: "Enqueued resumes for processing".to_string(),
        enqueued: messages.len(),
    }))
}
