use std::sync::Arc;

use crate::queue::ResumeQueue;
use crate::repository::{CandidateRepository, JobRepository};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobRepository>,
    pub candidates: Arc<dyn CandidateRepository>,
    /// Destination for translated storage events.
    pub queue: Arc<dyn ResumeQueue>,
}
