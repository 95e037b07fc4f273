//! Candidate and job persistence.
//!
//! Handlers and the ingestion pipeline depend on the traits only; `postgres`
//! holds the sqlx-backed implementations.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::candidate::CandidateProfile;
use crate::models::job::JobRecord;

pub use postgres::{PgCandidateRepository, PgJobRepository};

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Every job, oldest first. This order is the "scan order" the matcher
    /// preserves for equal scores.
    async fn list_all(&self) -> Result<Vec<JobRecord>>;

    async fn create(&self, job: &JobRecord) -> Result<()>;
}

#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Writes a new candidate. Profiles are never updated in place.
    async fn insert(&self, profile: &CandidateProfile) -> Result<()>;

    /// Every candidate, newest first.
    async fn list(&self) -> Result<Vec<CandidateProfile>>;

    async fn get(&self, candidate_id: Uuid) -> Result<Option<CandidateProfile>>;
}
