use anyhow::Result;
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::candidate::{CandidateProfile, CandidateRow};
use crate::models::job::JobRecord;
use crate::repository::{CandidateRepository, JobRepository};

#[derive(Clone)]
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    // Full scan. Fine while the job table stays small; an indexed skill lookup
    // would replace this if it grows.
    async fn list_all(&self) -> Result<Vec<JobRecord>> {
        Ok(sqlx::query_as::<_, JobRecord>(
            r#"
            SELECT job_id, title, description, required_skills, created_at
            FROM jobs
            ORDER BY created_at ASC, job_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create(&self, job: &JobRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO jobs (job_id, title, description, required_skills, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(job.job_id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.required_skills)
        .bind(job.created_at)
        .execute(&self.pool)
        .await?;

        info!("Inserted job {} ({})", job.job_id, job.title);
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgCandidateRepository {
    pool: PgPool,
}

impl PgCandidateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateRepository for PgCandidateRepository {
    async fn insert(&self, profile: &CandidateProfile) -> Result<()> {
        // Append-only: a re-ingested document gets a new row under a new id.
        sqlx::query(
            r#"
            INSERT INTO candidates
                (candidate_id, name, email, total_experience_years, skills, titles,
                 raw_text, source_object_key, source_bucket, matches, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(profile.candidate_id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(profile.total_experience_years)
        .bind(&profile.skills)
        .bind(&profile.titles)
        .bind(&profile.raw_text)
        .bind(&profile.source_object_key)
        .bind(&profile.source_bucket)
        .bind(Json(&profile.matches))
        .bind(profile.created_at)
        .execute(&self.pool)
        .await?;

        info!(
            "Inserted candidate {} from s3://{}/{}",
            profile.candidate_id, profile.source_bucket, profile.source_object_key
        );
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CandidateProfile>> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            "SELECT * FROM candidates ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(CandidateProfile::from).collect())
    }

    async fn get(&self, candidate_id: Uuid) -> Result<Option<CandidateProfile>> {
        let row = sqlx::query_as::<_, CandidateRow>(
            "SELECT * FROM candidates WHERE candidate_id = $1",
        )
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(CandidateProfile::from))
    }
}
