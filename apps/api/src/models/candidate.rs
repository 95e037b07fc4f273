use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::extraction::DocumentRef;
use crate::profile::ParsedProfile;

/// A single ranked job for a candidate. Scores are Jaccard similarities rounded
/// to three decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    #[serde(rename = "jobId")]
    pub job_id: Uuid,
    pub score: f64,
}

/// Fully ingested candidate. Written once per ingested document and never
/// updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(rename = "candidateId")]
    pub candidate_id: Uuid,
    pub name: String,
    pub email: String,
    pub total_experience_years: f64,
    pub skills: Vec<String>,
    pub titles: Vec<String>,
    pub raw_text: String,
    #[serde(rename = "sourceObjectKey")]
    pub source_object_key: String,
    #[serde(rename = "sourceBucket")]
    pub source_bucket: String,
    pub matches: Vec<JobMatch>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl CandidateProfile {
    /// Completes a parsed profile with a freshly minted identifier, its source
    /// document and the ranked matches computed for it.
    pub fn assemble(parsed: ParsedProfile, source: &DocumentRef, matches: Vec<JobMatch>) -> Self {
        Self {
            candidate_id: Uuid::new_v4(),
            name: parsed.name,
            email: parsed.email,
            total_experience_years: parsed.total_experience_years,
            skills: parsed.skills,
            titles: parsed.titles,
            raw_text: parsed.raw_text,
            source_object_key: source.key.clone(),
            source_bucket: source.bucket.clone(),
            matches,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> CandidateSummary {
        CandidateSummary {
            candidate_id: self.candidate_id,
            name: self.name.clone(),
            email: self.email.clone(),
            total_experience_years: self.total_experience_years,
            skills: self.skills.clone(),
            matches: self.matches.clone(),
        }
    }
}

/// List-view projection returned by GET /candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSummary {
    #[serde(rename = "candidateId")]
    pub candidate_id: Uuid,
    pub name: String,
    pub email: String,
    pub total_experience_years: f64,
    pub skills: Vec<String>,
    pub matches: Vec<JobMatch>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub candidate_id: Uuid,
    pub name: String,
    pub email: String,
    pub total_experience_years: f64,
    pub skills: Vec<String>,
    pub titles: Vec<String>,
    pub raw_text: String,
    pub source_object_key: String,
    pub source_bucket: String,
    pub matches: Json<Vec<JobMatch>>,
    pub created_at: DateTime<Utc>,
}

impl From<CandidateRow> for CandidateProfile {
    fn from(row: CandidateRow) -> Self {
        Self {
            candidate_id: row.candidate_id,
            name: row.name,
            email: row.email,
            total_experience_years: row.total_experience_years,
            skills: row.skills,
            titles: row.titles,
            raw_text: row.raw_text,
            source_object_key: row.source_object_key,
            source_bucket: row.source_bucket,
            matches: row.matches.0,
            created_at: row.created_at,
        }
    }
}
