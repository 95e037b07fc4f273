use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// An open requisition that candidates are scored against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobRecord {
    #[serde(rename = "jobId")]
    pub job_id: Uuid,
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl JobRecord {
    /// Mints a new job under a fresh identifier.
    pub fn new(title: String, description: String, required_skills: Vec<String>) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            title,
            description,
            required_skills,
            created_at: Utc::now(),
        }
    }
}

/// Request body for POST /jobs. Every field is optional so a missing title
/// surfaces as a validation error rather than a deserialization rejection.
/// Fields of the wrong type read as absent; non-string skills are dropped.
#[derive(Debug, Default, Deserialize)]
pub struct CreateJobRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_skills")]
    pub required_skills: Option<Vec<String>>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_skills<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}
