use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    /// Redis list the ingest worker consumes.
    pub queue_name: String,
    /// Bucket assumed for queue messages that do not name one.
    pub resume_bucket: Option<String>,
    pub s3_endpoint: String,
    pub aws_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub ingest_batch_size: usize,
    pub ingest_poll_secs: u64,
    pub ingest_worker_enabled: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            queue_name: require_env("RESUME_QUEUE_NAME")?,
            resume_bucket: optional_env("RESUME_BUCKET_NAME"),
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_region: optional_env("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            ingest_batch_size: optional_env("INGEST_BATCH_SIZE")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("INGEST_BATCH_SIZE must be a positive integer")?
                .unwrap_or(10)
                .max(1),
            ingest_poll_secs: optional_env("INGEST_POLL_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("INGEST_POLL_SECS must be a number of seconds")?
                .unwrap_or(5),
            ingest_worker_enabled: optional_env("INGEST_WORKER_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and empty are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        for truthy in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(truthy), "{truthy}");
        }
        for falsy in ["0", "false", "off", "nope"] {
            assert!(!parse_flag(falsy), "{falsy}");
        }
    }
}
