//! Ingestion Orchestrator — one queued document reference in, one persisted
//! candidate out.
//!
//! Flow per message: RECEIVED → EXTRACTED → PARSED → MATCHED → PERSISTED.
//! Messages in a batch are processed one at a time and independently: a failed
//! message is reported, never retried here, and never stops the rest of the
//! batch. Retry and dead-lettering belong to the queue layer (`worker`).

pub mod handlers;
pub mod worker;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::extraction::{extract_text, DocumentRef, ExtractionError, TextExtractor};
use crate::matching::MatchScorer;
use crate::models::candidate::CandidateProfile;
use crate::profile::parse_profile;
use crate::queue::QueueMessage;
use crate::repository::{CandidateRepository, JobRepository};

/// Everything the pipeline needs, built once at startup and passed in.
#[derive(Clone)]
pub struct IngestContext {
    pub extractor: Arc<dyn TextExtractor>,
    pub jobs: Arc<dyn JobRepository>,
    pub candidates: Arc<dyn CandidateRepository>,
    pub matcher: Arc<dyn MatchScorer>,
    /// Used when a message carries no bucket.
    pub default_bucket: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    Received,
    Extracted,
    Parsed,
    Matched,
    Persisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    InvalidJson,
    MissingKey,
    MissingBucket,
}

/// What to do with a queued message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageDisposition {
    Skip(SkipReason),
    Process(DocumentRef),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("text extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("job lookup failed: {0}")]
    JobLookup(anyhow::Error),

    #[error("candidate write failed: {0}")]
    Persist(anyhow::Error),
}

impl IngestError {
    /// The stage the message had reached when it failed.
    pub fn stage(&self) -> IngestStage {
        match self {
            IngestError::Extraction(_) => IngestStage::Received,
            IngestError::JobLookup(_) => IngestStage::Parsed,
            IngestError::Persist(_) => IngestStage::Matched,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageOutcome {
    Skipped(SkipReason),
    Persisted { candidate_id: Uuid, matches: usize },
}

#[derive(Debug, Clone)]
pub struct FailedMessage {
    pub body: String,
    pub stage: IngestStage,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub persisted: Vec<Uuid>,
    pub skipped: usize,
    pub failed: Vec<FailedMessage>,
}

/// Decides whether a message body names a document. Missing bucket falls back
/// to `default_bucket`; anything else incomplete is skipped.
pub fn resolve_message(body: &str, default_bucket: Option<&str>) -> MessageDisposition {
    let message: QueueMessage = match serde_json::from_str(body) {
        Ok(m) => m,
        Err(_) => return MessageDisposition::Skip(SkipReason::InvalidJson),
    };

    let Some(key) = message.key.filter(|k| !k.is_empty()) else {
        return MessageDisposition::Skip(SkipReason::MissingKey);
    };

    let bucket = message
        .bucket
        .filter(|b| !b.is_empty())
        .or_else(|| default_bucket.filter(|b| !b.is_empty()).map(String::from));

    match bucket {
        Some(bucket) => MessageDisposition::Process(DocumentRef { bucket, key }),
        None => MessageDisposition::Skip(SkipReason::MissingBucket),
    }
}

/// Runs one message through the full pipeline.
pub async fn process_message(ctx: &IngestContext, body: &str) -> Result<MessageOutcome, IngestError> {
    let document = match resolve_message(body, ctx.default_bucket.as_deref()) {
        MessageDisposition::Process(document) => document,
        MessageDisposition::Skip(reason) => {
            warn!("Skipping queue message ({reason:?}): {body}");
            return Ok(MessageOutcome::Skipped(reason));
        }
    };
    debug!("{document}: {:?}", IngestStage::Received);

    let text = extract_text(ctx.extractor.as_ref(), &document).await?;
    debug!("{document}: {:?} ({} chars)", IngestStage::Extracted, text.len());

    let parsed = parse_profile(&text);
    debug!(
        "{document}: {:?} (name={:?}, {} skills)",
        IngestStage::Parsed,
        parsed.name,
        parsed.skills.len()
    );

    let jobs = ctx.jobs.list_all().await.map_err(IngestError::JobLookup)?;
    let matches = ctx.matcher.rank(&parsed.skills, &jobs);
    debug!(
        "{document}: {:?} ({} of {} jobs via {})",
        IngestStage::Matched,
        matches.len(),
        jobs.len(),
        ctx.matcher.backend()
    );

    let profile = CandidateProfile::assemble(parsed, &document, matches);
    ctx.candidates
        .insert(&profile)
        .await
        .map_err(IngestError::Persist)?;
    info!(
        "{document}: {:?} as candidate {}",
        IngestStage::Persisted,
        profile.candidate_id
    );

    Ok(MessageOutcome::Persisted {
        candidate_id: profile.candidate_id,
        matches: profile.matches.len(),
    })
}

/// Processes a delivered batch sequentially. Each message succeeds, is
/// skipped, or fails on its own.
pub async fn process_batch(ctx: &IngestContext, bodies: &[String]) -> BatchReport {
    let mut report = BatchReport::default();

    for body in bodies {
        match process_message(ctx, body).await {
            Ok(MessageOutcome::Persisted {
                candidate_id,
                matches,
            }) => {
                debug!("Candidate {candidate_id} stored with {matches} matches");
                report.persisted.push(candidate_id);
            }
            Ok(MessageOutcome::Skipped(_)) => report.skipped += 1,
            Err(e) => {
                error!("Ingestion failed at {:?}: {e} (message: {body})", e.stage());
                report.failed.push(FailedMessage {
                    body: body.clone(),
                    stage: e.stage(),
                    error: e.to_string(),
                });
            }
        }
    }

    report
}
