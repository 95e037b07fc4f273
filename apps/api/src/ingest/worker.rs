use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::ingest::{process_batch, BatchReport, IngestContext};
use crate::queue::ResumeQueue;

/// Pops one batch, processes it, and dead-letters every failed body.
/// Returns `None` when the poll timed out with nothing to do. Only the pop can
/// fail the call: a body that cannot be dead-lettered is logged and the rest of
/// the batch is still parked.
pub async fn run_once(
    ctx: &IngestContext,
    queue: &dyn ResumeQueue,
    batch_size: usize,
) -> anyhow::Result<Option<BatchReport>> {
    let bodies = queue.pop_batch(batch_size).await?;
    if bodies.is_empty() {
        return Ok(None);
    }

    let report = process_batch(ctx, &bodies).await;
    let mut unparked = 0;
    for failed in &report.failed {
        if let Err(e) = queue.dead_letter(&failed.body).await {
            unparked += 1;
            error!("Could not dead-letter body {}: {e:?}", failed.body);
        }
    }

    info!(
        "Batch of {}: {} persisted, {} skipped, {} failed",
        bodies.len(),
        report.persisted.len(),
        report.skipped,
        report.failed.len()
    );
    if unparked > 0 {
        warn!("{unparked} failed bodies were dropped after dead-lettering failed");
    }
    Ok(Some(report))
}

/// Long-running ingest loop. Queue errors are logged and retried after
/// `retry_delay`; the loop only ends with the process.
pub async fn run_worker(
    ctx: IngestContext,
    queue: Arc<dyn ResumeQueue>,
    batch_size: usize,
    retry_delay: Duration,
) {
    info!("Ingest worker started (batch size {batch_size})");
    loop {
        if let Err(e) = run_once(&ctx, queue.as_ref(), batch_size).await {
            error!("Ingest worker queue error: {e:?}");
            warn!("Retrying queue in {}s", retry_delay.as_secs());
            tokio::time::sleep(retry_delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::testing::StaticExtractor;
    use crate::matching::JaccardMatcher;
    use crate::queue::memory::MemoryQueue;
    use crate::repository::memory::{MemoryCandidateRepository, MemoryJobRepository};

    fn context(candidates: Arc<MemoryCandidateRepository>) -> IngestContext {
        IngestContext {
            extractor: Arc::new(
                StaticExtractor::default().with_document("cv.txt", "Sam Lee\nGo Developer\n3 years"),
            ),
            jobs: Arc::new(MemoryJobRepository::default()),
            candidates,
            matcher: Arc::new(JaccardMatcher),
            default_bucket: Some("resumes".to_string()),
        }
    }

    #[tokio::test]
    async fn test_empty_queue_returns_none() {
        let queue = MemoryQueue::default();
        let ctx = context(Arc::new(MemoryCandidateRepository::default()));
        assert!(run_once(&ctx, &queue, 10).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_bodies_are_dead_lettered() {
        let queue = MemoryQueue::default();
        queue.push_raw(r#"{"key":"cv.txt"}"#);
        queue.push_raw(r#"{"key":"missing.pdf"}"#);
        queue.push_raw(r#"{"bucket":"resumes"}"#);
        let candidates = Arc::new(MemoryCandidateRepository::default());
        let ctx = context(candidates.clone());

        let report = run_once(&ctx, &queue, 10).await.unwrap().unwrap();

        assert_eq!(report.persisted.len(), 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(queue.dead_letters(), vec![r#"{"key":"missing.pdf"}"#.to_string()]);
        assert_eq!(candidates.snapshot()[0].name, "Sam Lee");
        assert!(queue.pending().is_empty());
    }

    #[tokio::test]
    async fn test_dead_letter_error_does_not_drop_rest_of_batch() {
        let queue = MemoryQueue::rejecting_dead_letters(&[r#"{"key":"a.pdf"}"#]);
        queue.push_raw(r#"{"key":"a.pdf"}"#);
        queue.push_raw(r#"{"key":"b.pdf"}"#);
        queue.push_raw(r#"{"key":"cv.txt"}"#);
        queue.push_raw(r#"{"key":"c.pdf"}"#);
        let ctx = context(Arc::new(MemoryCandidateRepository::default()));

        let report = run_once(&ctx, &queue, 10).await.unwrap().unwrap();

        assert_eq!(report.failed.len(), 3);
        assert_eq!(report.persisted.len(), 1);
        assert_eq!(
            queue.dead_letters(),
            vec![r#"{"key":"b.pdf"}"#.to_string(), r#"{"key":"c.pdf"}"#.to_string()]
        );
    }

    #[tokio::test]
    async fn test_batch_size_bounds_pop() {
        let queue = MemoryQueue::default();
        for _ in 0..3 {
            queue.push_raw(r#"{"key":"cv.txt"}"#);
        }
        let ctx = context(Arc::new(MemoryCandidateRepository::default()));

        let report = run_once(&ctx, &queue, 2).await.unwrap().unwrap();
        assert_eq!(report.persisted.len(), 2);
        assert_eq!(queue.pending().len(), 1);
    }
}
