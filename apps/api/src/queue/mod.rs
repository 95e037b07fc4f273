//! Résumé work queue.
//!
//! Messages are small JSON documents naming an uploaded object. `events`
//! translates object-storage notifications into messages; `redis_queue` carries
//! them to the ingest worker.

pub mod events;
#[cfg(test)]
pub mod memory;
pub mod redis_queue;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use redis_queue::RedisQueue;

/// Body of a queued ingestion request. Both fields are optional on the wire;
/// the orchestrator decides what an incomplete message means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl QueueMessage {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: Some(bucket.into()),
            key: Some(key.into()),
        }
    }
}

#[async_trait]
pub trait ResumeQueue: Send + Sync {
    async fn push(&self, message: &QueueMessage) -> Result<()>;

    /// Waits up to the queue's poll interval for the first message, then takes
    /// whatever else is immediately available, up to `max` raw bodies in total.
    /// An empty batch means the wait timed out.
    async fn pop_batch(&self, max: usize) -> Result<Vec<String>>;

    /// Parks a body that failed processing so an operator can re-drive it.
    async fn dead_letter(&self, body: &str) -> Result<()>;
}
