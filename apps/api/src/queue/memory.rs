use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::queue::{QueueMessage, ResumeQueue};

/// In-process queue for tests. Never blocks: an empty queue yields an empty batch.
#[derive(Default)]
pub struct MemoryQueue {
    pending: Mutex<VecDeque<String>>,
    dead: Mutex<Vec<String>>,
    reject_dead: Vec<String>,
}

impl MemoryQueue {
    /// A queue whose dead-letter push fails for the given bodies.
    pub fn rejecting_dead_letters(bodies: &[&str]) -> Self {
        Self {
            reject_dead: bodies.iter().map(|b| b.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn push_raw(&self, body: &str) {
        self.pending.lock().unwrap().push_back(body.to_string());
    }

    pub fn pending(&self) -> Vec<String> {
        self.pending.lock().unwrap().iter().cloned().collect()
    }

    pub fn dead_letters(&self) -> Vec<String> {
        self.dead.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResumeQueue for MemoryQueue {
    async fn push(&self, message: &QueueMessage) -> Result<()> {
        self.push_raw(&serde_json::to_string(message)?);
        Ok(())
    }

    async fn pop_batch(&self, max: usize) -> Result<Vec<String>> {
        let mut pending = self.pending.lock().unwrap();
        let take = max.min(pending.len());
        Ok(pending.drain(..take).collect())
    }

    async fn dead_letter(&self, body: &str) -> Result<()> {
        if self.reject_dead.iter().any(|b| b == body) {
            bail!("dead-letter push rejected");
        }
        self.dead.lock().unwrap().push(body.to_string());
        Ok(())
    }
}
