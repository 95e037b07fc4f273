use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::Client as RedisClient;
use tracing::debug;

use crate::queue::{QueueMessage, ResumeQueue};

/// Redis list used as a FIFO: producers LPUSH, the worker BRPOPs.
#[derive(Clone)]
pub struct RedisQueue {
    client: RedisClient,
    list_key: String,
    dead_letter_key: String,
    poll_timeout: Duration,
}

impl RedisQueue {
    pub fn new(client: RedisClient, list_key: &str, poll_timeout: Duration) -> Self {
        Self {
            client,
            list_key: list_key.to_string(),
            dead_letter_key: format!("{list_key}:dead"),
            poll_timeout,
        }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")
    }
}

#[async_trait]
impl ResumeQueue for RedisQueue {
    async fn push(&self, message: &QueueMessage) -> Result<()> {
        let body = serde_json::to_string(message)?;
        let mut conn = self.connection().await?;
        let _: i64 = redis::cmd("LPUSH")
            .arg(&self.list_key)
            .arg(&body)
            .query_async(&mut conn)
            .await
            .with_context(|| format!("LPUSH to {} failed", self.list_key))?;
        debug!("Enqueued {body} on {}", self.list_key);
        Ok(())
    }

    async fn pop_batch(&self, max: usize) -> Result<Vec<String>> {
        if max == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.connection().await?;

        let first: Option<(String, String)> = redis::cmd("BRPOP")
            .arg(&self.list_key)
            .arg(self.poll_timeout.as_secs().max(1))
            .query_async(&mut conn)
            .await
            .with_context(|| format!("BRPOP on {} failed", self.list_key))?;

        let Some((_, body)) = first else {
            return Ok(Vec::new());
        };
        let mut batch = vec![body];

        if max > 1 {
            let rest: Option<Vec<String>> = redis::cmd("RPOP")
                .arg(&self.list_key)
                .arg(max - 1)
                .query_async(&mut conn)
                .await
                .with_context(|| format!("RPOP on {} failed", self.list_key))?;
            batch.extend(rest.unwrap_or_default());
        }

        Ok(batch)
    }

    async fn dead_letter(&self, body: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: i64 = redis::cmd("LPUSH")
            .arg(&self.dead_letter_key)
            .arg(body)
            .query_async(&mut conn)
            .await
            .with_context(|| format!("LPUSH to {} failed", self.dead_letter_key))?;
        Ok(())
    }
}
