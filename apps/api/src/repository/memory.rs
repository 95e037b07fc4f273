use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::candidate::CandidateProfile;
use crate::models::job::JobRecord;
use crate::repository::{CandidateRepository, JobRepository};

/// In-process job store for tests. Preserves insertion order.
#[derive(Default)]
pub struct MemoryJobRepository {
    jobs: Mutex<Vec<JobRecord>>,
}

impl MemoryJobRepository {
    pub fn with_jobs(jobs: Vec<JobRecord>) -> Self {
        Self {
            jobs: Mutex::new(jobs),
        }
    }
}

#[async_trait]
impl JobRepository for MemoryJobRepository {
    async fn list_all(&self) -> Result<Vec<JobRecord>> {
        Ok(self.jobs.lock().unwrap().clone())
    }

    async fn create(&self, job: &JobRecord) -> Result<()> {
        self.jobs.lock().unwrap().push(job.clone());
        Ok(())
    }
}

/// In-process candidate store for tests. Keys listed in `fail_on_keys` make
/// `insert` fail, to exercise persistence errors.
#[derive(Default)]
pub struct MemoryCandidateRepository {
    candidates: Mutex<Vec<CandidateProfile>>,
    fail_on_keys: Vec<String>,
}

impl MemoryCandidateRepository {
    pub fn failing_on(keys: &[&str]) -> Self {
        Self {
            candidates: Mutex::new(Vec::new()),
            fail_on_keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn snapshot(&self) -> Vec<CandidateProfile> {
        self.candidates.lock().unwrap().clone()
    }
}

#[async_trait]
impl CandidateRepository for MemoryCandidateRepository {
    async fn insert(&self, profile: &CandidateProfile) -> Result<()> {
        if self.fail_on_keys.contains(&profile.source_object_key) {
            bail!("write rejected for {}", profile.source_object_key);
        }
        self.candidates.lock().unwrap().push(profile.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CandidateProfile>> {
        let mut all = self.snapshot();
        all.reverse();
        Ok(all)
    }

    async fn get(&self, candidate_id: Uuid) -> Result<Option<CandidateProfile>> {
        Ok(self
            .candidates
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.candidate_id == candidate_id)
            .cloned())
    }
}
