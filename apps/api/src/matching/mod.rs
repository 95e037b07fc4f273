//! Matching Engine — ranks job requisitions for a candidate skill set.
//!
//! `IngestContext` holds an `Arc<dyn MatchScorer>`; `JaccardMatcher` is the
//! default and only backend. The engine only sees a slice of jobs, so how the
//! jobs were fetched (full scan today) is not its concern.

pub mod jaccard;

use crate::models::candidate::JobMatch;
use crate::models::job::JobRecord;

pub use jaccard::JaccardMatcher;

/// Upper bound on matches stored per candidate.
pub const MAX_MATCHES: usize = 10;

/// Pluggable ranking backend.
pub trait MatchScorer: Send + Sync {
    /// Returns at most `MAX_MATCHES` jobs, best first. Jobs that score zero
    /// are omitted.
    fn rank(&self, candidate_skills: &[String], jobs: &[JobRecord]) -> Vec<JobMatch>;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}
