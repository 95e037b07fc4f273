use std::collections::HashSet;

use crate::matching::{MatchScorer, MAX_MATCHES};
use crate::models::candidate::JobMatch;
use crate::models::job::JobRecord;

/// Skill-set overlap scorer. Deterministic, no I/O.
///
/// Algorithm:
/// 1. Lowercase the candidate skills and each job's required skills.
/// 2. Skip jobs whose required-skill set is empty.
/// 3. score = |candidate ∩ job| / |candidate ∪ job|; keep only score > 0.
/// 4. Stable sort descending (equal scores keep job-scan order), round to
///    three decimals, keep the first `MAX_MATCHES`.
pub struct JaccardMatcher;

impl MatchScorer for JaccardMatcher {
    fn rank(&self, candidate_skills: &[String], jobs: &[JobRecord]) -> Vec<JobMatch> {
        compute_matches(candidate_skills, jobs)
    }

    fn backend(&self) -> &'static str {
        "jaccard"
    }
}

pub fn compute_matches(candidate_skills: &[String], jobs: &[JobRecord]) -> Vec<JobMatch> {
    let candidate: HashSet<String> = candidate_skills.iter().map(|s| s.to_lowercase()).collect();

    let mut scored: Vec<(&JobRecord, f64)> = jobs
        .iter()
        .filter_map(|job| {
            let required = normalize_required_skills(&job.required_skills);
            if required.is_empty() {
                return None;
            }
            let score = jaccard_similarity(&candidate, &required);
            (score > 0.0).then_some((job, score))
        })
        .collect();

    // sort_by is stable, which keeps scan order for ties
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(MAX_MATCHES)
        .map(|(job, score)| JobMatch {
            job_id: job.job_id,
            score: round3(score),
        })
        .collect()
}

/// |a ∩ b| / |a ∪ b|. Two empty sets score 0.0.
pub fn jaccard_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

fn normalize_required_skills(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

/// Half-way cases round to even (1/16 -> 0.062).
fn round3(score: f64) -> f64 {
    (score * 1000.0).round_ties_even() / 1000.0
}
