//! Profile Parser — turns recognized résumé text into a structured profile.
//!
//! Extraction is deliberately heuristic: a fixed skill vocabulary, a handful of
//! title indicator words and two regexes. Parsing never fails; missing data
//! degrades to empty values.

pub mod parser;
pub mod vocabulary;

use serde::{Deserialize, Serialize};

pub use parser::parse_profile;

/// Maximum number of characters of source text kept on a profile.
pub const RAW_TEXT_LIMIT: usize = 5000;

/// Name used when the text has no non-blank line.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Parser output. Identity, source and matches are attached by the ingestion
/// pipeline when the profile is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedProfile {
    pub name: String,
    pub email: String,
    pub total_experience_years: f64,
    /// Sorted, deduplicated vocabulary terms.
    pub skills: Vec<String>,
    /// Sorted, deduplicated lowercase lines.
    pub titles: Vec<String>,
    pub raw_text: String,
}
