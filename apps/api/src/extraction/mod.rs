//! Text Extraction Adapter — turns a stored document into ordered text lines.
//!
//! The recognition capability itself is opaque to the rest of the service: the
//! orchestrator only sees `TextExtractor`. `S3TextExtractor` is the production
//! backend.

pub mod s3;

use async_trait::async_trait;
use thiserror::Error;

pub use s3::S3TextExtractor;

/// Location of an uploaded document in object storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub bucket: String,
    pub key: String,
}

impl std::fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document s3://{bucket}/{key} not found")]
    NotFound { bucket: String, key: String },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("document could not be read: {0}")]
    Unreadable(String),

    #[error("unsupported document type: {0}")]
    Unsupported(String),
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Recognized lines in reading order. Blank lines are not returned.
    async fn extract_lines(&self, document: &DocumentRef) -> Result<Vec<String>, ExtractionError>;
}

/// Recognized text of a document, lines joined with `\n`.
pub async fn extract_text(
    extractor: &dyn TextExtractor,
    document: &DocumentRef,
) -> Result<String, ExtractionError> {
    let lines = extractor.extract_lines(document).await?;
    Ok(lines.join("\n"))
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits on every line boundary, including a lone `\r`, form feeds and
/// Unicode line separators. `\r\n` yields an extra empty segment.
pub fn raw_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_line_break)
}

/// Splits raw recognizer output into trimmed, non-empty lines.
pub fn split_lines(text: &str) -> Vec<String> {
    raw_lines(text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
