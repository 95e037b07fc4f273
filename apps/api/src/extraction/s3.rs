use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use tracing::{debug, info};

use crate::extraction::{split_lines, DocumentRef, ExtractionError, TextExtractor};

/// How an object's bytes are turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Key suffix wins over the stored content type, since uploads from browsers
    /// often arrive as `application/octet-stream`.
    fn detect(key: &str, content_type: Option<&str>) -> Option<Self> {
        let key = key.to_lowercase();
        if key.ends_with(".pdf") {
            return Some(Self::Pdf);
        }
        if key.ends_with(".txt") || key.ends_with(".md") {
            return Some(Self::PlainText);
        }
        match content_type.map(|ct| ct.to_lowercase()) {
            Some(ct) if ct.starts_with("application/pdf") => Some(Self::Pdf),
            Some(ct) if ct.starts_with("text/") => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// Fetches résumé objects from S3 (or MinIO) and recognizes their text.
#[derive(Clone)]
pub struct S3TextExtractor {
    client: S3Client,
}

impl S3TextExtractor {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TextExtractor for S3TextExtractor {
    async fn extract_lines(&self, document: &DocumentRef) -> Result<Vec<String>, ExtractionError> {
        let output = self
            .client
            .get_object()
            .bucket(&document.bucket)
            .key(&document.key)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    ExtractionError::NotFound {
                        bucket: document.bucket.clone(),
                        key: document.key.clone(),
                    }
                } else {
                    ExtractionError::Storage(format!("GetObject failed: {service_error}"))
                }
            })?;

        let content_type = output.content_type().map(String::from);
        let kind = DocumentKind::detect(&document.key, content_type.as_deref()).ok_or_else(|| {
            ExtractionError::Unsupported(
                content_type.unwrap_or_else(|| "application/octet-stream".to_string()),
            )
        })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| ExtractionError::Storage(format!("reading object body failed: {e}")))?
            .into_bytes();

        debug!("Fetched {document} ({} bytes, {kind:?})", bytes.len());

        let text = match kind {
            DocumentKind::PlainText => String::from_utf8_lossy(&bytes).into_owned(),
            // PDF decoding is CPU-bound; keep it off the async executor.
            DocumentKind::Pdf => tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&bytes)
            })
            .await
            .map_err(|e| ExtractionError::Unreadable(format!("extraction task failed: {e}")))?
            .map_err(|e| ExtractionError::Unreadable(e.to_string()))?,
        };

        let lines = split_lines(&text);
        info!("Recognized {} lines from {document}", lines.len());
        Ok(lines)
    }
}
