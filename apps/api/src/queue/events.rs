//! Enqueue adapter — object-storage notifications to queue messages.
//!
//! One message per notification record, no aggregation. Records without a
//! bucket name or object key are dropped.

use std::borrow::Cow;

use serde::Deserialize;

use crate::queue::QueueMessage;

/// S3 event notification, reduced to the fields we read.
#[derive(Debug, Default, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct S3EventRecord {
    #[serde(default)]
    pub s3: S3Entity,
}

#[derive(Debug, Default, Deserialize)]
pub struct S3Entity {
    #[serde(default)]
    pub bucket: S3Bucket,
    #[serde(default)]
    pub object: S3Object,
}

#[derive(Debug, Default, Deserialize)]
pub struct S3Bucket {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct S3Object {
    pub key: Option<String>,
}

/// Translates every complete record into a queue message, in record order.
pub fn messages_from_event(event: &S3Event) -> Vec<QueueMessage> {
    event
        .records
        .iter()
        .filter_map(|record| {
            let bucket = record.s3.bucket.name.as_deref().filter(|b| !b.is_empty())?;
            let key = record.s3.object.key.as_deref().filter(|k| !k.is_empty())?;
            Some(QueueMessage::new(bucket, decode_object_key(key)))
        })
        .collect()
}

/// Keys in S3 notifications are form-encoded: spaces arrive as `+` and other
/// reserved characters as `%XX`. Undecodable keys are passed through as-is.
pub fn decode_object_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .unwrap_or(spaced)
}
