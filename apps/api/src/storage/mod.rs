//! Best-effort persistence of the original upload to object storage.
//!
//! Callers treat every error from this module as non-fatal: a failed upload
//! or signing call is logged and the analysis proceeds without a retrieval
//! URL.

use anyhow::{Context, Result};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::info;

/// Retrieval URLs are valid for one hour.
const SIGNED_URL_TTL: std::time::Duration = std::time::Duration::from_secs(3600);

pub struct UploadSink {
    client: S3Client,
    bucket: String,
}

impl UploadSink {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// Uploads the original file and returns a time-limited retrieval URL.
    pub async fn store(
        &self,
        original_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<String> {
        let key = object_key(original_name, Utc::now());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .with_context(|| format!("uploading {key} to bucket {}", self.bucket))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .presigned(
                PresigningConfig::expires_in(SIGNED_URL_TTL)
                    .context("building presigning config")?,
            )
            .await
            .with_context(|| format!("signing retrieval URL for {key}"))?;

        info!("Stored upload as {key}");
        Ok(presigned.uri().to_string())
    }
}

/// Object keys are `{upload-millis}_{name}` with whitespace collapsed to
/// underscores, matching what older clients already expect to see in the
/// bucket.
fn object_key(original_name: &str, now: DateTime<Utc>) -> String {
    let sanitized: String = original_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("{}_{}", now.timestamp_millis(), sanitized)
}
