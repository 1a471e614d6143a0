//! Supabase Storage uploads and public URL resolution.
//!
//! Speaks the Storage REST API directly: objects are created with
//! `POST {project}/storage/v1/object/{bucket}/{key}` under the service-role
//! key, and read back from the unauthenticated
//! `{project}/storage/v1/object/public/{bucket}/{key}` path. Uploads never
//! overwrite: `x-upsert` is off, and key uniqueness is the caller's problem.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use tracing::debug;

use super::{bearer_headers, shared_client, AudioStore};
use crate::config::{Config, DEFAULT_BUCKET};
use crate::error::PapercastError;

/// Object storage client for a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseStorage {
    project_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(project_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            project_url: project_url.into(),
            service_key: service_key.into(),
            bucket: DEFAULT_BUCKET.to_string(),
        }
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Construct from a validated [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            project_url: config.supabase_url.clone(),
            service_key: config.supabase_service_key.clone(),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl AudioStore for SupabaseStorage {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        cache_control: &str,
    ) -> Result<(), PapercastError> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.project_url, self.bucket, key
        );

        let mut headers = bearer_headers(&self.service_key);
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(content_type)
                .map_err(|e| PapercastError::Storage(format!("bad content type: {}", e)))?,
        );
        headers.insert(
            CACHE_CONTROL,
            HeaderValue::from_str(&format!("max-age={}", cache_control))
                .map_err(|e| PapercastError::Storage(format!("bad cache directive: {}", e)))?,
        );
        headers.insert("x-upsert", HeaderValue::from_static("false"));

        debug!(
            "Uploading {} bytes to bucket '{}' as '{}'",
            bytes.len(),
            self.bucket,
            key
        );

        let response = shared_client()
            .post(&url)
            .headers(headers)
            .body(bytes)
            .send()
            .await
            .map_err(|e| PapercastError::Storage(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_storage_error_message(&body)
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(PapercastError::Storage(format!(
                "HTTP {}: {}",
                status.as_u16(),
                message
            )));
        }

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.project_url, self.bucket, key
        )
    }
}

/// Pull the message out of a Storage API error body
/// (`{"statusCode": "...", "error": "...", "message": "..."}`).
fn extract_storage_error_message(body: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    parsed
        .get("message")
        .or_else(|| parsed.get("error"))
        .and_then(|message| message.as_str())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_bucket() {
        let store = SupabaseStorage::new("https://project.supabase.co", "service-key");
        assert_eq!(store.bucket, "audio-files");
    }

    #[test]
    fn test_public_url_shape() {
        let store =
            SupabaseStorage::new("https://project.supabase.co", "service-key").with_bucket("casts");
        assert_eq!(
            store.public_url("123-audio.mp3"),
            "https://project.supabase.co/storage/v1/object/public/casts/123-audio.mp3"
        );
    }

    #[test]
    fn test_storage_error_message_extraction() {
        let body = r#"{"statusCode": "404", "error": "Bucket not found", "message": "Bucket not found"}"#;
        assert_eq!(
            extract_storage_error_message(body).as_deref(),
            Some("Bucket not found")
        );
        let error_only = r#"{"error": "denied"}"#;
        assert_eq!(
            extract_storage_error_message(error_only).as_deref(),
            Some("denied")
        );
        assert_eq!(extract_storage_error_message("<html>"), None);
    }
}
