//! External collaborator boundaries: narration, speech synthesis, storage.
//!
//! The orchestrator only ever sees the three traits defined here. The real
//! implementations ([`openai::OpenAiClient`], [`supabase::SupabaseStorage`])
//! talk REST over a shared `reqwest` client; tests substitute hand-rolled
//! fakes to drive the pipeline without a network.
//!
//! None of the providers retry or time out. A collaborator failure is
//! terminal for the request that triggered it, and the error carries the
//! upstream detail so the HTTP layer can surface it.

pub mod openai;
pub mod supabase;

use std::sync::OnceLock;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::PapercastError;

/// Rewrites paper text as a conversational narration script.
///
/// `Ok(None)` is the explicit absence signal for a model that answered
/// without content. Length is a soft target only; callers re-truncate.
#[async_trait]
pub trait NarrationGenerator: Send + Sync {
    async fn generate(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<Option<String>, PapercastError>;
}

/// Converts a narration script into audio bytes.
///
/// Implementations own the input-length ceiling (around 4,096 characters for
/// the OpenAI endpoint); callers must pre-truncate with margin.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, PapercastError>;
}

/// Durable object storage for produced audio.
///
/// Key choice is the caller's job; the store does not guarantee uniqueness.
/// `cache_control` is the cache lifetime in seconds, rendered into whatever
/// header the backing store expects.
#[async_trait]
pub trait AudioStore: Send + Sync {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        cache_control: &str,
    ) -> Result<(), PapercastError>;

    /// Public URL at which the object under `key` is retrievable.
    fn public_url(&self, key: &str) -> String;
}

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
///
/// One connection pool serves every provider for the process lifetime.
pub(crate) fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Build default headers for a Bearer-token JSON API.
pub(crate) fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}
