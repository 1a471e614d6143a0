//! OpenAI-backed narration generation and speech synthesis.
//!
//! One client serves both calls: `POST {base}/chat/completions` for the
//! narration script and `POST {base}/audio/speech` for the MP3 bytes. The
//! base URL is injectable so tests can point the client at a mock server.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::debug;

use super::{bearer_headers, shared_client, NarrationGenerator, SpeechSynthesizer};
use crate::config::{Config, DEFAULT_CHAT_MODEL, DEFAULT_OPENAI_BASE_URL, DEFAULT_TTS_MODEL};
use crate::error::PapercastError;

/// Client for the OpenAI REST API, covering chat completion and TTS.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    chat_model: String,
    tts_model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
        }
    }

    pub fn new_with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
        }
    }

    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    pub fn with_tts_model(mut self, model: impl Into<String>) -> Self {
        self.tts_model = model.into();
        self
    }

    /// Construct from a validated [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            chat_model: config.chat_model.clone(),
            tts_model: config.tts_model.clone(),
        }
    }
}

#[async_trait]
impl NarrationGenerator for OpenAiClient {
    async fn generate(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<Option<String>, PapercastError> {
        let payload = serde_json::json!({
            "model": self.chat_model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_text },
            ],
        });

        let url = format!("{}/chat/completions", self.base_url);
        debug!("Requesting narration from model '{}'", self.chat_model);

        let response = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| PapercastError::Generation(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PapercastError::Generation(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = extract_openai_error_message(&body)
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(PapercastError::Generation(format!(
                "HTTP {}: {}",
                status.as_u16(),
                message
            )));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| PapercastError::Generation(format!("unexpected response shape: {}", e)))?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty()))
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiClient {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, PapercastError> {
        let payload = serde_json::json!({
            "model": self.tts_model,
            "input": text,
            "voice": voice,
        });

        let url = format!("{}/audio/speech", self.base_url);
        debug!(
            "Requesting speech synthesis: model '{}', voice '{}', {} chars",
            self.tts_model,
            voice,
            text.chars().count()
        );

        let response = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| PapercastError::Synthesis(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_openai_error_message(&body)
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(PapercastError::Synthesis(format!(
                "HTTP {}: {}",
                status.as_u16(),
                message
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        // A 2xx with a JSON body is an error envelope, not audio.
        if content_type.starts_with("application/json") {
            let body = response.text().await.unwrap_or_default();
            let message = extract_openai_error_message(&body)
                .unwrap_or_else(|| "expected audio payload, got JSON response".to_string());
            return Err(PapercastError::Synthesis(message));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PapercastError::Synthesis(format!("failed to read audio: {}", e)))?;

        if bytes.is_empty() {
            return Err(PapercastError::EmptyAudio);
        }

        Ok(bytes.to_vec())
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Pull the human-readable message out of an OpenAI error body
/// (`{"error": {"message": "..."}}`).
fn extract_openai_error_message(body: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
        .map(ToString::to_string)
}
