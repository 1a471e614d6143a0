//! Configuration types for the papercast pipeline.
//!
//! All behaviour is controlled through [`Config`], built via its
//! [`ConfigBuilder`]. Keeping every knob in one struct makes it trivial to
//! share the configuration across handlers, construct it explicitly in tests
//! against mock endpoints, and log it without leaking credentials.
//!
//! Nothing here reads the environment. The binary maps CLI flags and env
//! vars onto the builder; tests call the builder directly with throwaway
//! values and mock-server base URLs.

use crate::error::PapercastError;
use std::fmt;

/// Default OpenAI API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default storage bucket for uploaded audio.
pub const DEFAULT_BUCKET: &str = "audio-files";

/// Default chat-completion model used for narration.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";

/// Default text-to-speech model.
pub const DEFAULT_TTS_MODEL: &str = "tts-1";

/// Default text-to-speech voice.
pub const DEFAULT_VOICE: &str = "alloy";

/// Configuration for the PDF-to-podcast pipeline.
///
/// Built via [`Config::builder()`]. `Default` fills in the public API
/// endpoints and model names but leaves credentials empty, so a default
/// config fails validation until keys are supplied.
///
/// # Example
/// ```rust
/// use papercast::Config;
///
/// let config = Config::builder()
///     .openai_api_key("sk-test")
///     .supabase_url("https://project.supabase.co")
///     .supabase_service_key("service-role-key")
///     .build()
///     .unwrap();
/// assert_eq!(config.chat_model, "gpt-4");
/// ```
#[derive(Clone)]
pub struct Config {
    /// API key for the generation and synthesis calls.
    pub openai_api_key: String,

    /// Base URL for the OpenAI-compatible API. Default:
    /// [`DEFAULT_OPENAI_BASE_URL`]. Overridable so tests can point at a
    /// local mock server.
    pub openai_base_url: String,

    /// Supabase project URL, e.g. `https://abc123.supabase.co`.
    pub supabase_url: String,

    /// Supabase service-role key used for storage uploads.
    pub supabase_service_key: String,

    /// Storage bucket receiving the audio objects. Default: [`DEFAULT_BUCKET`].
    pub bucket: String,

    /// Chat-completion model for narration. Default: [`DEFAULT_CHAT_MODEL`].
    pub chat_model: String,

    /// Text-to-speech model. Default: [`DEFAULT_TTS_MODEL`].
    pub tts_model: String,

    /// Text-to-speech voice. Default: [`DEFAULT_VOICE`].
    pub voice: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            supabase_url: String::new(),
            supabase_service_key: String::new(),
            bucket: DEFAULT_BUCKET.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
            voice: DEFAULT_VOICE.to_string(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("supabase_url", &self.supabase_url)
            .field("supabase_service_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("chat_model", &self.chat_model)
            .field("tts_model", &self.tts_model)
            .field("voice", &self.voice)
            .finish()
    }
}

impl Config {
    /// Create a new builder for `Config`.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`Config`].
#[derive(Debug)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.openai_api_key = key.into();
        self
    }

    pub fn openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.openai_base_url = url.into();
        self
    }

    pub fn supabase_url(mut self, url: impl Into<String>) -> Self {
        self.config.supabase_url = url.into();
        self
    }

    pub fn supabase_service_key(mut self, key: impl Into<String>) -> Self {
        self.config.supabase_service_key = key.into();
        self
    }

    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.config.bucket = bucket.into();
        self
    }

    pub fn chat_model(mut self, model: impl Into<String>) -> Self {
        self.config.chat_model = model.into();
        self
    }

    pub fn tts_model(mut self, model: impl Into<String>) -> Self {
        self.config.tts_model = model.into();
        self
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.config.voice = voice.into();
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// Base URLs are normalised by stripping any trailing slash so the
    /// providers can append fixed paths.
    pub fn build(self) -> Result<Config, PapercastError> {
        let mut c = self.config;

        c.openai_base_url = c.openai_base_url.trim_end_matches('/').to_string();
        c.supabase_url = c.supabase_url.trim_end_matches('/').to_string();

        if c.openai_api_key.trim().is_empty() {
            return Err(PapercastError::InvalidConfig(
                "OpenAI API key must not be empty".into(),
            ));
        }
        if c.supabase_url.trim().is_empty() {
            return Err(PapercastError::InvalidConfig(
                "Supabase URL must not be empty".into(),
            ));
        }
        if !c.supabase_url.starts_with("http://") && !c.supabase_url.starts_with("https://") {
            return Err(PapercastError::InvalidConfig(format!(
                "Supabase URL must be http(s), got '{}'",
                c.supabase_url
            )));
        }
        if c.supabase_service_key.trim().is_empty() {
            return Err(PapercastError::InvalidConfig(
                "Supabase service key must not be empty".into(),
            ));
        }
        if c.bucket.trim().is_empty() {
            return Err(PapercastError::InvalidConfig(
                "Storage bucket must not be empty".into(),
            ));
        }
        if c.chat_model.trim().is_empty() || c.tts_model.trim().is_empty() {
            return Err(PapercastError::InvalidConfig(
                "Model names must not be empty".into(),
            ));
        }

        Ok(c)
    }
}
