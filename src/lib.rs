//! # papercast
//!
//! Turn a PDF research paper into a podcast-style audio narration.
//!
//! ## What it does
//!
//! One HTTP request carries a PDF in, one public MP3 URL comes out. The
//! service extracts the paper's text, asks a chat model to rewrite it as a
//! short conversational script, synthesizes speech from the script, and
//! stores the audio in a Supabase bucket. Truncation keeps both model calls
//! inside their input budgets without ever cutting a sentence in half.
//!
//! ## Pipeline Overview
//!
//! ```text
//! data URL
//!  │
//!  ├─ 1. Decode      strict data-URL parse + mime/size validation
//!  ├─ 2. Extract     PDF → plain text (CPU-bound, spawn_blocking)
//!  ├─ 3. Truncate    sentence-preserving cut to 12,000 chars
//!  ├─ 4. Narrate     chat completion with a fixed podcast prompt
//!  ├─ 5. Truncate    cut the script to 4,000 chars for the TTS ceiling
//!  ├─ 6. Synthesize  text-to-speech → MP3 bytes
//!  └─ 7. Store       upload to the bucket, return the public URL
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use papercast::{server, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::builder()
//!         .openai_api_key(std::env::var("OPENAI_API_KEY")?)
//!         .supabase_url(std::env::var("SUPABASE_URL")?)
//!         .supabase_service_key(std::env::var("SUPABASE_SERVICE_KEY")?)
//!         .build()?;
//!
//!     let app = server::router(server::AppState::from_config(config));
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `papercast` binary (clap + anyhow + tracing-subscriber + dotenvy) |
//!
//! Disable `cli` when embedding only the library:
//! ```toml
//! papercast = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod prompts;
pub mod providers;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{Config, ConfigBuilder};
pub use error::PapercastError;
pub use pipeline::truncate::{truncate, MAX_PAPER_CHARS, MAX_SCRIPT_CHARS};
pub use process::process_pdf;
pub use providers::{AudioStore, NarrationGenerator, SpeechSynthesizer};
