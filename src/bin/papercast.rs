//! Server binary for papercast.
//!
//! A thin shim over the library crate that maps CLI flags and environment
//! variables to a `Config`, initialises logging, and serves the HTTP API.

use anyhow::{Context, Result};
use clap::Parser;
use papercast::{server, Config};
use std::io;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "papercast",
    version,
    about = "Turn a PDF research paper into a podcast-style audio narration",
    long_about = "HTTP service that accepts a PDF upload, rewrites its text as a \
      conversational script with a chat model, synthesizes speech, and stores the \
      audio in a Supabase bucket.\n\n\
      All flags can be supplied via environment variables; a .env file in the \
      working directory is loaded at startup if present."
)]
struct Cli {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "PAPERCAST_LISTEN", default_value = "0.0.0.0:3000")]
    listen: SocketAddr,

    /// OpenAI API key used for narration generation and speech synthesis.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,

    /// Base URL for the OpenAI-compatible API.
    #[arg(long, env = "OPENAI_BASE_URL")]
    openai_base_url: Option<String>,

    /// Supabase project URL, e.g. https://abc123.supabase.co.
    #[arg(long, env = "SUPABASE_URL")]
    supabase_url: String,

    /// Supabase service-role key used for storage uploads.
    #[arg(long, env = "SUPABASE_SERVICE_KEY", hide_env_values = true)]
    supabase_service_key: String,

    /// Storage bucket receiving the audio objects.
    #[arg(long, env = "PAPERCAST_BUCKET")]
    bucket: Option<String>,

    /// Chat-completion model for narration.
    #[arg(long, env = "PAPERCAST_CHAT_MODEL")]
    chat_model: Option<String>,

    /// Text-to-speech model.
    #[arg(long, env = "PAPERCAST_TTS_MODEL")]
    tts_model: Option<String>,

    /// Text-to-speech voice.
    #[arg(long, env = "PAPERCAST_VOICE")]
    voice: Option<String>,

    /// Enable debug-level logging.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all logs except errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap runs so env-backed flags see its values.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Configuration ────────────────────────────────────────────────────
    let mut builder = Config::builder()
        .openai_api_key(cli.openai_api_key)
        .supabase_url(cli.supabase_url)
        .supabase_service_key(cli.supabase_service_key);

    if let Some(url) = cli.openai_base_url {
        builder = builder.openai_base_url(url);
    }
    if let Some(bucket) = cli.bucket {
        builder = builder.bucket(bucket);
    }
    if let Some(model) = cli.chat_model {
        builder = builder.chat_model(model);
    }
    if let Some(model) = cli.tts_model {
        builder = builder.tts_model(model);
    }
    if let Some(voice) = cli.voice {
        builder = builder.voice(voice);
    }

    let config = builder.build().context("Invalid configuration")?;
    tracing::debug!("Resolved configuration: {:?}", config);

    // ── Serve ────────────────────────────────────────────────────────────
    let app = server::router(server::AppState::from_config(config));
    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("Failed to bind {}", cli.listen))?;

    tracing::info!("papercast listening on {}", cli.listen);
    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
