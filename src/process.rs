//! The request pipeline: one uploaded PDF in, one public audio URL out.
//!
//! ## Why strictly sequential?
//!
//! Every stage consumes the previous stage's output, so there is nothing to
//! parallelise inside a request: the narration needs the extracted text, the
//! synthesis needs the final script, the upload needs the audio bytes.
//! Concurrency lives one level up, where the server handles independent
//! requests on separate tasks. Nothing is rolled back on failure; the only
//! durable side effect is the audio object, written last.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::PapercastError;
use crate::pipeline::truncate::{MAX_PAPER_CHARS, MAX_SCRIPT_CHARS};
use crate::pipeline::{decode, extract, truncate};
use crate::prompts;
use crate::providers::{AudioStore, NarrationGenerator, SpeechSynthesizer};

/// Content type of every produced audio object.
pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Cache lifetime requested for stored audio, in seconds.
pub const AUDIO_CACHE_SECONDS: &str = "3600";

/// Run the full PDF-to-podcast pipeline for one uploaded file.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `file`        — The upload as a `data:<mime>;base64,<payload>` URL
/// * `config`      — Pipeline configuration (models, voice)
/// * `generator`   — Narration collaborator
/// * `synthesizer` — Text-to-speech collaborator
/// * `store`       — Audio object store
///
/// # Returns
/// The public URL of the uploaded audio object.
///
/// # Errors
/// Any stage failure aborts the request with the matching
/// [`PapercastError`] variant; nothing done so far is undone.
pub async fn process_pdf(
    file: &str,
    config: &Config,
    generator: &dyn NarrationGenerator,
    synthesizer: &dyn SpeechSynthesizer,
    store: &dyn AudioStore,
) -> Result<String, PapercastError> {
    let total_start = Instant::now();
    info!("Processing uploaded PDF");

    // ── Step 1: Decode upload ────────────────────────────────────────────
    let pdf_bytes = decode::decode_data_url(file)?;
    info!("Upload decoded: {} bytes", pdf_bytes.len());

    // ── Step 2: Extract text ─────────────────────────────────────────────
    let raw_text = extract::extract_text(pdf_bytes).await?;
    info!("PDF parsed, text length: {}", raw_text.chars().count());

    // ── Step 3: Truncate to the paper budget ─────────────────────────────
    let paper_text = truncate::truncate(&raw_text, MAX_PAPER_CHARS);
    debug!("Truncated text length: {}", paper_text.chars().count());

    if paper_text.is_empty() {
        warn!(
            "No sentence text survived truncation ({} raw chars)",
            raw_text.chars().count()
        );
        return Err(PapercastError::EmptyDocument);
    }

    // ── Step 4: Generate the narration script ────────────────────────────
    let generation_start = Instant::now();
    let script = generator
        .generate(
            &prompts::narration_system_prompt(),
            &prompts::narration_user_message(&paper_text),
        )
        .await?
        .ok_or_else(|| PapercastError::EmptyScript {
            model: config.chat_model.clone(),
        })?;
    info!(
        "Narration script generated: {} chars in {}ms",
        script.chars().count(),
        generation_start.elapsed().as_millis()
    );

    // ── Step 5: Re-truncate to the script budget ─────────────────────────
    // The prompt asks for the limit, but model compliance is not guaranteed
    // and the synthesizer has a hard input ceiling.
    let final_script = truncate::truncate(&script, MAX_SCRIPT_CHARS);
    debug!("Final script length: {}", final_script.chars().count());

    // ── Step 6: Synthesize speech ────────────────────────────────────────
    let synthesis_start = Instant::now();
    let audio = synthesizer.synthesize(&final_script, &config.voice).await?;
    info!(
        "Audio generated: {} bytes in {}ms",
        audio.len(),
        synthesis_start.elapsed().as_millis()
    );

    // ── Step 7: Upload to storage ────────────────────────────────────────
    let key = storage_key();
    store
        .put(&key, audio, AUDIO_CONTENT_TYPE, AUDIO_CACHE_SECONDS)
        .await?;

    // ── Step 8: Resolve the public URL ───────────────────────────────────
    let audio_url = store.public_url(&key);
    info!(
        "Processing complete: '{}' in {}ms",
        key,
        total_start.elapsed().as_millis()
    );

    Ok(audio_url)
}

/// Generate a collision-resistant storage key.
///
/// Millisecond timestamps alone collide when two requests land in the same
/// tick, so a random discriminator sits between the timestamp and the fixed
/// suffix: `<epoch-millis>-<uuid>-audio.mp3`.
pub fn storage_key() -> String {
    format!(
        "{}-{}-audio.mp3",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_shape() {
        let key = storage_key();
        assert!(key.ends_with("-audio.mp3"), "got: {key}");

        let mut parts = key.splitn(3, '-');
        let millis: i64 = parts.next().unwrap().parse().unwrap();
        assert!(millis > 1_600_000_000_000, "timestamp looks wrong: {millis}");

        let discriminator = parts.next().unwrap();
        assert_eq!(discriminator.len(), 32);
        assert!(discriminator.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_storage_keys_are_unique() {
        let a = storage_key();
        let b = storage_key();
        assert_ne!(a, b);
    }
}
