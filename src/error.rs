//! Error types for the papercast library.
//!
//! One fatal error type covers the whole pipeline: a request either produces
//! an audio URL or fails with a single [`PapercastError`]. There is no
//! partial success and no retry, so every collaborator failure converts into
//! the variant for its pipeline stage and propagates straight to the HTTP
//! boundary.
//!
//! Variants fall into two classes:
//!
//! * **Upload validation** — the client sent something unusable (missing
//!   file, wrong type, too large, bad encoding). These map to HTTP 400 and
//!   their display string is the user-facing message.
//! * **Everything else** — a pipeline stage failed (extraction, narration,
//!   synthesis, storage). These map to HTTP 500 behind a generic message,
//!   with the display string surfaced as the internal detail.
//!
//! [`PapercastError::is_client_error`] is the classification the HTTP layer
//! keys off.

use thiserror::Error;

/// All errors returned by the papercast pipeline.
#[derive(Debug, Error)]
pub enum PapercastError {
    // ── Upload validation ─────────────────────────────────────────────────
    /// Request body carried no file payload, or the payload was empty.
    #[error("No file provided")]
    NoFile,

    /// The data URL declared a non-PDF content type.
    #[error("Please upload a PDF file")]
    NotPdfMime { mime: String },

    /// Decoded payload exceeds the upload ceiling.
    #[error("File size exceeds 10MB limit")]
    FileTooLarge { size: usize },

    /// The payload is not a well-formed `data:<mime>;base64,<payload>` URL,
    /// or the base64 section does not decode.
    #[error("Invalid file encoding: {detail}")]
    InvalidEncoding { detail: String },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// Decoded bytes do not start with the PDF magic header.
    #[error("Uploaded data is not a valid PDF (first bytes: {magic:?})")]
    NotAPdf { magic: [u8; 4] },

    /// The PDF parser could not extract text from the document.
    #[error("Failed to extract text from PDF: {0}")]
    Extraction(String),

    /// The document parsed but contained no usable sentence text.
    #[error("No readable text could be extracted from the PDF")]
    EmptyDocument,

    // ── Narration errors ──────────────────────────────────────────────────
    /// The text-generation API call failed.
    #[error("Text generation failed: {0}")]
    Generation(String),

    /// The generation model answered without any script content.
    #[error("No script generated from {model}")]
    EmptyScript { model: String },

    // ── Synthesis errors ──────────────────────────────────────────────────
    /// The text-to-speech API call failed.
    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    /// The text-to-speech API answered 2xx with an empty body.
    #[error("Speech synthesis returned no audio")]
    EmptyAudio,

    // ── Storage errors ────────────────────────────────────────────────────
    /// The object-store upload was rejected or unreachable.
    #[error("Audio upload failed: {0}")]
    Storage(String),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PapercastError {
    /// True for upload-validation failures the client can fix by resubmitting
    /// a corrected file. The HTTP layer renders these as 400 with the display
    /// string as the visible message; everything else becomes a 500 behind a
    /// generic message.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NoFile
                | Self::NotPdfMime { .. }
                | Self::FileTooLarge { .. }
                | Self::InvalidEncoding { .. }
        )
    }
}
