//! PDF text extraction from in-memory bytes.
//!
//! ## Why spawn_blocking?
//!
//! Parsing a PDF and flattening its content streams to text is CPU-bound
//! and can take seconds on a large paper. `tokio::task::spawn_blocking`
//! moves the work onto the blocking thread pool so the async workers keep
//! serving other requests. The parser is also known to panic on some
//! malformed documents; a panic surfaces as a `JoinError` here and is
//! mapped to a typed error instead of tearing down the request stack.
//!
//! The `%PDF` magic header is validated before parsing so a mislabelled
//! upload gets a precise error rather than whatever the parser produces.

use crate::error::PapercastError;
use tracing::debug;

/// Extract plain text from PDF bytes.
///
/// The returned text may be empty or whitespace-only for documents with no
/// text layer (scanned images); callers decide how to treat that.
pub async fn extract_text(bytes: Vec<u8>) -> Result<String, PapercastError> {
    check_pdf_magic(&bytes)?;

    let result = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| PapercastError::Extraction(e.to_string()))
    })
    .await
    .map_err(|e| PapercastError::Internal(format!("Extraction task panicked: {}", e)))?;

    let text = result?;
    debug!("Extracted {} characters of text", text.chars().count());
    Ok(text)
}

/// Verify the buffer starts with the `%PDF` magic header.
fn check_pdf_magic(bytes: &[u8]) -> Result<(), PapercastError> {
    if bytes.len() >= 4 && &bytes[..4] == b"%PDF" {
        return Ok(());
    }
    let mut magic = [0u8; 4];
    let n = bytes.len().min(4);
    magic[..n].copy_from_slice(&bytes[..n]);
    Err(PapercastError::NotAPdf { magic })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_accepts_pdf_header() {
        assert!(check_pdf_magic(b"%PDF-1.7\n").is_ok());
    }

    #[test]
    fn test_magic_rejects_other_content() {
        let err = check_pdf_magic(b"<html><body>").unwrap_err();
        assert!(matches!(err, PapercastError::NotAPdf { magic } if &magic == b"<htm"));
    }

    #[test]
    fn test_magic_rejects_short_buffer() {
        assert!(check_pdf_magic(b"%P").is_err());
        assert!(check_pdf_magic(b"").is_err());
    }

    #[tokio::test]
    async fn test_extract_rejects_non_pdf_before_parsing() {
        let err = extract_text(b"plain text, not a pdf".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, PapercastError::NotAPdf { .. }));
    }
}
