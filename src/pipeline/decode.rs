//! Upload decoding: strict data-URL parsing of the inbound file payload.
//!
//! ## Why a strict parser?
//!
//! The file arrives as `data:<mime>;base64,<payload>` inside the JSON body.
//! Splitting on the delimiter and taking whatever falls out works until a
//! client sends a bare base64 string or a mangled header, and then the
//! failure surfaces much later as an unreadable PDF. Parsing the header
//! shape up front turns every malformed upload into an immediate validation
//! error with a message the client can act on. The declared mime and the
//! decoded size are checked here as well, mirroring the browser-side
//! validation, since the server cannot trust the client to have run it.

use crate::error::PapercastError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// Content type required of the uploaded file.
pub const PDF_MIME: &str = "application/pdf";

/// Ceiling on the decoded upload, in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Parse a `data:<mime>;base64,<payload>` URL into validated PDF bytes.
///
/// Validation order: header shape, declared mime, base64 payload, decoded
/// size. The mime may carry parameters (`application/pdf;charset=binary`);
/// only the type itself is compared, case-insensitively.
pub fn decode_data_url(file: &str) -> Result<Vec<u8>, PapercastError> {
    if file.trim().is_empty() {
        return Err(PapercastError::NoFile);
    }

    let rest = file
        .strip_prefix("data:")
        .ok_or_else(|| PapercastError::InvalidEncoding {
            detail: "missing 'data:' prefix".into(),
        })?;

    let (header, payload) =
        rest.split_once(";base64,")
            .ok_or_else(|| PapercastError::InvalidEncoding {
                detail: "missing ';base64,' separator".into(),
            })?;

    let mime = header.split(';').next().unwrap_or("").trim();
    if !mime.eq_ignore_ascii_case(PDF_MIME) {
        return Err(PapercastError::NotPdfMime {
            mime: mime.to_string(),
        });
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| PapercastError::InvalidEncoding {
            detail: format!("base64 decode failed: {}", e),
        })?;

    if bytes.is_empty() {
        return Err(PapercastError::NoFile);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(PapercastError::FileTooLarge { size: bytes.len() });
    }

    debug!("Decoded upload payload: {} bytes", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf_data_url(bytes: &[u8]) -> String {
        format!("data:application/pdf;base64,{}", STANDARD.encode(bytes))
    }

    #[test]
    fn test_valid_data_url_round_trips() {
        let bytes = b"%PDF-1.4 fake body";
        assert_eq!(decode_data_url(&pdf_data_url(bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_empty_string_is_no_file() {
        assert!(matches!(decode_data_url(""), Err(PapercastError::NoFile)));
        assert!(matches!(
            decode_data_url("   "),
            Err(PapercastError::NoFile)
        ));
    }

    #[test]
    fn test_missing_data_prefix_rejected() {
        let err = decode_data_url("application/pdf;base64,AAAA").unwrap_err();
        assert!(matches!(err, PapercastError::InvalidEncoding { .. }));
        assert!(err.to_string().contains("data:"), "got: {err}");
    }

    #[test]
    fn test_missing_base64_separator_rejected() {
        let err = decode_data_url("data:application/pdf,AAAA").unwrap_err();
        assert!(matches!(err, PapercastError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_wrong_mime_rejected_with_client_message() {
        let url = format!("data:text/plain;base64,{}", STANDARD.encode(b"hello"));
        let err = decode_data_url(&url).unwrap_err();
        assert!(matches!(err, PapercastError::NotPdfMime { .. }));
        assert_eq!(err.to_string(), "Please upload a PDF file");
    }

    #[test]
    fn test_mime_parameters_are_ignored() {
        let url = format!(
            "data:application/pdf;charset=binary;base64,{}",
            STANDARD.encode(b"%PDF-")
        );
        assert!(decode_data_url(&url).is_ok());
    }

    #[test]
    fn test_mime_compare_is_case_insensitive() {
        let url = format!("data:Application/PDF;base64,{}", STANDARD.encode(b"%PDF-"));
        assert!(decode_data_url(&url).is_ok());
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let err = decode_data_url("data:application/pdf;base64,!!!not-base64!!!").unwrap_err();
        assert!(matches!(err, PapercastError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_empty_payload_is_no_file() {
        assert!(matches!(
            decode_data_url("data:application/pdf;base64,"),
            Err(PapercastError::NoFile)
        ));
    }

    #[test]
    fn test_size_ceiling_enforced() {
        let at_limit = vec![0u8; MAX_UPLOAD_BYTES];
        assert!(decode_data_url(&pdf_data_url(&at_limit)).is_ok());

        let over = vec![0u8; MAX_UPLOAD_BYTES + 1];
        let err = decode_data_url(&pdf_data_url(&over)).unwrap_err();
        assert!(matches!(err, PapercastError::FileTooLarge { .. }));
        assert_eq!(err.to_string(), "File size exceeds 10MB limit");
    }
}
