//! Shared fixtures for the integration suites.
//!
//! PDFs are built programmatically rather than checked in as binary
//! fixtures: a minimal single-page document with one text-showing content
//! stream, assembled with correct xref offsets so the real extractor parses
//! it. Keeping the builder here lets tests choose the exact text that flows
//! into the pipeline.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// A valid single-page PDF whose extracted text is `text`.
pub fn pdf_with_text(text: &str) -> Vec<u8> {
    let content = format!(
        "BT\n/F1 12 Tf\n72 720 Td\n({}) Tj\nET\n",
        escape_pdf_string(text)
    );
    let objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ),
    ];
    assemble_pdf(&objects)
}

/// A valid single-page PDF with no text layer at all, like a scanned image
/// without OCR.
pub fn pdf_without_text() -> Vec<u8> {
    let objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>".to_string(),
    ];
    assemble_pdf(&objects)
}

/// Wrap bytes as the `data:application/pdf;base64,...` payload the endpoint
/// expects.
pub fn pdf_data_url(bytes: &[u8]) -> String {
    format!("data:application/pdf;base64,{}", STANDARD.encode(bytes))
}

/// Wrap bytes as a data URL with an arbitrary declared mime.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Serialise numbered objects into a complete PDF file, computing the xref
/// table offsets as objects are written.
fn assemble_pdf(objects: &[String]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

#[test]
fn pdf_builder_produces_magic_and_trailer() {
    let bytes = pdf_with_text("Hello.");
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(bytes.ends_with(b"%%EOF\n"));
}
