//! Resume text extraction from PDF and DOCX uploads.

use std::io::Read;

use ipp_domain::error::{Error, Result};

/// Returned for uploads that are neither PDF nor DOCX.
pub const UNSUPPORTED_FORMAT: &str = "Unsupported file format. Please upload PDF or DOCX.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Detect by file extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if lower.ends_with(".docx") {
            Some(Self::Docx)
        } else {
            None
        }
    }
}

pub trait ResumeExtractor: Send + Sync {
    /// Plain text of the document, trimmed. Unsupported formats yield
    /// [`UNSUPPORTED_FORMAT`]; unreadable documents yield an empty string.
    fn extract(&self, bytes: &[u8], filename: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentExtractor;

impl ResumeExtractor for DocumentExtractor {
    fn extract(&self, bytes: &[u8], filename: &str) -> String {
        let Some(format) = DocumentFormat::from_filename(filename) else {
            tracing::info!(filename = %filename, "unsupported resume format");
            return UNSUPPORTED_FORMAT.to_string();
        };

        let result = match format {
            DocumentFormat::Pdf => extract_pdf(bytes),
            DocumentFormat::Docx => extract_docx(bytes),
        };

        match result {
            Ok(text) => {
                let text = text.trim().to_string();
                tracing::debug!(filename = %filename, chars = text.len(), "resume extracted");
                text
            }
            Err(e) => {
                tracing::warn!(filename = %filename, error = %e, "resume extraction failed");
                String::new()
            }
        }
    }
}

// The PDF parser can panic on malformed input.
fn extract_pdf(bytes: &[u8]) -> Result<String> {
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(Error::Document(format!("PDF: {e}"))),
        Err(_) => Err(Error::Document("PDF parser panicked".into())),
    }
}

/// Text of every `<w:t>` run in `word/document.xml`, one line per paragraph.
fn extract_docx(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| Error::Document(format!("DOCX is not a ZIP archive: {e}")))?;

    let mut doc_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| Error::Document("DOCX missing word/document.xml".into()))?
        .read_to_string(&mut doc_xml)?;

    let mut reader = quick_xml::Reader::from_str(&doc_xml);
    let mut output = String::new();
    let mut paragraph = String::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => paragraph.clear(),
                b"t" => in_text = true,
                _ => {}
            },
            Ok(quick_xml::events::Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    output.push_str(&paragraph);
                    output.push('\n');
                    paragraph.clear();
                }
                b"t" => in_text = false,
                _ => {}
            },
            Ok(quick_xml::events::Event::Empty(ref e)) if e.local_name().as_ref() == b"p" => {
                output.push('\n');
            }
            Ok(quick_xml::events::Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| Error::Document(format!("DOCX text: {e}")))?;
                paragraph.push_str(&text);
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(Error::Document(format!("DOCX XML: {e}"))),
            _ => {}
        }
        buf.clear();
    }

    Ok(output)
}
