//! Text extraction from rendered forms
//!
//! Wraps `pdf-extract` and splits its output into pages on form feeds.

use crate::verifier::VerifierError;
use pdf_extract::extract_text_from_mem;
use serde::{Deserialize, Serialize};

/// Fewer visible characters than this means the PDF has no usable text layer
const MIN_TEXT_CHARS: usize = 20;

/// PDF text extraction
pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract the text of every page in `pdf_bytes`.
    ///
    /// # Errors
    /// - `VerifierError::PasswordProtected` when the document is encrypted
    /// - `VerifierError::InvalidPdf` when the bytes are malformed
    /// - `VerifierError::NoTextLayer` when almost no text could be read
    /// - `VerifierError::ExtractionError` for anything else
    pub fn extract_text(pdf_bytes: &[u8]) -> Result<ExtractedText, VerifierError> {
        let raw_text = extract_text_from_mem(pdf_bytes).map_err(|e| classify(&e.to_string()))?;

        let visible = raw_text.chars().filter(|c| !c.is_whitespace()).count();
        if visible < MIN_TEXT_CHARS {
            return Err(VerifierError::NoTextLayer);
        }

        let pages = split_pages(&raw_text);
        tracing::debug!(pages = pages.len(), chars = visible, "Extracted PDF text");

        Ok(ExtractedText { raw_text, pages })
    }
}

fn classify(message: &str) -> VerifierError {
    let lower = message.to_lowercase();
    if lower.contains("encrypted") || lower.contains("password") {
        VerifierError::PasswordProtected
    } else if lower.contains("invalid")
        || lower.contains("malformed")
        || lower.contains("corrupt")
        || lower.contains("header")
    {
        VerifierError::InvalidPdf(message.to_string())
    } else {
        VerifierError::ExtractionError(message.to_string())
    }
}

fn split_pages(text: &str) -> Vec<PageText> {
    text.split('\x0C')
        .filter(|page| !page.trim().is_empty())
        .enumerate()
        .map(|(idx, page)| PageText {
            page_number: idx + 1,
            text: page.to_string(),
        })
        .collect()
}

/// Text extracted from a whole document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    pub raw_text: String,
    pub pages: Vec<PageText>,
}

/// Text of one page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    /// 1-indexed
    pub page_number: usize,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bytes_fail() {
        assert!(PdfExtractor::extract_text(b"").is_err());
    }

    #[test]
    fn test_garbage_is_not_a_pdf() {
        let result = PdfExtractor::extract_text(b"this is not a pdf at all");
        assert!(result.is_err());
    }

    #[test]
    fn test_split_pages_on_form_feed() {
        let pages = split_pages("first page\x0Csecond page\x0C\x0C  \x0Cthird page");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[2].page_number, 3);
        assert_eq!(pages[2].text, "third page");
    }

    #[test]
    fn test_single_page_without_form_feed() {
        let pages = split_pages("GATE PASS\nSTAFF NAME");
        assert_eq!(pages.len(), 1);
        assert!(pages[0].text.contains("STAFF NAME"));
    }

    #[test]
    fn test_classify_errors() {
        assert!(matches!(
            classify("file is Encrypted"),
            VerifierError::PasswordProtected
        ));
        assert!(matches!(
            classify("invalid xref table"),
            VerifierError::InvalidPdf(_)
        ));
        assert!(matches!(
            classify("unexpected end of stream"),
            VerifierError::ExtractionError(_)
        ));
    }
}
