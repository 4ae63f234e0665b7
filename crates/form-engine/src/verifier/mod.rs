//! Rendered form verification
//!
//! Extracts the text layer of a rendered PDF and checks that a form's fixed
//! labels made it onto the page.

pub mod extract;

pub use extract::{ExtractedText, PageText, PdfExtractor};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forms::FormKind;

/// Errors that can occur while verifying a rendered form
#[derive(Error, Debug)]
pub enum VerifierError {
    #[error("PDF extraction failed: {0}")]
    ExtractionError(String),

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Password-protected PDF")]
    PasswordProtected,

    #[error("PDF has no text layer")]
    NoTextLayer,
}

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Labels printed on every fuel card form regardless of its data
pub const FUEL_CARD_LABELS: &[&str] = &[
    "FUEL CARD MANAGEMENT FORM",
    "VEHICLE REG NO.",
    "MAKE/MODEL",
    "ENGINE CAPACITY (CC)",
    "FUEL CARD NO.",
    "BUSINESS PURPOSE",
    "DISTANCE (KM)",
    "Total",
    "Approved Amount in Words",
    "Amount Not Taken",
    "Prepared By",
    "Checked By",
    "Approved By",
    "Fuel Card User Agreement",
    "acknowledge receipt of",
    "Accountability Checked By",
    "Accountability Verified By",
];

/// Labels printed on every gate pass regardless of its data
pub const GATE_PASS_LABELS: &[&str] = &[
    "GATE PASS",
    "STAFF NAME",
    "POSITION",
    "DEPARTMENT",
    "NAME OF SUPERVISION",
    "SIGNATURE OF SUPERVISOR",
    "VEHICLE REG. NO",
    "DEPARTURE TIME",
    "RETURN TIME",
    "TYPE OF GATE PASS",
    "OFFICIAL",
    "PERSONAL",
    "LUNCHTIME",
    "Reasons for leaving duty station",
    "Feedback to the responsible supervising",
];

/// Outcome of checking one rendered form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub form: FormKind,
    pub page_count: usize,
    pub labels_checked: usize,
    pub missing: Vec<String>,
}

impl VerificationReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Plain-text summary for terminals
    pub fn to_text(&self) -> String {
        let mut output = format!(
            "{} [{}] ({} page(s)): {}/{} labels found\n",
            self.form.title(),
            self.form,
            self.page_count,
            self.labels_checked - self.missing.len(),
            self.labels_checked
        );
        for label in &self.missing {
            output.push_str(&format!("  missing: {}\n", label));
        }
        output
    }
}

/// Checks rendered forms for their fixed labels
pub struct FormVerifier;

impl FormVerifier {
    /// The fixed labels of `kind`
    pub fn labels(kind: FormKind) -> &'static [&'static str] {
        match kind {
            FormKind::FuelCard => FUEL_CARD_LABELS,
            FormKind::GatePass => GATE_PASS_LABELS,
        }
    }

    /// Labels of `kind` that do not occur in the PDF's text
    pub fn missing_labels(kind: FormKind, pdf_bytes: &[u8]) -> Result<Vec<String>, VerifierError> {
        Ok(Self::verify(kind, pdf_bytes)?.missing)
    }

    /// Extract `pdf_bytes` and check every label of `kind`
    pub fn verify(kind: FormKind, pdf_bytes: &[u8]) -> Result<VerificationReport, VerifierError> {
        let extracted = PdfExtractor::extract_text(pdf_bytes)?;
        let labels = Self::labels(kind);
        let missing = missing_in_text(labels, &extracted.raw_text);

        if !missing.is_empty() {
            tracing::warn!("{} is missing {} label(s)", kind, missing.len());
        }

        Ok(VerificationReport {
            form: kind,
            page_count: extracted.pages.len(),
            labels_checked: labels.len(),
            missing,
        })
    }
}

/// Lowercase and drop all whitespace, so line wrapping and glyph spacing don't matter
fn normalize(text: &str) -> String {
    WHITESPACE.replace_all(text, "").to_lowercase()
}

fn missing_in_text(labels: &[&str], text: &str) -> Vec<String> {
    let haystack = normalize(text);
    labels
        .iter()
        .filter(|label| !haystack.contains(&normalize(label)))
        .map(|label| label.to_string())
        .collect()
}
