//! Error type for the pdf-to-text library.
//!
//! Every failure is terminal for a conversion: there is no per-page
//! recovery and no partial output. The variants follow the order in which
//! a conversion can fail:
//!
//! * input validation — [`PdfToTextError::NotFound`]
//! * engine start-up — [`PdfToTextError::LibraryUnavailable`]
//! * reading the document — [`PdfToTextError::ParseFailure`]
//! * writing the Markdown — [`PdfToTextError::WriteFailure`]

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf-to-text library.
#[derive(Debug, Error)]
pub enum PdfToTextError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF not found: {path}")]
    NotFound { path: PathBuf },

    // ── Engine errors ─────────────────────────────────────────────────────
    /// The PDFium shared library could not be located or bound.
    #[error("PDFium library is not available: {reason}\n{hint}")]
    LibraryUnavailable { reason: String, hint: String },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// The file could not be read, is not a PDF, or the engine rejected the
    /// document or one of its pages.
    #[error("Failed to read PDF '{path}': {detail}")]
    ParseFailure { path: PathBuf, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PdfToTextError {
    /// `true` when the input path does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<pdfium_setup::PdfiumSetupError> for PdfToTextError {
    fn from(e: pdfium_setup::PdfiumSetupError) -> Self {
        PdfToTextError::LibraryUnavailable {
            reason: e.to_string(),
            hint: pdfium_setup::install_hint(),
        }
    }
}
