//! PDF engine capability interface and its PDFium implementation.
//!
//! The converter only needs four things from a PDF engine: open a file, ask
//! for the page count, ask for one page's text, and close the document.
//! [`PdfBackend`] and [`PdfDocumentHandle`] capture exactly that; closing is
//! the handle's `Drop`, so a document is released on every exit path,
//! including an error half-way through the pages.

use crate::error::PdfToTextError;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Opens PDF documents.
pub trait PdfBackend {
    /// Open the document at `path`.
    ///
    /// Any failure is a [`PdfToTextError::ParseFailure`].
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn PdfDocumentHandle + 'a>, PdfToTextError>;
}

/// An open document. Dropping it closes the document.
pub trait PdfDocumentHandle {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Decoded text of the page at zero-based `index`.
    fn page_text(&self, index: usize) -> Result<String, PdfToTextError>;
}

// ── PDFium ───────────────────────────────────────────────────────────────

/// [`PdfBackend`] backed by the PDFium shared library.
pub struct PdfiumBackend {
    pdfium: Pdfium,
}

impl PdfiumBackend {
    /// Bind PDFium, preferring `library_path` when given.
    ///
    /// Fails with [`PdfToTextError::LibraryUnavailable`] when no usable
    /// library can be found. Never downloads.
    pub fn bind(library_path: Option<&Path>) -> Result<Self, PdfToTextError> {
        let pdfium = pdfium_setup::bind_pdfium(library_path)?;
        debug!("PDFium bound");
        Ok(Self { pdfium })
    }

    /// Wrap an already-bound [`Pdfium`] instance.
    pub fn from_pdfium(pdfium: Pdfium) -> Self {
        Self { pdfium }
    }
}

impl PdfBackend for PdfiumBackend {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn PdfDocumentHandle + 'a>, PdfToTextError> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| PdfToTextError::ParseFailure {
                path: path.to_path_buf(),
                detail: format!("{e:?}"),
            })?;

        Ok(Box::new(PdfiumDocument {
            path: path.to_path_buf(),
            document,
        }))
    }
}

struct PdfiumDocument<'a> {
    path: PathBuf,
    document: PdfDocument<'a>,
}

impl PdfDocumentHandle for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_text(&self, index: usize) -> Result<String, PdfToTextError> {
        let page_failure = |detail: String| PdfToTextError::ParseFailure {
            path: self.path.clone(),
            detail: format!("page {}: {}", index + 1, detail),
        };

        let page_index = PdfPageIndex::try_from(index)
            .map_err(|_| page_failure("page index out of range".to_string()))?;
        let page = self
            .document
            .pages()
            .get(page_index)
            .map_err(|e| page_failure(format!("{e:?}")))?;
        let text = page.text().map_err(|e| page_failure(format!("{e:?}")))?;

        Ok(normalize_line_breaks(&text.all()))
    }
}

impl Drop for PdfiumDocument<'_> {
    fn drop(&mut self) {
        debug!("Closing {}", self.path.display());
    }
}

/// Convert PDFium's `\r\n` (and any lone `\r`) line breaks to `\n`.
pub(crate) fn normalize_line_breaks(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
