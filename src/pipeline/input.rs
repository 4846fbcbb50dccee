//! Input validation: make sure the path names a readable PDF before the
//! engine sees it.
//!
//! The `%PDF` header check turns "this is a JPEG" into a [`ParseFailure`]
//! with a readable message instead of an opaque engine error. Like most
//! readers we accept up to 1 KiB of junk before the header.
//!
//! [`ParseFailure`]: PdfToTextError::ParseFailure

use crate::error::PdfToTextError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Bytes searched for the `%PDF` header marker.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Validate that `path` exists, is readable, and looks like a PDF.
pub fn resolve_input(path: &Path) -> Result<PathBuf, PdfToTextError> {
    if !path.exists() {
        return Err(PdfToTextError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(PdfToTextError::ParseFailure {
                path: path.to_path_buf(),
                detail: "permission denied".to_string(),
            });
        }
        Err(e) => {
            return Err(PdfToTextError::ParseFailure {
                path: path.to_path_buf(),
                detail: e.to_string(),
            });
        }
    };

    let mut head = Vec::with_capacity(HEADER_SEARCH_WINDOW);
    file.by_ref()
        .take(HEADER_SEARCH_WINDOW as u64)
        .read_to_end(&mut head)
        .map_err(|e| PdfToTextError::ParseFailure {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    if !has_pdf_header(&head) {
        return Err(PdfToTextError::ParseFailure {
            path: path.to_path_buf(),
            detail: format!("not a PDF file (first bytes: {:?})", &head[..head.len().min(4)]),
        });
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path.to_path_buf())
}

fn has_pdf_header(head: &[u8]) -> bool {
    head.windows(4).any(|w| w == b"%PDF")
}

/// `pdf_path` with its extension replaced by `.md`.
///
/// A path without an extension gets `.md` appended.
pub fn default_output_path(pdf_path: &Path) -> PathBuf {
    pdf_path.with_extension("md")
}

/// The input's base name, used as the document title.
pub fn document_title(pdf_path: &Path) -> String {
    pdf_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| pdf_path.display().to_string())
}
