//! Page extraction: open the document and read every page in ascending order.
//!
//! The document handle lives only inside [`extract_pages`]; it is dropped
//! (closed) when the function returns, whether every page was read or an
//! error cut the loop short.

use crate::backend::PdfBackend;
use crate::config::ConversionConfig;
use crate::error::PdfToTextError;
use crate::output::PageResult;
use std::path::Path;
use tracing::{debug, info};

/// Pages of one document, in ascending order, with trimmed text.
#[derive(Debug)]
pub struct ExtractedPages {
    pub total_pages: usize,
    pub pages: Vec<PageResult>,
}

/// Open `pdf_path` with `backend` and read the trimmed text of every page.
pub fn extract_pages(
    backend: &dyn PdfBackend,
    pdf_path: &Path,
    config: &ConversionConfig,
) -> Result<ExtractedPages, PdfToTextError> {
    let document = backend.open(pdf_path)?;
    let total_pages = document.page_count();
    info!("PDF loaded: {} pages", total_pages);

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(total_pages);
    }

    let mut pages = Vec::with_capacity(total_pages);
    for index in 0..total_pages {
        let page_num = index + 1;
        let text = document.page_text(index)?.trim().to_string();

        if text.is_empty() {
            debug!("Page {} has no text, skipping", page_num);
            if let Some(ref cb) = config.progress_callback {
                cb.on_page_skipped(page_num, total_pages);
            }
        } else {
            debug!("Page {} → {} bytes", page_num, text.len());
            if let Some(ref cb) = config.progress_callback {
                cb.on_page_extracted(page_num, total_pages, text.len());
            }
        }

        pages.push(PageResult { page_num, text });
    }

    if let Some(ref cb) = config.progress_callback {
        let emitted = pages.iter().filter(|p| !p.is_blank()).count();
        cb.on_conversion_complete(total_pages, emitted);
    }

    Ok(ExtractedPages { total_pages, pages })
}
