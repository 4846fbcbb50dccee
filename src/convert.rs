//! Conversion entry points.
//!
//! [`extract`] does everything except writing: validate the input, read the
//! pages, assemble the Markdown. [`convert_with`] adds the file write, and
//! [`convert`] additionally binds PDFium for callers that don't hold a
//! backend of their own.

use crate::backend::{PdfBackend, PdfiumBackend};
use crate::config::ConversionConfig;
use crate::error::PdfToTextError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::extract::extract_pages;
use crate::pipeline::{assemble, input};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Convert a PDF to a Markdown file using PDFium.
///
/// # Arguments
/// * `pdf_path`    — PDF to read
/// * `output_path` — destination; `None` means `pdf_path` with a `.md` extension
/// * `config`      — conversion configuration
///
/// # Returns
/// The path the Markdown was written to.
///
/// # Errors
/// - [`PdfToTextError::LibraryUnavailable`] — PDFium could not be bound
/// - [`PdfToTextError::NotFound`] — `pdf_path` does not exist
/// - [`PdfToTextError::ParseFailure`] — the document could not be read
/// - [`PdfToTextError::WriteFailure`] — the output could not be written
///
/// # Example
/// ```rust,no_run
/// use pdf_to_text::{convert, ConversionConfig};
///
/// let written = convert("report.pdf", None, &ConversionConfig::default())?;
/// println!("{}", written.display());
/// # Ok::<(), pdf_to_text::PdfToTextError>(())
/// ```
pub fn convert(
    pdf_path: impl AsRef<Path>,
    output_path: Option<&Path>,
    config: &ConversionConfig,
) -> Result<PathBuf, PdfToTextError> {
    let backend = PdfiumBackend::bind(config.library_path.as_deref())?;
    convert_with(&backend, pdf_path, output_path, config)
}

/// Convert a PDF to a Markdown file using `backend`.
///
/// The output file is written once, after every page has been read, and
/// overwrites any existing file. Parent directories are not created.
pub fn convert_with(
    backend: &dyn PdfBackend,
    pdf_path: impl AsRef<Path>,
    output_path: Option<&Path>,
    config: &ConversionConfig,
) -> Result<PathBuf, PdfToTextError> {
    let pdf_path = pdf_path.as_ref();
    let output = extract(backend, pdf_path, config)?;

    let target = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input::default_output_path(pdf_path));

    std::fs::write(&target, output.markdown.as_bytes()).map_err(|e| {
        PdfToTextError::WriteFailure {
            path: target.clone(),
            source: e,
        }
    })?;

    info!(
        "Wrote {} ({} of {} pages with text)",
        target.display(),
        output.stats.emitted_pages,
        output.stats.total_pages
    );
    Ok(target)
}

/// Read a PDF and assemble its Markdown without writing anything.
pub fn extract(
    backend: &dyn PdfBackend,
    pdf_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, PdfToTextError> {
    let start = Instant::now();
    let pdf_path = input::resolve_input(pdf_path.as_ref())?;
    info!("Starting conversion: {}", pdf_path.display());

    let extracted = extract_pages(backend, &pdf_path, config)?;

    let title = input::document_title(&pdf_path);
    let markdown = assemble::assemble_markdown(&title, extracted.total_pages, &extracted.pages);

    let emitted_pages = extracted.pages.iter().filter(|p| !p.is_blank()).count();
    let stats = ConversionStats {
        total_pages: extracted.total_pages,
        emitted_pages,
        skipped_pages: extracted.total_pages - emitted_pages,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Extracted {}/{} pages in {}ms",
        stats.emitted_pages, stats.total_pages, stats.duration_ms
    );

    Ok(ConversionOutput {
        markdown,
        pages: extracted.pages,
        stats,
    })
}
