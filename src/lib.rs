//! # pdf-to-text
//!
//! Extract the text of every page of a PDF into a single Markdown file.
//!
//! Text comes straight from the PDF engine (PDFium via `pdfium-render`);
//! there is no OCR and no layout reconstruction. Image-only pages have no
//! text and are left out of the output.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     check the file exists and starts with %PDF
//!  ├─ 2. Extract   open the document, read each page in order, trim
//!  ├─ 3. Assemble  title, page count, one block per non-empty page
//!  └─ 4. Write     <input>.md (or the requested output path)
//! ```
//!
//! ## Output
//!
//! ```text
//! # report.pdf
//!
//! *3 pages*
//!
//! ---
//! ## Page 1
//!
//! First page text
//!
//! ---
//! ## Page 3
//!
//! Third page text
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_to_text::{convert, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let written = convert("report.pdf", None, &ConversionConfig::default())?;
//!     println!("{}", written.display());
//!     Ok(())
//! }
//! ```
//!
//! Bind the engine once and reuse it with [`convert_with`]:
//!
//! ```rust,no_run
//! use pdf_to_text::{convert_with, ConversionConfig, PdfiumBackend};
//!
//! let backend = PdfiumBackend::bind(None)?;
//! for pdf in ["a.pdf", "b.pdf"] {
//!     convert_with(&backend, pdf, None, &ConversionConfig::default())?;
//! }
//! # Ok::<(), pdf_to_text::PdfToTextError>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf-to-text` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod backend;
pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use backend::{PdfBackend, PdfDocumentHandle, PdfiumBackend};
pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_with, extract};
pub use error::PdfToTextError;
pub use output::{ConversionOutput, ConversionStats, PageResult};
pub use pipeline::assemble::assemble_markdown;
pub use pipeline::input::default_output_path;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
