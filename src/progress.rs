//! Progress-callback trait for per-page extraction events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as each page is read. The CLI uses it to drive a progress bar on
//! stderr; library callers can forward events wherever they like.
//!
//! # Example
//!
//! ```rust
//! use pdf_to_text::{ConversionConfig, ConversionProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     emitted: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_page_extracted(&self, page_num: usize, total_pages: usize, text_len: usize) {
//!         self.emitted.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("Page {}/{} ({} bytes)", page_num, total_pages, text_len);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { emitted: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build();
//! ```

use std::sync::Arc;

/// Called by the extraction stage as it walks the document.
///
/// Pages are visited in ascending order on the calling thread. All methods
/// have default no-op implementations so callers only override what they
/// care about. The trait is `Send + Sync` so a callback can be shared with
/// other threads of the host application.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the document is opened, before any page is read.
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called when a page produced non-empty trimmed text.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — total pages in the document
    /// * `text_len`    — byte length of the trimmed text
    fn on_page_extracted(&self, page_num: usize, total_pages: usize, text_len: usize) {
        let _ = (page_num, total_pages, text_len);
    }

    /// Called when a page had no extractable text and will not appear in
    /// the output.
    fn on_page_skipped(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called once after the last page has been read.
    ///
    /// # Arguments
    /// * `total_pages`   — total pages in the document
    /// * `emitted_pages` — pages that produced a `## Page` block
    fn on_conversion_complete(&self, total_pages: usize, emitted_pages: usize) {
        let _ = (total_pages, emitted_pages);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
