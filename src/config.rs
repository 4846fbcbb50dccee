//! Configuration for a conversion.
//!
//! The Markdown layout itself is fixed; configuration only covers where the
//! PDF engine comes from and who hears about progress. Built via
//! [`ConversionConfig::builder()`] or [`ConversionConfig::default()`].

use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Configuration for a PDF-to-Markdown conversion.
///
/// # Example
/// ```rust
/// use pdf_to_text::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .library_path("/opt/pdfium/lib/libpdfium.so")
///     .build();
/// assert!(config.library_path.is_some());
/// ```
#[derive(Clone, Default)]
pub struct ConversionConfig {
    /// Explicit PDFium library file or directory. Default: None.
    ///
    /// When `None`, [`crate::convert::convert`] falls back to the lookup
    /// order of [`pdfium_setup::locate_pdfium_library`] and then the system
    /// library path.
    pub library_path: Option<PathBuf>,

    /// Per-page progress events. Default: None.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("library_path", &self.library_path)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.library_path = Some(path.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    pub fn build(self) -> ConversionConfig {
        self.config
    }
}
