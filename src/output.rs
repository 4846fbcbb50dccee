//! Result types produced by a conversion.

/// Text of one page after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// 1-indexed page number.
    pub page_num: usize,
    /// Page text with leading/trailing whitespace removed.
    pub text: String,
}

impl PageResult {
    /// Pages with empty trimmed text are left out of the Markdown.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Counters for a finished conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Pages in the document.
    pub total_pages: usize,
    /// Pages that produced a `## Page` block.
    pub emitted_pages: usize,
    /// Pages with no extractable text.
    pub skipped_pages: usize,
    /// Wall-clock time spent opening and reading the document.
    pub duration_ms: u64,
}

/// Everything [`crate::convert::extract`] produces.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The assembled Markdown document.
    pub markdown: String,
    /// One entry per page in ascending order, blank pages included.
    pub pages: Vec<PageResult>,
    pub stats: ConversionStats,
}
