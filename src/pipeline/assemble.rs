//! Markdown layout.
//!
//! ```text
//! # <title>
//!
//! *<N> pages*
//!
//! ---
//! ## Page <i>
//!
//! <trimmed text>
//!
//! ```
//!
//! Lines are joined with `\n`. Blank pages get no block at all.

use crate::output::PageResult;

/// Assemble the document from its title, the total page count, and the
/// per-page results in ascending order.
pub fn assemble_markdown(title: &str, total_pages: usize, pages: &[PageResult]) -> String {
    let mut lines: Vec<String> = vec![
        format!("# {title}"),
        String::new(),
        format!("*{total_pages} pages*"),
        String::new(),
    ];

    for page in pages.iter().filter(|p| !p.is_blank()) {
        lines.push("---".to_string());
        lines.push(format!("## Page {}", page.page_num));
        lines.push(String::new());
        lines.push(page.text.clone());
        lines.push(String::new());
    }

    lines.join("\n")
}
