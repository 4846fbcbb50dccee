//! Pipeline stages for PDF-to-Markdown conversion.
//!
//! Each submodule implements exactly one step, so each is testable on its
//! own and the engine can be swapped without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ assemble ──▶ (write)
//! (path)    (backend)   (Markdown)
//! ```
//!
//! 1. [`input`]    — check the PDF path and derive the default output path
//! 2. [`extract`]  — open the document and read every page in order
//! 3. [`assemble`] — lay the pages out as Markdown

pub mod assemble;
pub mod extract;
pub mod input;
