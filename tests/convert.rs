//! Integration tests for the conversion API using an in-memory backend.
//!
//! No PDF engine is needed: `MemoryBackend` serves page text from a map keyed
//! by file name, so these run everywhere.

use pdf_to_text::{
    convert_with, default_output_path, extract, ConversionConfig, PdfBackend, PdfDocumentHandle,
    PdfToTextError,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Pages per file name. A file name that is not in the map fails to open,
/// like a corrupt document would.
#[derive(Default)]
struct MemoryBackend {
    documents: HashMap<String, Vec<String>>,
}

impl MemoryBackend {
    fn with(mut self, name: &str, pages: &[&str]) -> Self {
        self.documents
            .insert(name.to_string(), pages.iter().map(|p| p.to_string()).collect());
        self
    }
}

struct MemoryDocument<'a> {
    pages: &'a [String],
}

impl PdfBackend for MemoryBackend {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn PdfDocumentHandle + 'a>, PdfToTextError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self.documents.get(&name) {
            Some(pages) => Ok(Box::new(MemoryDocument { pages })),
            None => Err(PdfToTextError::ParseFailure {
                path: path.to_path_buf(),
                detail: "FormatError".to_string(),
            }),
        }
    }
}

impl PdfDocumentHandle for MemoryDocument<'_> {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String, PdfToTextError> {
        Ok(self.pages[index].clone())
    }
}

/// Write a file that passes the `%PDF` header check.
fn pdf_file(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n").unwrap();
    path
}

fn headings(md: &str) -> Vec<String> {
    md.lines()
        .filter(|l| l.starts_with("## Page "))
        .map(str::to_string)
        .collect()
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn blank_second_page_of_three_is_skipped() {
    let dir = TempDir::new().unwrap();
    let pdf = pdf_file(&dir, "three.pdf");
    let backend = MemoryBackend::default().with("three.pdf", &["Intro", "   \n  ", "Summary"]);

    let written = convert_with(&backend, &pdf, None, &ConversionConfig::default()).unwrap();
    let md = std::fs::read_to_string(&written).unwrap();

    assert_eq!(headings(&md), vec!["## Page 1", "## Page 3"]);
    assert_eq!(md.matches("*3 pages*").count(), 1);
    assert_eq!(
        md,
        "# three.pdf\n\n*3 pages*\n\n---\n## Page 1\n\nIntro\n\n---\n## Page 3\n\nSummary\n"
    );
}

#[test]
fn page_count_line_appears_exactly_once() {
    let dir = TempDir::new().unwrap();
    let pdf = pdf_file(&dir, "many.pdf");
    let pages: Vec<String> = (1..=12).map(|i| format!("text of page {i}")).collect();
    let page_refs: Vec<&str> = pages.iter().map(String::as_str).collect();
    let backend = MemoryBackend::default().with("many.pdf", &page_refs);

    let out = extract(&backend, &pdf, &ConversionConfig::default()).unwrap();

    assert_eq!(out.markdown.matches("*12 pages*").count(), 1);
    let expected: Vec<String> = (1..=12).map(|i| format!("## Page {i}")).collect();
    assert_eq!(headings(&out.markdown), expected);
}

#[test]
fn page_text_is_trimmed_but_inner_whitespace_kept() {
    let dir = TempDir::new().unwrap();
    let pdf = pdf_file(&dir, "ws.pdf");
    let backend = MemoryBackend::default().with("ws.pdf", &["\n\n  Title\n\n  indented line \t\n"]);

    let out = extract(&backend, &pdf, &ConversionConfig::default()).unwrap();

    assert!(out.markdown.contains("\n\nTitle\n\n  indented line\n"), "got: {:?}", out.markdown);
}

#[test]
fn conversion_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let pdf = pdf_file(&dir, "same.pdf");
    let out = dir.path().join("same-out.md");
    let backend = MemoryBackend::default().with("same.pdf", &["α β γ", "", "ünïcödé"]);
    let config = ConversionConfig::default();

    convert_with(&backend, &pdf, Some(&out), &config).unwrap();
    let first = std::fs::read(&out).unwrap();
    convert_with(&backend, &pdf, Some(&out), &config).unwrap();
    let second = std::fs::read(&out).unwrap();

    assert_eq!(first, second);
    assert!(String::from_utf8(first).unwrap().contains("ünïcödé"));
}

#[test]
fn omitted_output_uses_md_extension() {
    let dir = TempDir::new().unwrap();
    let pdf = pdf_file(&dir, "notes.pdf");
    let backend = MemoryBackend::default().with("notes.pdf", &["x"]);

    let written = convert_with(&backend, &pdf, None, &ConversionConfig::default()).unwrap();

    assert_eq!(written, default_output_path(&pdf));
    assert_eq!(written, dir.path().join("notes.md"));
    assert!(written.exists());
}

#[test]
fn missing_input_is_not_found_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let pdf = dir.path().join("nowhere.pdf");
    let backend = MemoryBackend::default().with("nowhere.pdf", &["x"]);

    let err = convert_with(&backend, &pdf, None, &ConversionConfig::default()).unwrap_err();

    assert!(matches!(err, PdfToTextError::NotFound { .. }), "got {err:?}");
    assert!(err.to_string().contains("nowhere.pdf"));
    assert!(!dir.path().join("nowhere.md").exists());
}

#[test]
fn non_pdf_input_is_parse_failure_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("readme.pdf");
    std::fs::write(&path, "just some text, no header").unwrap();
    let backend = MemoryBackend::default().with("readme.pdf", &["x"]);

    let err = convert_with(&backend, &path, None, &ConversionConfig::default()).unwrap_err();

    assert!(matches!(err, PdfToTextError::ParseFailure { .. }), "got {err:?}");
    assert!(!dir.path().join("readme.md").exists());
}

#[test]
fn engine_open_failure_is_parse_failure_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let pdf = pdf_file(&dir, "corrupt.pdf");
    let backend = MemoryBackend::default();

    let err = convert_with(&backend, &pdf, None, &ConversionConfig::default()).unwrap_err();

    match err {
        PdfToTextError::ParseFailure { detail, .. } => assert_eq!(detail, "FormatError"),
        other => panic!("expected ParseFailure, got {other:?}"),
    }
    assert!(!dir.path().join("corrupt.md").exists());
}

#[test]
fn missing_output_directory_is_write_failure() {
    let dir = TempDir::new().unwrap();
    let pdf = pdf_file(&dir, "ok.pdf");
    let out = dir.path().join("missing-dir").join("ok.md");
    let backend = MemoryBackend::default().with("ok.pdf", &["x"]);

    let err = convert_with(&backend, &pdf, Some(&out), &ConversionConfig::default()).unwrap_err();

    assert!(matches!(err, PdfToTextError::WriteFailure { .. }), "got {err:?}");
    assert!(!out.exists());
}
