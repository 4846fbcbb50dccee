//! Behaviour of the `pdf-to-text` binary on bad input.
//!
//! These hold whether or not PDFium is installed on the test machine: every
//! failure, including a missing engine, must be one `ERROR:` line on stderr,
//! exit status 1, nothing on stdout, and no output file.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pdf-to-text"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn pdf-to-text")
}

fn assert_failed(out: &Output, context: &str) {
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(out.status.code(), Some(1), "[{context}] stderr: {stderr}");
    assert!(
        stderr.lines().any(|l| l.starts_with("ERROR: ")),
        "[{context}] expected an ERROR line, got: {stderr}"
    );
    assert!(
        out.stdout.is_empty(),
        "[{context}] stdout should be empty, got: {}",
        String::from_utf8_lossy(&out.stdout)
    );
}

fn markdown_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".md"))
        .collect()
}

#[test]
fn no_arguments_fails() {
    let dir = TempDir::new().unwrap();
    let out = run(&[], dir.path());
    assert_failed(&out, "no args");
    assert!(markdown_files(dir.path()).is_empty());
}

#[test]
fn missing_input_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let out = run(&["does-not-exist.pdf"], dir.path());
    assert_failed(&out, "missing input");
    assert!(!dir.path().join("does-not-exist.md").exists());
}

#[test]
fn non_pdf_input_fails_without_output() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.pdf"), "plain text pretending to be a PDF").unwrap();

    let out = run(&["notes.pdf", "explicit.md"], dir.path());

    assert_failed(&out, "non-pdf input");
    assert!(markdown_files(dir.path()).is_empty());
}

#[test]
fn unknown_flag_fails_with_usage() {
    let dir = TempDir::new().unwrap();
    let out = run(&["--no-such-flag", "a.pdf"], dir.path());

    assert_failed(&out, "unknown flag");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage: pdf-to-text"), "got: {stderr}");
}

#[test]
fn too_many_positionals_fail() {
    let dir = TempDir::new().unwrap();
    let out = run(&["a.pdf", "b.md", "c.md"], dir.path());
    assert_failed(&out, "three positionals");
}

#[test]
fn help_exits_successfully() {
    let dir = TempDir::new().unwrap();
    let out = run(&["--help"], dir.path());

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("pdf-to-text"), "got: {stdout}");
    assert!(stdout.contains("--install-pdfium"), "got: {stdout}");
}

#[test]
fn version_exits_successfully() {
    let dir = TempDir::new().unwrap();
    let out = run(&["--version"], dir.path());

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "got: {stdout}");
}

#[test]
fn unusable_engine_prints_install_instructions() {
    let dir = TempDir::new().unwrap();
    let lib = dir.path().join("libpdfium-broken.so");
    std::fs::write(&lib, b"this is not a shared library").unwrap();
    std::fs::write(dir.path().join("doc.pdf"), b"%PDF-1.4\n").unwrap();

    let out = run(
        &["--pdfium-lib", lib.to_str().unwrap(), "doc.pdf"],
        dir.path(),
    );

    assert_failed(&out, "broken engine");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("--install-pdfium"), "got: {stderr}");
    assert!(stderr.contains("PDFIUM_LIB_PATH"), "got: {stderr}");
    assert!(!dir.path().join("doc.md").exists());
}
