//! CLI binary for pdf-to-text.
//!
//! A thin shim over the library crate: bind PDFium once at start-up, map
//! flags to `ConversionConfig`, print the written path on stdout.
//! Every failure is one `ERROR: <message>` on stderr and exit status 1.

use anyhow::{anyhow, Result};
use clap::error::ErrorKind;
use clap::Parser;
use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};
use pdf_to_text::{
    convert_with, ConversionConfig, ConversionProgressCallback, PdfiumBackend, ProgressCallback,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: pdf-to-text <input.pdf> [output.md]";

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Progress bar on stderr. indicatif hides it when stderr is not a terminal,
/// so piped runs stay silent. Nothing is drawn until the document is open,
/// and a bar dropped mid-run (conversion error) clears itself.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0).with_finish(ProgressFinish::AndClear);
        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        self.bar.set_length(total_pages as u64);
        self.bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages  {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ")
            .tick_strings(TICKS),
        );
        self.bar.set_prefix("Extracting");
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_page_extracted(&self, page_num: usize, _total_pages: usize, _text_len: usize) {
        self.bar.set_message(format!("page {page_num}"));
        self.bar.inc(1);
    }

    fn on_page_skipped(&self, page_num: usize, _total_pages: usize) {
        self.bar.set_message(format!("page {page_num} (no text)"));
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, _total_pages: usize, _emitted_pages: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r###"EXAMPLES:
  # Write report.md next to report.pdf
  pdf-to-text report.pdf

  # Choose the output file
  pdf-to-text report.pdf notes/report.md

  # Fetch the PDF engine once (about 30 MB)
  pdf-to-text --install-pdfium

OUTPUT:
  The Markdown starts with "# <file name>" and "*<N> pages*", followed by a
  "---" / "## Page <i>" block for every page that has text. Pages without
  text (scans, blank pages) are left out.

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to an existing libpdfium
  PDFIUM_AUTO_CACHE_DIR   Override the pdfium cache directory
  RUST_LOG                Log filter (e.g. pdf_to_text=debug)
"###;

/// Extract the text of every PDF page into a Markdown file.
#[derive(Parser, Debug)]
#[command(
    name = "pdf-to-text",
    version,
    about = "Extract the text of every PDF page into a Markdown file",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file to convert.
    input: Option<PathBuf>,

    /// Markdown file to write. Default: the input path with a .md extension.
    output: Option<PathBuf>,

    /// Path to the PDFium library (file or directory).
    #[arg(long, env = "PDFIUM_LIB_PATH", value_name = "PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Download PDFium into the local cache, print its path, and exit.
    #[arg(long)]
    install_pdfium: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Disable the progress bar.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let rendered = e.to_string();
            let first = rendered
                .lines()
                .next()
                .unwrap_or("invalid arguments")
                .trim_start_matches("error: ");
            eprintln!("ERROR: {first}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose { "debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns the path to print on stdout.
fn run(cli: &Cli) -> Result<PathBuf> {
    if cli.install_pdfium {
        let lib = install_engine(cli.quiet)?;
        if cli.input.is_none() {
            return Ok(lib);
        }
    }

    // ── Ensure PDFium engine is available ────────────────────────────────
    // Checked before anything else so a missing engine is reported the same
    // way whatever the arguments are.
    let backend = PdfiumBackend::bind(cli.pdfium_lib.as_deref())?;

    let input = cli
        .input
        .as_ref()
        .ok_or_else(|| anyhow!("missing input PDF\n{USAGE}"))?;

    let config = build_config(cli);
    let written = convert_with(&backend, input, cli.output.as_deref(), &config)?;
    Ok(written)
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli) -> ConversionConfig {
    let mut builder = ConversionConfig::builder();

    if let Some(ref lib) = cli.pdfium_lib {
        builder = builder.library_path(lib.clone());
    }
    if !cli.quiet {
        let cb: ProgressCallback = CliProgressCallback::new();
        builder = builder.progress_callback(cb);
    }

    builder.build()
}

/// Download PDFium with a byte-count progress bar.
fn install_engine(quiet: bool) -> Result<PathBuf> {
    if quiet {
        return Ok(pdfium_setup::install_pdfium(None)?);
    }

    let dl_bar = ProgressBar::new(0);
    dl_bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {bytes}/{total_bytes}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS),
    );
    dl_bar.set_prefix("PDF engine");
    dl_bar.enable_steady_tick(Duration::from_millis(80));

    let bar = dl_bar.clone();
    let path = pdfium_setup::install_pdfium(Some(&move |downloaded: u64, total: Option<u64>| {
        if let Some(t) = total {
            if bar.length().unwrap_or(0) != t {
                bar.set_length(t);
            }
        }
        bar.set_position(downloaded);
    }))?;

    dl_bar.finish_and_clear();
    Ok(path)
}
