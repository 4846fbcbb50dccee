//! # pdfium-setup
//!
//! Find and bind the [PDFium](https://pdfium.googlesource.com/pdfium/) shared
//! library used by `pdf-to-text`, and install it on request.
//!
//! ## Lookup order
//!
//! [`locate_pdfium_library`] returns the first existing candidate of:
//!
//! 1. An explicit path supplied by the caller (e.g. `--pdfium-lib`).
//! 2. `PDFIUM_LIB_PATH`.
//! 3. The per-version cache directory, see [`pdfium_cache_dir`].
//! 4. The directory containing the running executable.
//!
//! [`bind_pdfium`] binds the located library, falling back to the system
//! library search path (`LD_LIBRARY_PATH`, `DYLD_LIBRARY_PATH`, `PATH`).
//!
//! Nothing here touches the network unless [`install_pdfium`] is called
//! explicitly. It downloads the platform archive from
//! [bblanchon/pdfium-binaries](https://github.com/bblanchon/pdfium-binaries)
//! and extracts the library into the cache directory.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pdfium_setup::{bind_pdfium, install_pdfium, is_pdfium_installed};
//!
//! if !is_pdfium_installed() {
//!     install_pdfium(None).expect("download failed");
//! }
//! let pdfium = bind_pdfium(None).expect("PDFium unavailable");
//! ```
//!
//! ## Environment variable overrides
//!
//! - `PDFIUM_LIB_PATH` — path to an existing pdfium library.
//! - `PDFIUM_AUTO_CACHE_DIR` — override the default cache directory.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use pdfium_render::prelude::Pdfium;
use thiserror::Error;

// ── Public constants ─────────────────────────────────────────────────────────

/// The pdfium-binaries release tag used by [`install_pdfium`].
pub const PDFIUM_VERSION: &str = "7690";

/// Environment variable naming an existing pdfium library.
pub const LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Environment variable overriding the cache root.
pub const CACHE_DIR_ENV: &str = "PDFIUM_AUTO_CACHE_DIR";

const BASE_URL: &str = "https://github.com/bblanchon/pdfium-binaries/releases/download";

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned by pdfium-setup operations.
#[derive(Error, Debug)]
pub enum PdfiumSetupError {
    /// The current OS/architecture combination has no published binary.
    #[error("Unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// No library file was found and the system library could not be bound.
    #[error("PDFium library not found (searched: {})", display_paths(.searched))]
    NotInstalled { searched: Vec<PathBuf> },

    /// A library file was found but `pdfium-render` could not load it.
    #[error("Failed to bind PDFium from '{path}': {reason}")]
    Bind { path: PathBuf, reason: String },

    /// Could not create the local cache directory.
    #[error("Cache directory error: {0}")]
    CacheDir(#[source] std::io::Error),

    /// Network download failed.
    #[error("Download failed: {0}")]
    Download(String),

    /// gzip/tar extraction failed.
    #[error("Archive extraction failed: {0}")]
    Extract(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "system library path".to_string();
    }
    let mut listed: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    listed.push("system library path".to_string());
    listed.join(", ")
}

/// Human-readable instructions for making PDFium available.
pub fn install_hint() -> String {
    format!(
        "Install it with `pdf-to-text --install-pdfium` (downloads into {}),\n\
         or point {LIB_PATH_ENV} at an existing libpdfium.",
        pdfium_cache_dir().display()
    )
}

// ── Internal: platform metadata ──────────────────────────────────────────────

struct PlatformInfo {
    /// Asset filename in the GitHub release, e.g. `pdfium-mac-arm64.tgz`.
    archive_name: &'static str,
    /// Relative path inside the archive, e.g. `lib/libpdfium.dylib`.
    lib_path_in_archive: &'static str,
    /// Filename on disk, e.g. `libpdfium.dylib`.
    lib_name: &'static str,
}

fn detect_platform() -> Result<PlatformInfo, PdfiumSetupError> {
    platform_for(std::env::consts::OS, std::env::consts::ARCH)
}

fn platform_for(os: &str, arch: &str) -> Result<PlatformInfo, PdfiumSetupError> {
    let (archive_name, lib_path_in_archive, lib_name) = match (os, arch) {
        ("macos", "aarch64") => ("pdfium-mac-arm64.tgz", "lib/libpdfium.dylib", "libpdfium.dylib"),
        ("macos", "x86_64") => ("pdfium-mac-x64.tgz", "lib/libpdfium.dylib", "libpdfium.dylib"),
        ("linux", "x86_64") => ("pdfium-linux-x64.tgz", "lib/libpdfium.so", "libpdfium.so"),
        ("linux", "aarch64") => ("pdfium-linux-arm64.tgz", "lib/libpdfium.so", "libpdfium.so"),
        ("windows", "x86_64") => ("pdfium-win-x64.tgz", "bin/pdfium.dll", "pdfium.dll"),
        ("windows", "aarch64") => ("pdfium-win-arm64.tgz", "bin/pdfium.dll", "pdfium.dll"),
        ("windows", "x86") => ("pdfium-win-x86.tgz", "bin/pdfium.dll", "pdfium.dll"),
        (os, arch) => {
            return Err(PdfiumSetupError::UnsupportedPlatform {
                os: os.to_string(),
                arch: arch.to_string(),
            })
        }
    };

    Ok(PlatformInfo {
        archive_name,
        lib_path_in_archive,
        lib_name,
    })
}

// ── Cache directory resolution ───────────────────────────────────────────────

/// Returns the per-version cache directory for the PDFium library.
///
/// Default locations:
/// - **macOS**: `~/Library/Caches/pdf-to-text/pdfium-{VERSION}/`
/// - **Linux**: `~/.cache/pdf-to-text/pdfium-{VERSION}/`
/// - **Windows**: `%LOCALAPPDATA%\pdf-to-text\pdfium-{VERSION}\`
///
/// Override the root by setting `PDFIUM_AUTO_CACHE_DIR`.
pub fn pdfium_cache_dir() -> PathBuf {
    cache_dir_from(std::env::var_os(CACHE_DIR_ENV))
}

fn cache_dir_from(override_root: Option<OsString>) -> PathBuf {
    let versioned = format!("pdfium-{PDFIUM_VERSION}");
    if let Some(root) = override_root.filter(|r| !r.is_empty()) {
        return PathBuf::from(root).join(versioned);
    }

    let base = dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".cache")))
        .unwrap_or_else(std::env::temp_dir);

    base.join("pdf-to-text").join(versioned)
}

// ── Lookup ───────────────────────────────────────────────────────────────────

/// Candidate library locations in lookup order. Missing files are included;
/// callers filter on existence.
fn candidate_paths(explicit: Option<&Path>, env_path: Option<OsString>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(p) = explicit {
        candidates.push(p.to_path_buf());
    }
    if let Some(p) = env_path.filter(|p| !p.is_empty()) {
        candidates.push(PathBuf::from(p));
    }
    if let Ok(info) = detect_platform() {
        candidates.push(pdfium_cache_dir().join(info.lib_name));

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(exe_dir.join(info.lib_name));
        }
    }

    candidates
}

/// Returns the first existing PDFium library file, or `None`.
///
/// An explicit path to a directory is resolved to the platform library name
/// inside it.
///
/// The result is absolute: a bare file name such as `libpdfium.so` would
/// otherwise send the dynamic loader to the system search path instead of
/// the current directory.
pub fn locate_pdfium_library(explicit: Option<&Path>) -> Option<PathBuf> {
    candidate_paths(explicit, std::env::var_os(LIB_PATH_ENV))
        .into_iter()
        .map(|p| resolve_dir(&p))
        .find(|p| p.is_file())
        .map(|p| make_absolute(&p))
}

fn make_absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn resolve_dir(path: &Path) -> PathBuf {
    if path.is_dir() {
        PathBuf::from(Pdfium::pdfium_platform_library_name_at_path(path))
    } else {
        path.to_path_buf()
    }
}

/// Returns `true` when [`locate_pdfium_library`] finds a library file
/// without an explicit path.
pub fn is_pdfium_installed() -> bool {
    locate_pdfium_library(None).is_some()
}

/// Binds to PDFium.
///
/// Tries the located library first (see [`locate_pdfium_library`]), then the
/// system library. Never downloads.
pub fn bind_pdfium(explicit: Option<&Path>) -> Result<Pdfium, PdfiumSetupError> {
    if let Some(path) = locate_pdfium_library(explicit) {
        return bind_pdfium_from_path(&path);
    }

    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|_| PdfiumSetupError::NotInstalled {
            searched: candidate_paths(explicit, std::env::var_os(LIB_PATH_ENV)),
        })
}

/// Binds to a PDFium library at an explicit `path`.
pub fn bind_pdfium_from_path(path: &Path) -> Result<Pdfium, PdfiumSetupError> {
    let path = make_absolute(path);
    Pdfium::bind_to_library(&path)
        .map(Pdfium::new)
        .map_err(|e| PdfiumSetupError::Bind {
            path: path.to_path_buf(),
            reason: format!("{e:?}"),
        })
}

// ── Install ──────────────────────────────────────────────────────────────────

static RESOLVED_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Downloads the platform PDFium library into [`pdfium_cache_dir`] and
/// returns its path. Returns immediately when the library is already cached.
///
/// `on_progress` receives `(bytes_downloaded, total_size_option)`.
pub fn install_pdfium(
    on_progress: Option<&dyn Fn(u64, Option<u64>)>,
) -> Result<PathBuf, PdfiumSetupError> {
    if let Some(path) = RESOLVED_PATH.get() {
        return Ok(path.clone());
    }

    let platform = detect_platform()?;
    let cache_dir = pdfium_cache_dir();
    let lib_path = cache_dir.join(platform.lib_name);

    // Only a completed extraction ever creates this file.
    if !lib_path.is_file() {
        std::fs::create_dir_all(&cache_dir).map_err(PdfiumSetupError::CacheDir)?;

        let url = format!("{BASE_URL}/chromium%2F{PDFIUM_VERSION}/{}", platform.archive_name);
        let archive = download_bytes(&url, on_progress)?;
        extract_library(&archive, platform.lib_path_in_archive, &lib_path)?;
    }

    Ok(RESOLVED_PATH.get_or_init(|| lib_path).clone())
}

/// Initial buffer size when the server announces no length, and the
/// upper bound on trusting an announced one.
const PREALLOC_DEFAULT: u64 = 35 * 1024 * 1024;
const PREALLOC_MAX: u64 = 64 * 1024 * 1024;

const READ_CHUNK: usize = 64 * 1024;

/// Fetches `url` and returns the body.
fn download_bytes(
    url: &str,
    on_progress: Option<&dyn Fn(u64, Option<u64>)>,
) -> Result<Vec<u8>, PdfiumSetupError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("pdf-to-text-pdfium-setup/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| PdfiumSetupError::Download(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| PdfiumSetupError::Download(format!("GET {url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PdfiumSetupError::Download(format!("HTTP {status} for {url}")));
    }

    let total = response.content_length();
    read_with_progress(response, total, on_progress)
        .map_err(|e| PdfiumSetupError::Download(format!("reading {url}: {e}")))
}

/// Reads `reader` to the end, reporting the running byte count after each
/// chunk.
fn read_with_progress(
    mut reader: impl Read,
    total: Option<u64>,
    on_progress: Option<&dyn Fn(u64, Option<u64>)>,
) -> std::io::Result<Vec<u8>> {
    let capacity = total.unwrap_or(PREALLOC_DEFAULT).min(PREALLOC_MAX);
    let mut body = Vec::with_capacity(capacity as usize);
    let mut chunk = vec![0u8; READ_CHUNK];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => return Ok(body),
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        body.extend_from_slice(&chunk[..n]);
        if let Some(report) = on_progress {
            report(body.len() as u64, total);
        }
    }
}

/// Copies `lib_path_in_archive` out of a gzipped tarball onto `dest_path`.
///
/// The bytes are staged in a temporary file next to `dest_path` and renamed
/// into place only once fully written, so a failed install never leaves a
/// truncated library where [`install_pdfium`] would find it next time.
fn extract_library(
    archive_bytes: &[u8],
    lib_path_in_archive: &str,
    dest_path: &Path,
) -> Result<(), PdfiumSetupError> {
    use flate2::read::GzDecoder;
    use tar::Archive;

    let extract_err = |e: std::io::Error| PdfiumSetupError::Extract(e.to_string());

    let dest_dir = dest_path.parent().ok_or_else(|| {
        PdfiumSetupError::Extract(format!("no parent directory for {}", dest_path.display()))
    })?;

    let mut archive = Archive::new(GzDecoder::new(archive_bytes));
    for entry in archive.entries().map_err(extract_err)? {
        let mut entry = entry.map_err(extract_err)?;
        if entry.path().map_err(extract_err)?.as_ref() != Path::new(lib_path_in_archive) {
            continue;
        }

        let mut staged =
            tempfile::NamedTempFile::new_in(dest_dir).map_err(PdfiumSetupError::CacheDir)?;
        std::io::copy(&mut entry, staged.as_file_mut()).map_err(extract_err)?;
        staged.as_file().sync_all().map_err(extract_err)?;
        staged.persist(dest_path).map_err(|e| {
            PdfiumSetupError::Extract(format!("installing {}: {}", dest_path.display(), e.error))
        })?;
        return Ok(());
    }

    Err(PdfiumSetupError::Extract(format!(
        "'{lib_path_in_archive}' is not in the archive"
    )))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
