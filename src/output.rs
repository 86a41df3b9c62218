//! Report artifacts on disk.
//!
//! Exports land in the configured output directory under fixed names. PDF
//! reports are printed from the rendered HTML by a headless Chrome/Chromium.
use crate::cli::Format;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const PDF_FILE_NAME: &str = "env-report.pdf";

/// Browser binaries probed on `PATH` when `CHROME` is unset.
#[cfg_attr(not(feature = "pdf"), allow(dead_code))]
const BROWSER_CANDIDATES: &[&str] = &["chromium", "chromium-browser", "google-chrome", "chrome"];

/// Artifact file name for an export format.
pub fn artifact_name(format: Format) -> String {
    match format {
        Format::Pdf => PDF_FILE_NAME.to_string(),
        other => format!("env-report-{}", other.as_str()),
    }
}

pub fn write_bytes(out_dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;
    let path = out_dir.join(name);
    fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote report artifact");
    Ok(path)
}

/// Write a JSON or CSV export.
pub fn write_export(out_dir: &Path, format: Format, contents: &str) -> Result<PathBuf> {
    if matches!(format, Format::Table | Format::Pdf) {
        return Err(anyhow!("{} is not a text export format", format.as_str()));
    }
    write_bytes(out_dir, &artifact_name(format), contents.as_bytes())
}

/// Print `html` to `env-report.pdf` in `out_dir`.
pub fn write_pdf(out_dir: &Path, html: &str) -> Result<PathBuf> {
    let bytes = print_pdf(html)?;
    write_bytes(out_dir, PDF_FILE_NAME, &bytes)
}

#[cfg(feature = "pdf")]
fn print_pdf(html: &str) -> Result<Vec<u8>> {
    use headless_chrome::types::PrintToPdfOptions;
    use headless_chrome::{Browser, LaunchOptions};
    use std::io::Write;

    let mut page = tempfile::Builder::new()
        .prefix("env-report-")
        .suffix(".html")
        .tempfile()
        .context("create temp HTML file")?;
    page.write_all(html.as_bytes())
        .context("write temp HTML file")?;
    page.flush().context("flush temp HTML file")?;

    let browser_path = find_browser();
    tracing::info!(
        browser = ?browser_path.as_ref().map(|p| p.display().to_string()),
        "launching headless browser"
    );
    let options = LaunchOptions::default_builder()
        .headless(true)
        .path(browser_path)
        .build()
        .map_err(|err| anyhow!("configure headless browser: {err}"))?;
    let browser = Browser::new(options).context("launch headless browser")?;
    let tab = browser.new_tab().context("open browser tab")?;

    let url = file_url(page.path());
    tab.navigate_to(&url)
        .context("load report HTML")?
        .wait_until_navigated()
        .context("wait for report HTML")?;

    // A4 in inches.
    let pdf = tab
        .print_to_pdf(Some(PrintToPdfOptions {
            paper_width: Some(8.27),
            paper_height: Some(11.69),
            print_background: Some(true),
            ..Default::default()
        }))
        .context("print report to PDF")?;
    Ok(pdf)
}

#[cfg(not(feature = "pdf"))]
fn print_pdf(_html: &str) -> Result<Vec<u8>> {
    Err(anyhow!(
        "PDF output requires env-validate built with the `pdf` feature"
    ))
}

#[cfg_attr(not(feature = "pdf"), allow(dead_code))]
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// `file://` URL for a local path, percent-encoded so spaces, `#` and `%`
/// in the temp directory survive navigation.
#[cfg_attr(not(feature = "pdf"), allow(dead_code))]
fn file_url(path: &Path) -> String {
    let text = path.to_string_lossy();
    let text = if cfg!(windows) {
        text.replace('\\', "/")
    } else {
        text.into_owned()
    };
    let mut url = String::from("file://");
    if !text.starts_with('/') {
        url.push('/');
    }
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' | b':' => {
                url.push(char::from(byte))
            }
            other => {
                url.push('%');
                url.push(char::from(HEX_DIGITS[usize::from(other >> 4)]));
                url.push(char::from(HEX_DIGITS[usize::from(other & 0x0f)]));
            }
        }
    }
    url
}

/// How an artifact path is shown to the user: the bare file name when it was
/// written to the working directory, the joined path otherwise.
pub fn display_path(out_dir: &Path, path: &Path) -> String {
    match path.file_name() {
        Some(name) if out_dir == Path::new(".") || out_dir.as_os_str().is_empty() => {
            name.to_string_lossy().to_string()
        }
        _ => path.display().to_string(),
    }
}

/// `CHROME` wins; otherwise the first known browser on `PATH`. `None` lets
/// the browser library apply its own discovery.
#[cfg_attr(not(feature = "pdf"), allow(dead_code))]
fn find_browser() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("CHROME").filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    BROWSER_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
}
