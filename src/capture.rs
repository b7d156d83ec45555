//! Screenshot capture runner
//!
//! One linear pass: launch a scoped browser, open the page, optionally
//! scroll, sleep out the settle window, write the PNG, shut the browser
//! down. The browser is released on every exit path.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::browser::Browser;
use crate::error::Result;
use crate::page::Page;
use crate::BrowserConfig;

/// Description of a single capture run
#[derive(Debug, Clone)]
pub struct CaptureJob {
    /// Page to load
    pub url: String,
    /// Destination for the PNG (overwritten if present)
    pub output: PathBuf,
    /// Fixed delay before capture, giving animations time to finish
    pub settle: Duration,
    /// Optional vertical scroll offset applied before the settle wait
    pub scroll_y: Option<f64>,
    /// Browser launch options
    pub browser: BrowserConfig,
}

impl CaptureJob {
    /// Capture `url` into `output` after a 2 second settle
    pub fn new(url: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            output: output.into(),
            settle: Duration::from_secs(2),
            scroll_y: None,
            browser: BrowserConfig::default(),
        }
    }

    /// Set the settle delay
    pub fn settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Scroll to a vertical offset before the settle wait
    pub fn scroll_to(mut self, y: f64) -> Self {
        self.scroll_y = Some(y);
        self
    }

    /// Override the browser launch options
    pub fn browser(mut self, browser: BrowserConfig) -> Self {
        self.browser = browser;
        self
    }
}

/// Run a capture job, returning the path of the written PNG
///
/// Failures at any step (launch, navigation, capture, write) abort the run;
/// the browser is still closed before the error is returned.
pub async fn capture(job: &CaptureJob) -> Result<PathBuf> {
    tracing::info!(url = %job.url, output = %job.output.display(), "starting capture");

    let browser = Browser::launch_with_config(job.browser.clone()).await?;

    // Keep the close on the path of both outcomes
    let outcome = capture_on(&browser, job).await;
    let closed = browser.close().await;

    let path = outcome?;
    closed?;

    tracing::info!(output = %path.display(), "capture complete");
    Ok(path)
}

async fn capture_on(browser: &Browser, job: &CaptureJob) -> Result<PathBuf> {
    let page = browser.new_page(&job.url).await?;

    if let Some(y) = job.scroll_y {
        page.scroll_to(0.0, y).await?;
    }

    // Fixed delay only, no completion signal
    tracing::debug!(settle_ms = job.settle.as_millis() as u64, "settling");
    tokio::time::sleep(job.settle).await;

    screenshot_to_file(&page, &job.output).await?;
    browser.close_page(&page).await?;
    Ok(job.output.clone())
}

/// Write the image, creating parent directories as needed
fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Convenience wrapper: take one screenshot of `page` and write it to `path`
pub async fn screenshot_to_file(page: &Page, path: impl AsRef<Path>) -> Result<()> {
    let png = page.screenshot().await?;
    write_output(path.as_ref(), &png)
}
