//! # Pagesnap
//!
//! Headless-Chrome page screenshots over a minimal CDP implementation.
//!
//! Pagesnap launches Chrome, loads a page, lets rendering settle, and writes
//! a PNG to disk. It talks to Chrome directly over the DevTools Protocol
//! (a hand-rolled WebSocket client, no automation framework).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagesnap::{capture, CaptureJob};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> pagesnap::Result<()> {
//!     let job = CaptureJob::new("http://localhost:8000", "verification.png")
//!         .settle(Duration::from_secs(2))
//!         .scroll_to(1000.0);
//!
//!     capture(&job).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-level API
//!
//! ```rust,no_run
//! use pagesnap::Browser;
//!
//! # #[tokio::main]
//! # async fn main() -> pagesnap::Result<()> {
//! let browser = Browser::launch().await?;
//! let page = browser.new_page("http://localhost:8000").await?;
//! page.wait(2000).await;
//! let png = page.screenshot().await?;
//! std::fs::write("shot.png", png)?;
//! browser.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod capture;
pub mod cdp;
pub mod error;
pub mod page;

// Re-exports
pub use browser::Browser;
pub use capture::{capture, screenshot_to_file, CaptureJob};
pub use error::{Error, Result};
pub use page::Page;

/// Browser launch options
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Headless mode
    pub headless: bool,
    /// Path to Chrome/Chromium binary (None = discover from known locations)
    pub chrome_path: Option<String>,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
            viewport_width: 1920,
            viewport_height: 1080,
        }
    }
}

impl BrowserConfig {
    /// Create a visible (non-headless) config
    pub fn visible() -> Self {
        Self {
            headless: false,
            ..Default::default()
        }
    }
}
