//! Scrolled-page verification capture
//!
//! Loads the local dev server, scrolls 1000px down, waits 2 seconds for the
//! page to settle, and writes verification.png. Any failure exits non-zero.

use std::time::Duration;

use pagesnap::{capture, CaptureJob, Result};

const TARGET_URL: &str = "http://localhost:8000";
const OUTPUT_PATH: &str = "verification.png";
const SCROLL_Y: f64 = 1000.0;
const SETTLE: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let job = CaptureJob::new(TARGET_URL, OUTPUT_PATH)
        .scroll_to(SCROLL_Y)
        .settle(SETTLE);

    let path = capture(&job).await?;
    println!("Screenshot saved to {}", path.display());
    Ok(())
}
