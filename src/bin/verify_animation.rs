//! Animation verification capture
//!
//! Loads the local dev server from the top of the page and waits a full
//! 5 seconds so animations can finish before the screenshot is taken.

use std::time::Duration;

use pagesnap::{capture, CaptureJob, Result};

const TARGET_URL: &str = "http://localhost:8000";
const OUTPUT_PATH: &str = "verification/verification.png";
const SETTLE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let job = CaptureJob::new(TARGET_URL, OUTPUT_PATH).settle(SETTLE);

    let path = capture(&job).await?;
    println!("Screenshot saved to {}", path.display());
    Ok(())
}
