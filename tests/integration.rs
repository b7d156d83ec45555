//! Integration tests for pagesnap
//!
//! These tests require Chrome to be installed and available.
//! Run with: cargo test --test integration -- --ignored

use std::time::Duration;

use pagesnap::{capture, Browser, CaptureJob};

/// Check if Chrome is available
fn chrome_available() -> bool {
    pagesnap::browser::find_chrome().is_ok()
}

fn temp_output(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("pagesnap-it-{}-{}", std::process::id(), name))
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_browser_launch() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let browser = Browser::launch().await.expect("Failed to launch browser");

    let version = browser.version().await.expect("Failed to get version");
    assert!(!version.is_empty());

    browser.close().await.expect("Failed to close browser");
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_page_navigation() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let browser = Browser::launch().await.expect("Failed to launch browser");
    let page = browser
        .new_page("data:text/html,<title>Test Title</title><h1>Hello</h1>")
        .await
        .expect("Failed to create page");

    let url = page.url().await.expect("Failed to get URL");
    assert!(url.starts_with("data:"));

    let title = page.title().await.expect("Failed to get title");
    assert_eq!(title, "Test Title");

    browser.close().await.expect("Failed to close browser");
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_navigation_failure_is_an_error() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let browser = Browser::launch().await.expect("Failed to launch browser");

    // Nothing listens here; Chrome reports net::ERR_CONNECTION_REFUSED
    let result = browser.new_page("http://127.0.0.1:1/").await;
    assert!(matches!(result, Err(pagesnap::Error::Navigation(_))));

    browser.close().await.expect("Failed to close browser");
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_screenshot_png() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let browser = Browser::launch().await.expect("Failed to launch browser");
    let page = browser
        .new_page("data:text/html,<body style='background:red'><h1>Red</h1></body>")
        .await
        .expect("Failed to create page");

    let png = page.screenshot().await.expect("Failed to take screenshot");

    // Check PNG magic bytes
    assert!(png.len() > 100);
    assert_eq!(&png[0..4], &[0x89, 0x50, 0x4E, 0x47]);

    browser.close().await.expect("Failed to close browser");
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_screenshot_jpeg() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let browser = Browser::launch().await.expect("Failed to launch browser");
    let page = browser
        .new_page("data:text/html,<body style='background:blue'><h1>Blue</h1></body>")
        .await
        .expect("Failed to create page");

    let jpeg = page
        .screenshot_jpeg(80)
        .await
        .expect("Failed to take screenshot");

    // Check JPEG magic bytes
    assert!(jpeg.len() > 100);
    assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);

    browser.close().await.expect("Failed to close browser");
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_close_page_tears_down_target() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let browser = Browser::launch().await.expect("Failed to launch browser");
    let page = browser
        .new_page("data:text/html,<h1>closing</h1>")
        .await
        .expect("Failed to create page");

    browser.close_page(&page).await.expect("Failed to close page");

    // Commands to a closed target's session must fail
    assert!(page.title().await.is_err());

    browser.close().await.expect("Failed to close browser");
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_scroll_to_offset() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let browser = Browser::launch().await.expect("Failed to launch browser");
    let page = browser
        .new_page("data:text/html,<body style='height:5000px'>tall</body>")
        .await
        .expect("Failed to create page");

    page.scroll_to(0.0, 1000.0).await.expect("Failed to scroll");
    page.wait(100).await;

    let y = page.scroll_y().await.expect("Failed to read scrollY");
    assert!((y - 1000.0).abs() < 1.0, "expected scrollY 1000, got {}", y);

    browser.close().await.expect("Failed to close browser");
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_wait_for_ready() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let browser = Browser::launch().await.expect("Failed to launch browser");
    let page = browser
        .new_page("data:text/html,<h1>Loaded</h1>")
        .await
        .expect("Failed to create page");

    page.wait_for_ready(5000)
        .await
        .expect("Document never became ready");

    browser.close().await.expect("Failed to close browser");
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_capture_writes_png_file() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let output = temp_output("capture.png");
    let _ = std::fs::remove_file(&output);

    let job = CaptureJob::new(
        "data:text/html,<body style='background:green'></body>",
        &output,
    )
    .settle(Duration::from_millis(200));

    let path = capture(&job).await.expect("Capture failed");
    assert_eq!(path, output);

    let bytes = std::fs::read(&output).expect("Output file missing");
    assert!(bytes.len() > 100);
    assert_eq!(&bytes[0..4], &[0x89, 0x50, 0x4E, 0x47]);

    let _ = std::fs::remove_file(&output);
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_capture_rerun_overwrites_output() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let output = temp_output("rerun.png");
    std::fs::write(&output, b"stale placeholder").expect("seed write failed");

    let job = CaptureJob::new("data:text/html,<h1>fresh</h1>", &output)
        .settle(Duration::from_millis(200));
    capture(&job).await.expect("Capture failed");

    let bytes = std::fs::read(&output).expect("Output file missing");
    assert_eq!(&bytes[0..4], &[0x89, 0x50, 0x4E, 0x47]);

    let _ = std::fs::remove_file(&output);
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_capture_navigation_failure_leaves_no_output() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let output = temp_output("unreachable.png");
    let _ = std::fs::remove_file(&output);

    let job = CaptureJob::new("http://127.0.0.1:1/", &output).settle(Duration::from_millis(100));
    let result = capture(&job).await;

    assert!(matches!(result, Err(pagesnap::Error::Navigation(_))));
    assert!(!output.exists());
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_page_events_reach_the_receiver() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    use pagesnap::cdp::transport::launch_chrome;
    use pagesnap::cdp::{Connection, Transport};

    let chrome = pagesnap::browser::find_chrome().expect("Chrome not found");
    let dir = temp_output("events-profile");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("profile dir");

    let args = vec![
        "--headless=new".to_string(),
        "--no-first-run".to_string(),
        "--no-sandbox".to_string(),
        format!("--user-data-dir={}", dir.display()),
    ];
    let (child, ws_url) = launch_chrome(&chrome, &args).expect("Failed to launch Chrome");
    let transport = Transport::new(child, &ws_url).expect("Failed to connect");
    let conn = Connection::new(transport);

    let target_id = conn
        .create_target("about:blank", None, None)
        .await
        .expect("Failed to create target");
    let session = conn
        .attach_to_target(&target_id)
        .await
        .expect("Failed to attach");
    session.page_enable().await.expect("Failed to enable page");
    session
        .navigate("data:text/html,<h1>event source</h1>")
        .await
        .expect("Failed to navigate");

    // Page.enable + navigation produce lifecycle events on the channel
    let event = tokio::time::timeout(Duration::from_secs(10), conn.transport().recv_event())
        .await
        .expect("No event within 10s")
        .expect("Event channel closed");
    assert!(!event.method.is_empty());

    conn.close().await.expect("Failed to close browser");
    let _ = std::fs::remove_dir_all(&dir);
}

/// Check whether a process with the given pid is still alive
fn process_alive(pid: u32) -> bool {
    std::process::Command::new("kill")
        .args(["-0", &pid.to_string()])
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_no_browser_process_left_after_capture() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let browser = Browser::launch().await.expect("Failed to launch browser");
    let pid = browser.process_id().await;
    assert!(process_alive(pid));

    let page = browser
        .new_page("data:text/html,<h1>done</h1>")
        .await
        .expect("Failed to create page");
    page.screenshot().await.expect("Failed to take screenshot");

    browser.close().await.expect("Failed to close browser");
    assert!(!process_alive(pid), "Chrome pid {} survived close", pid);
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_no_browser_process_left_after_navigation_failure() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let browser = Browser::launch().await.expect("Failed to launch browser");
    let pid = browser.process_id().await;

    let result = browser.new_page("http://127.0.0.1:1/").await;
    assert!(result.is_err());

    browser.close().await.expect("Failed to close browser");
    assert!(!process_alive(pid), "Chrome pid {} survived close", pid);
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_capture_creates_nested_output_dirs() {
    if !chrome_available() {
        eprintln!("Chrome not found, skipping test");
        return;
    }

    let dir = temp_output("nested-dir");
    let _ = std::fs::remove_dir_all(&dir);
    let output = dir.join("verification/verification.png");

    let job = CaptureJob::new("data:text/html,<h1>nested</h1>", &output)
        .settle(Duration::from_millis(200));
    capture(&job).await.expect("Capture failed");

    assert!(output.exists());
    let _ = std::fs::remove_dir_all(&dir);
}
