// SPDX-License-Identifier: MIT
//! Renderable session backed by a headless Chromium/Chrome subprocess.
//!
//! Strategy:
//!   1. `ChromeSession::new()` probes PATH for a supported browser binary.
//!   2. `render_png()` spawns the browser with `--headless --screenshot
//!      --window-size=WxH` against the last visited URL; the browser writes
//!      `screenshot.png` into an isolated temp directory.
//!   3. The file is read back and validated for size.
//!
//! Rendering a page this way re-navigates on every capture, which is exactly
//! what a step-level snapshot wants: the artifact reflects the URL the
//! scenario is currently on.

use crate::error::{CaptureError, Result};
use crate::session::{BrowserSession, Capability};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Maximum accepted image size (10 MB raw PNG bytes).
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Browser binaries to probe, in preference order.
const CANDIDATE_BROWSERS: &[&str] = &["chromium", "chrome", "google-chrome", "chromium-browser"];

const DEFAULT_VIEWPORT: (u32, u32) = (1280, 720);
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// A renderable [`BrowserSession`] driving a headless browser binary.
#[derive(Debug)]
pub struct ChromeSession {
    browser: String,
    timeout_secs: u64,
    viewport: Mutex<(u32, u32)>,
    url: Mutex<Option<String>>,
}

impl ChromeSession {
    /// Detect the first headless-capable browser binary on PATH.
    ///
    /// Returns the binary name (e.g. `"chromium"`) or `None` if none of
    /// the candidates can be found.
    pub fn detect_browser() -> Option<String> {
        for candidate in CANDIDATE_BROWSERS {
            if on_path(candidate) {
                debug!(browser = *candidate, "headless browser detected on PATH");
                return Some((*candidate).to_string());
            }
        }
        None
    }

    /// Create a session using the first available headless browser.
    ///
    /// # Errors
    ///
    /// [`CaptureError::NoBrowser`] when no candidate binary is on PATH.
    pub fn new() -> Result<Self> {
        let browser = Self::detect_browser().ok_or_else(|| CaptureError::NoBrowser {
            tried: CANDIDATE_BROWSERS.join(", "),
        })?;
        Ok(Self {
            browser,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            viewport: Mutex::new(DEFAULT_VIEWPORT),
            url: Mutex::new(None),
        })
    }

    /// Navigate the session. The URL is re-rendered on each capture.
    pub async fn goto(&self, url: &str) {
        *self.url.lock().await = Some(url.to_string());
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    fn capability(&self) -> Capability {
        Capability::Renderable
    }

    async fn render_png(&self) -> Result<Vec<u8>> {
        let url = self
            .url
            .lock()
            .await
            .clone()
            .ok_or(CaptureError::NoPageLoaded)?;
        let (width, height) = *self.viewport.lock().await;

        // Temp directory for output isolation — the browser writes
        // `screenshot.png` into its CWD.
        let tmp = TempDir::new().map_err(|e| CaptureError::SpawnFailed(e.to_string()))?;
        let screenshot_path = tmp.path().join("screenshot.png");

        let mut cmd = Command::new(&self.browser);
        cmd.arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--screenshot")
            .arg(screenshot_path.to_string_lossy().as_ref())
            .arg(format!("--window-size={width},{height}"))
            .arg(&url)
            .current_dir(tmp.path())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        debug!(browser = %self.browser, url = %url, width, height, "spawning headless browser");

        let mut child = cmd
            .spawn()
            .map_err(|e| CaptureError::SpawnFailed(e.to_string()))?;

        let wait_result = timeout(Duration::from_secs(self.timeout_secs), child.wait()).await;

        match wait_result {
            Err(_elapsed) => {
                // Timeout — kill the child to avoid zombie processes.
                let _ = child.kill().await;
                warn!(url = %url, secs = self.timeout_secs, "browser screenshot timed out");
                return Err(CaptureError::Timeout(self.timeout_secs));
            }
            Ok(Err(e)) => {
                return Err(CaptureError::SpawnFailed(e.to_string()));
            }
            Ok(Ok(status)) => {
                if !status.success() {
                    // Non-zero exit — a partial screenshot may still have
                    // been written, so fall through and check the file.
                    warn!(url = %url, status = ?status, "browser exited with non-zero status");
                }
            }
        }

        if !screenshot_path.exists() {
            return Err(CaptureError::NoOutput);
        }

        read_png(&screenshot_path)
    }

    async fn resize(&self, width: u32, height: u32) -> Result<()> {
        *self.viewport.lock().await = (width, height);
        Ok(())
    }
}

/// Check if a binary is available on PATH using `which` semantics.
fn on_path(binary: &str) -> bool {
    if let Ok(path_var) = std::env::var("PATH") {
        for dir in path_var.split(':') {
            let candidate = Path::new(dir).join(binary);
            if candidate.is_file() {
                return true;
            }
        }
    }
    false
}

/// Read a PNG file from disk and validate its size.
fn read_png(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|e| CaptureError::io(path, e))?;

    if bytes.is_empty() {
        return Err(CaptureError::NoOutput);
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(CaptureError::SizeExceeded(bytes.len()));
    }

    Ok(bytes)
}
