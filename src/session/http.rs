// SPDX-License-Identifier: MIT
//! Markup-only session backed by a plain HTTP client.
//!
//! No rendering happens here — the only "screenshot" this session can
//! produce is the raw HTML of the last response, which is exactly what
//! suites running against an HTTP-only driver get.

use crate::error::{CaptureError, Result};
use crate::session::{BrowserSession, Capability};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

/// A markup-only [`BrowserSession`] holding the last fetched page body.
#[derive(Debug)]
pub struct HttpSession {
    client: reqwest::Client,
    body: Mutex<Option<String>>,
}

impl HttpSession {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            body: Mutex::new(None),
        }
    }

    /// Fetch `url` and retain its body as the current page markup.
    ///
    /// # Errors
    ///
    /// [`CaptureError::Http`] on connection or non-2xx status failures;
    /// the previously held markup is kept in that case.
    pub async fn goto(&self, url: &str) -> Result<()> {
        let text = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(url = %url, bytes = text.len(), "page fetched");
        *self.body.lock().await = Some(text);
        Ok(())
    }
}

impl Default for HttpSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrowserSession for HttpSession {
    fn capability(&self) -> Capability {
        Capability::MarkupOnly
    }

    async fn markup(&self) -> Result<String> {
        self.body
            .lock()
            .await
            .clone()
            .ok_or(CaptureError::NoPageLoaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_markup_before_any_fetch_is_no_page_loaded() {
        let session = HttpSession::new();
        let err = session.markup().await.unwrap_err();
        assert!(matches!(err, CaptureError::NoPageLoaded));
    }
}
