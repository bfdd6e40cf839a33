// SPDX-License-Identifier: MIT
//! Browser session abstraction.
//!
//! The coordinator never inspects concrete session types. Each session
//! reports a [`Capability`] and the coordinator dispatches on that enum
//! once per capture — new backends extend the enum's coverage by
//! implementing the trait, not by special-casing types.

pub mod chrome;
pub mod http;

use crate::error::{CaptureError, Result};
use async_trait::async_trait;

/// What a browser session can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Can only return raw page markup (HTTP-only client, no rendering).
    MarkupOnly,
    /// Can render a pixel screenshot of the current viewport.
    Renderable,
    /// Supports neither — captures are skipped, not errors.
    Unsupported,
}

/// A controlled browser or HTTP client the suite drives its steps through.
///
/// Default method bodies return [`CaptureError::UnsupportedSession`] so an
/// implementation only overrides what its capability actually covers.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Capability variant this session dispatches under.
    fn capability(&self) -> Capability;

    /// Raw markup of the current page.
    ///
    /// Errors with [`CaptureError::NoPageLoaded`] when nothing has been
    /// visited yet — the coordinator treats that as a skip.
    async fn markup(&self) -> Result<String> {
        Err(CaptureError::UnsupportedSession)
    }

    /// Rendered PNG of the current viewport.
    async fn render_png(&self) -> Result<Vec<u8>> {
        Err(CaptureError::UnsupportedSession)
    }

    /// Resize the viewport. Sessions without window control keep the
    /// default no-op; resizing them is not an error.
    async fn resize(&self, _width: u32, _height: u32) -> Result<()> {
        Ok(())
    }
}
