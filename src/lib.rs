// SPDX-License-Identifier: MIT
//! stepshot — screenshot and markup capture for BDD browser test suites.
//!
//! The crate plugs into a cucumber-style test runner's lifecycle hooks and
//! captures an artifact of the active browser session either on demand
//! ("I save screenshot") or automatically when a step fails. Sessions that
//! can render pixels produce `.png` files; HTTP-only sessions produce
//! `.html` snapshots of the current page markup.
//!
//! The capture logic itself is sequential and synchronous — one coordinator
//! per suite run, one step context at a time. Anything asynchronous (page
//! loads, subprocess waits) lives inside the session adapters.

pub mod capture;
pub mod config;
pub mod error;
pub mod session;

pub use capture::filename::StepContext;
pub use capture::{CaptureCoordinator, CaptureOutcome};
pub use config::CaptureConfig;
pub use error::{CaptureError, Result};
pub use session::chrome::ChromeSession;
pub use session::http::HttpSession;
pub use session::{BrowserSession, Capability};
