// SPDX-License-Identifier: MIT
//! The capture coordinator — decides when to capture, which mechanism the
//! active session supports, what to name the artifact, and where it lands.
//!
//! One coordinator value is created at suite start and threaded through
//! every lifecycle hook; the output directory lives inside it and is never
//! rediscovered per call.
//!
//! Step lifecycle: `before_step` records the current [`StepContext`],
//! `after_step` may trigger a capture, nothing survives across scenarios
//! except the suite configuration.

pub mod filename;
pub mod fs;

use crate::config::CaptureConfig;
use crate::error::{CaptureError, Result};
use crate::session::{BrowserSession, Capability};
use self::filename::StepContext;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Baseline viewport applied to renderable sessions of `@javascript`
/// scenarios, so screenshot dimensions are stable across runs.
const BASELINE_VIEWPORT: (u32, u32) = (1440, 900);

/// What a single best-effort capture attempt produced.
///
/// `Skipped` is the expected no-op (nothing loaded, session can't capture);
/// `Failed` is the unexpected one — loggable, but never allowed to fail the
/// suite when the capture was failure-triggered.
#[derive(Debug)]
pub enum CaptureOutcome {
    /// An artifact was written.
    Saved { path: PathBuf },
    /// Nothing to capture — an expected condition, not a fault.
    Skipped { reason: String },
    /// The capture itself broke.
    Failed { error: CaptureError },
}

/// Suite-scoped capture orchestrator. See the module docs for lifecycle.
#[derive(Debug)]
pub struct CaptureCoordinator {
    config: CaptureConfig,
    step: Option<StepContext>,
}

impl CaptureCoordinator {
    /// Suite-start hook: applies the purge policy and pins the resolved
    /// configuration for the rest of the run.
    ///
    /// # Errors
    ///
    /// Filesystem failure while purging. A missing output directory is
    /// "nothing to purge", not an error.
    pub fn initialize_suite(config: CaptureConfig) -> Result<Self> {
        if config.purge {
            fs::purge_dir(&config.dir)?;
        }
        Ok(Self { config, step: None })
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Scenario-start hook: normalize the viewport of renderable sessions
    /// for browser-driven (`@javascript`) scenarios. Sessions that cannot
    /// resize are left untouched.
    pub async fn before_scenario(&self, session: &dyn BrowserSession, javascript: bool) {
        if javascript && session.capability() == Capability::Renderable {
            let (w, h) = BASELINE_VIEWPORT;
            if let Err(e) = session.resize(w, h).await {
                debug!(err = %e, "viewport resize not applied");
            }
        }
    }

    /// Step-start hook: record where the step about to execute lives.
    /// Must run for every step — filenames are derived from the step
    /// currently executing, not the one last captured.
    pub fn before_step(&mut self, ctx: StepContext) {
        self.step = Some(ctx);
    }

    /// Step-end hook: capture automatically on failure when configured.
    ///
    /// Never raises. A broken capture is demoted to a `warn` log so that
    /// failure-screenshot logic can neither fail the suite nor mask the
    /// original assertion failure.
    pub async fn after_step(&self, session: &dyn BrowserSession, passed: bool) {
        if !self.config.fail || passed {
            return;
        }
        match self.capture_now(session).await {
            CaptureOutcome::Saved { path } => {
                debug!(path = %path.display(), "failure screenshot saved");
            }
            CaptureOutcome::Skipped { reason } => {
                debug!(reason = %reason, "failure screenshot skipped");
            }
            CaptureOutcome::Failed { error } => {
                warn!(err = %error, "failure screenshot could not be captured");
            }
        }
    }

    /// Best-effort capture of the current session state.
    ///
    /// Dispatches once on the session's [`Capability`]: markup-only
    /// sessions snapshot page HTML, renderable sessions a viewport PNG,
    /// anything else is a skip. Expected no-capture conditions come back
    /// as `Skipped`, real faults as `Failed` — the caller chooses how loud
    /// to be.
    pub async fn capture_now(&self, session: &dyn BrowserSession) -> CaptureOutcome {
        match self.try_capture(session).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_skip() => CaptureOutcome::Skipped {
                reason: e.to_string(),
            },
            Err(e) => CaptureOutcome::Failed { error: e },
        }
    }

    async fn try_capture(&self, session: &dyn BrowserSession) -> Result<CaptureOutcome> {
        fs::prepare_dir(&self.config.dir)?;

        let (bytes, ext) = match session.capability() {
            Capability::MarkupOnly => (session.markup().await?.into_bytes(), "html"),
            Capability::Renderable => (session.render_png().await?, "png"),
            Capability::Unsupported => {
                return Ok(CaptureOutcome::Skipped {
                    reason: "session supports neither markup nor image capture".to_string(),
                })
            }
        };

        let ctx = self.step.as_ref().ok_or(CaptureError::NoStepContext)?;
        let name = filename::make_file_name(ctx, ext);
        let path = fs::write_artifact(&self.config.dir, &name, &bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "artifact written");
        Ok(CaptureOutcome::Saved { path })
    }

    /// The explicit "I save screenshot" step.
    ///
    /// Loud where the automatic hook is quiet: filesystem and driver
    /// failures propagate so the step fails visibly. An expected skip
    /// still succeeds, returning `None`.
    pub async fn save_screenshot(&self, session: &dyn BrowserSession) -> Result<Option<PathBuf>> {
        match self.capture_now(session).await {
            CaptureOutcome::Saved { path } => Ok(Some(path)),
            CaptureOutcome::Skipped { reason } => {
                debug!(reason = %reason, "save screenshot skipped");
                Ok(None)
            }
            CaptureOutcome::Failed { error } => Err(error),
        }
    }

    /// The `file wildcard "<glob>" should exist` step.
    ///
    /// # Errors
    ///
    /// [`CaptureError::NoMatch`] when nothing in the output directory
    /// matches.
    pub fn assert_file_matching(&self, wildcard: &str) -> Result<Vec<PathBuf>> {
        let hits = fs::matching_files(&self.config.dir, wildcard)?;
        if hits.is_empty() {
            return Err(CaptureError::NoMatch(wildcard.to_string()));
        }
        Ok(hits)
    }

    /// The "I remove all files from screenshot directory" step.
    pub fn purge(&self) -> Result<()> {
        fs::purge_dir(&self.config.dir)
    }
}
