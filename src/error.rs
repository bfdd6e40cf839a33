// SPDX-License-Identifier: MIT
//! Typed error taxonomy for capture operations.
//!
//! Two of these variants are not faults at all: `NoPageLoaded` and
//! `UnsupportedSession` mean "there is nothing to capture" and are demoted
//! to a skip by the coordinator. Everything else is a real failure that an
//! explicit save-screenshot step surfaces loudly, while the automatic
//! failure hook only logs it.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CaptureError>;

#[derive(Debug, Error)]
pub enum CaptureError {
    /// The session has not visited any page yet, so there is no markup or
    /// viewport to capture. Expected during suite setup — treated as a skip.
    #[error("no page has been loaded in this session")]
    NoPageLoaded,

    /// The session supports neither markup nor image capture.
    #[error("session supports neither markup nor image capture")]
    UnsupportedSession,

    /// No headless browser binary was found on PATH.
    #[error("no headless browser found on PATH (tried: {tried})")]
    NoBrowser { tried: String },

    /// The browser process could not be started.
    #[error("failed to start browser process: {0}")]
    SpawnFailed(String),

    /// The browser did not produce output within the configured timeout.
    #[error("browser did not produce output within {0} seconds")]
    Timeout(u64),

    /// The browser exited but wrote no screenshot file.
    #[error("browser exited but produced no screenshot file")]
    NoOutput,

    /// The rendered image exceeds the size cap.
    #[error("screenshot is too large ({0} bytes)")]
    SizeExceeded(usize),

    /// Page fetch failed in the markup-only adapter.
    #[error("page fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Capture was requested while no step is executing, so no filename
    /// can be derived.
    #[error("capture requested outside of a running step")]
    NoStepContext,

    /// No file in the output directory matches the asserted wildcard.
    #[error("unable to find files matching wildcard '{0}'")]
    NoMatch(String),

    /// The asserted wildcard is not a valid glob pattern.
    #[error("invalid wildcard pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Directory creation, purge, or artifact write failed.
    #[error("filesystem error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CaptureError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for conditions that mean "nothing to capture" rather than a
    /// fault: the coordinator reports these as `CaptureOutcome::Skipped`.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::NoPageLoaded | Self::UnsupportedSession)
    }
}
