// SPDX-License-Identifier: MIT
//! Artifact naming.
//!
//! Format: `<microsecond-timestamp>.<feature-basename>_[<line>].<ext>`.
//! The timestamp component carries the uniqueness guarantee: within one
//! sequentially executing process, successive captures land on distinct
//! microsecond values. Multi-process runs writing to the same directory are
//! not protected against — that is documented behavior, not a bug to fix
//! here.

use chrono::Utc;
use std::path::Path;

/// Position of the step currently executing, recorded fresh by the
/// before-step hook — filenames are derived from "the step running now",
/// never from a stale capture.
#[derive(Debug, Clone)]
pub struct StepContext {
    /// Path (or bare name) of the feature file; only the basename is used.
    pub feature_file: String,
    /// 1-based line of the step within the feature file.
    pub line: u32,
}

/// Build a unique, human-traceable artifact name for the given step.
pub fn make_file_name(ctx: &StepContext, ext: &str) -> String {
    let base = Path::new(&ctx.feature_file)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| ctx.feature_file.clone());
    let micros = Utc::now().timestamp_micros();
    format!("{micros}.{base}_[{line}].{ext}", line = ctx.line)
}
