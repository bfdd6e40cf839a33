// SPDX-License-Identifier: MIT
//! Suite-level capture configuration.
//!
//! Resolution happens exactly once, at suite start, and the resulting
//! [`CaptureConfig`] is immutable for the rest of the run — hooks never
//! re-read the environment or the config file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::error;

const DEFAULT_DIR: &str = "screenshots";
const DEFAULT_FAIL: bool = true;
const DEFAULT_PURGE: bool = false;

/// Environment override for the purge flag. When set, it wins over any
/// explicit or file-based `purge` value for that run.
pub const PURGE_ENV: &str = "STEPSHOT_PURGE";

const CONFIG_FILE: &str = "stepshot.toml";

/// `stepshot.toml` in the working directory — all fields are optional
/// overrides.
/// Priority: env var > explicit value > TOML > built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// Output directory for captured artifacts (default: "screenshots").
    dir: Option<PathBuf>,
    /// Capture automatically when a step fails (default: true).
    fail: Option<bool>,
    /// Purge the output directory at suite start (default: false).
    purge: Option<bool>,
}

fn load_toml(base: &Path) -> Option<TomlConfig> {
    let path = base.join(CONFIG_FILE);
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse stepshot.toml — using defaults");
            None
        }
    }
}

/// Immutable capture configuration for one suite run.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Directory artifacts are written to.
    pub dir: PathBuf,
    /// Capture automatically when a step fails.
    pub fail: bool,
    /// Purge the output directory before the first scenario.
    pub purge: bool,
}

impl CaptureConfig {
    /// Build config from explicit values + optional TOML file + environment.
    ///
    /// Priority (highest to lowest):
    ///   1. `STEPSHOT_PURGE` env var — purge flag only
    ///   2. explicit values passed by the host runner's configuration
    ///   3. `stepshot.toml` in the working directory
    ///   4. built-in defaults
    pub fn resolve(dir: Option<PathBuf>, fail: Option<bool>, purge: Option<bool>) -> Self {
        let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::resolve_in(&base, dir, fail, purge)
    }

    /// Same as [`CaptureConfig::resolve`], with `stepshot.toml` looked up in
    /// `base` instead of the working directory.
    pub fn resolve_in(
        base: &Path,
        dir: Option<PathBuf>,
        fail: Option<bool>,
        purge: Option<bool>,
    ) -> Self {
        let toml = load_toml(base).unwrap_or_default();

        let dir = dir
            .or(toml.dir)
            .unwrap_or_else(|| base.join(DEFAULT_DIR));

        let fail = fail.or(toml.fail).unwrap_or(DEFAULT_FAIL);

        let purge = std::env::var(PURGE_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| parse_bool(&s))
            .or(purge)
            .or(toml.purge)
            .unwrap_or(DEFAULT_PURGE);

        Self { dir, fail, purge }
    }
}

/// Lenient boolean parse for the env override. Anything other than a
/// recognized truthy value counts as false, mirroring a plain boolean cast.
fn parse_bool(s: &str) -> bool {
    matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
