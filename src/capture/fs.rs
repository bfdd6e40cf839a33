// SPDX-License-Identifier: MIT
//! Output-directory plumbing: create, purge, write, wildcard-match.

use crate::error::{CaptureError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Create the output directory if needed. Recursive and idempotent.
/// On unix a newly created directory is made world-readable (0755); a
/// pre-existing directory keeps whatever mode it already has.
pub fn prepare_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| CaptureError::io(dir, e))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o755);
        fs::set_permissions(dir, perms).map_err(|e| CaptureError::io(dir, e))?;
    }
    Ok(())
}

/// Remove every regular file directly and recursively contained in `dir`.
/// The directory itself and any subdirectories are left intact. Calling
/// this on an empty or nonexistent directory succeeds silently.
pub fn purge_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        // Nothing to purge.
        return Ok(());
    }
    for entry in fs::read_dir(dir).map_err(|e| CaptureError::io(dir, e))? {
        let entry = entry.map_err(|e| CaptureError::io(dir, e))?;
        let path = entry.path();
        // file_type() does not follow symlinks: a symlink to a directory is
        // removed as a link, never descended into.
        let file_type = entry.file_type().map_err(|e| CaptureError::io(&path, e))?;
        if file_type.is_dir() {
            purge_dir(&path)?;
        } else {
            fs::remove_file(&path).map_err(|e| CaptureError::io(&path, e))?;
        }
    }
    debug!(dir = %dir.display(), "output directory purged");
    Ok(())
}

/// Write one artifact into `dir` and return its full path.
pub fn write_artifact(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, bytes).map_err(|e| CaptureError::io(&path, e))?;
    Ok(path)
}

/// File names directly inside `dir` matching a glob-style wildcard.
///
/// Matching is against names, not full paths, so directories containing
/// glob metacharacters cannot distort the pattern.
pub fn matching_files(dir: &Path, wildcard: &str) -> Result<Vec<PathBuf>> {
    let pattern = glob::Pattern::new(wildcard)?;
    let mut matches = Vec::new();
    if !dir.is_dir() {
        return Ok(matches);
    }
    for entry in fs::read_dir(dir).map_err(|e| CaptureError::io(dir, e))? {
        let entry = entry.map_err(|e| CaptureError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name();
        if pattern.matches(&name.to_string_lossy()) {
            matches.push(path);
        }
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_purge_leaves_subdirectories() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("nested");
        fs::create_dir(&sub).unwrap();
        fs::write(tmp.path().join("a.png"), b"x").unwrap();
        fs::write(sub.join("b.html"), b"y").unwrap();

        purge_dir(tmp.path()).unwrap();

        assert!(sub.is_dir(), "subdirectory must survive a purge");
        assert_eq!(fs::read_dir(&sub).unwrap().count(), 0);
        assert_eq!(
            fs::read_dir(tmp.path()).unwrap().count(),
            1,
            "only the empty subdirectory remains"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_prepare_dir_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("private");
        fs::create_dir(&dir).unwrap();
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o700)).unwrap();

        prepare_dir(&dir).unwrap();

        let mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o700, "pre-existing mode must not be clobbered");

        // A fresh directory still gets the default mode.
        let created = tmp.path().join("fresh");
        prepare_dir(&created).unwrap();
        let mode = fs::metadata(&created).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_purge_removes_symlink_without_following_it() {
        let tmp = TempDir::new().unwrap();
        let outside = tmp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("precious.txt"), b"keep").unwrap();

        let output = tmp.path().join("screenshots");
        fs::create_dir(&output).unwrap();
        std::os::unix::fs::symlink(&outside, output.join("link")).unwrap();

        purge_dir(&output).unwrap();

        assert!(
            outside.join("precious.txt").is_file(),
            "purge must never reach through a symlink"
        );
        assert!(!output.join("link").exists(), "the link itself is removed");
    }

    #[test]
    fn test_purge_nonexistent_dir_is_silent() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("never-created");
        purge_dir(&missing).unwrap();
    }

    #[test]
    fn test_matching_files_by_name_only() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("1.login.feature_[42].png"), b"x").unwrap();
        fs::write(tmp.path().join("2.login.feature_[42].html"), b"y").unwrap();

        let hits = matching_files(tmp.path(), "*.png").unwrap();
        assert_eq!(hits.len(), 1);
        assert!(matching_files(tmp.path(), "*.gif").unwrap().is_empty());
    }
}
