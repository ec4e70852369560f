//! Per-recipe marker files.
//!
//! A marker pins a value (channel, username, version) that would otherwise
//! be derived. Reads are soft-missing: unreadable and absent files behave
//! identically. The version marker is write-once so later CI steps in the
//! same job see the value the first step derived.

use std::fs;
use std::path::Path;

use crate::defaults;
use crate::error::Result;
use crate::utils::io;

/// Read a single-line marker file from the recipe directory.
/// Returns `None` for absent, unreadable, or blank markers.
pub fn read_marker(recipe_dir: &Path, name: &str) -> Option<String> {
    let content = fs::read_to_string(recipe_dir.join(name)).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn channel_marker(recipe_dir: &Path) -> Option<String> {
    read_marker(recipe_dir, defaults::CHANNEL_MARKER)
}

pub fn username_marker(recipe_dir: &Path) -> Option<String> {
    read_marker(recipe_dir, defaults::USERNAME_MARKER)
}

pub fn version_marker(recipe_dir: &Path) -> Option<String> {
    read_marker(recipe_dir, defaults::VERSION_MARKER)
}

/// Write the version marker if it does not exist yet.
///
/// Returns whether a write happened. Once the marker is present, version
/// derivation for this recipe directory short-circuits on it, so an existing
/// marker is never overwritten.
pub fn pin_version(recipe_dir: &Path, version: &str) -> Result<bool> {
    let path = recipe_dir.join(defaults::VERSION_MARKER);
    if path.exists() {
        return Ok(false);
    }
    io::write_file_atomic(&path, version, "pin version marker")?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn read_marker_strips_line_terminators() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("conan_channel"), "testing\r\n").unwrap();
        assert_eq!(channel_marker(dir.path()), Some("testing".to_string()));
    }

    #[test]
    fn read_marker_treats_missing_as_none() {
        let dir = tempdir().unwrap();
        assert_eq!(version_marker(dir.path()), None);
    }

    #[test]
    fn read_marker_treats_blank_as_none() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("conan_user"), "\n").unwrap();
        assert_eq!(username_marker(dir.path()), None);
    }

    #[test]
    fn pin_version_is_write_once() {
        let dir = tempdir().unwrap();
        assert!(pin_version(dir.path(), "1.2.3").unwrap());
        assert!(!pin_version(dir.path(), "9.9.9").unwrap());
        assert_eq!(version_marker(dir.path()), Some("1.2.3".to_string()));
    }
}
