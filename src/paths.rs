//! Destination and archive path naming.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Whether `dest` names a directory to install *into* (trailing `/`).
pub fn is_directory_destination(dest: &Path) -> bool {
    dest.to_string_lossy().ends_with('/')
}

/// Where `src` lands when installed to `dest`.
///
/// A destination ending in `/` receives the source under its own base
/// name. Any other destination is used as-is.
#[must_use = "destination path should be used"]
pub fn install_destination(src: &Path, dest: &Path) -> PathBuf {
    if !is_directory_destination(dest) {
        return dest.to_path_buf();
    }
    match src.file_name() {
        Some(name) => dest.join(name),
        None => dest.to_path_buf(),
    }
}

/// Name of the top-level archive entry for `src`.
///
/// This is the last path component. Paths ending in `.` or `..` are
/// canonicalized first so the entry gets the real directory name.
pub fn archive_root_name(src: &Path) -> Result<String> {
    if let Some(name) = src.file_name() {
        return Ok(name.to_string_lossy().into_owned());
    }
    let canonical = src
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", src.display()))?;
    // The filesystem root has no name; store its children at top level.
    Ok(canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default())
}

/// Zip entry name for `relative` below `root`, using `/` separators.
pub fn archive_entry_name(root: &str, relative: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !root.is_empty() {
        parts.push(root.to_string());
    }
    parts.extend(
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    parts.join("/")
}
