//! Recursive file installation with permission masks.

use anyhow::{bail, Context, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tracing::{debug, info};

use crate::paths::install_destination;

/// Permission settings for installed files and created directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallOptions {
    /// Requested mode for installed files.
    pub mode: u32,
    /// Requested mode for directories created on the way.
    pub dir_mode: u32,
    /// Bits cleared from both modes.
    pub umask: u32,
}

impl InstallOptions {
    pub const DEFAULT_MODE: u32 = 0o666;
    pub const DEFAULT_DIR_MODE: u32 = 0o777;
    pub const DEFAULT_UMASK: u32 = 0o022;

    /// Mode applied to installed files.
    pub fn file_mode(&self) -> u32 {
        self.mode & !self.umask
    }

    /// Mode applied to newly created directories.
    pub fn directory_mode(&self) -> u32 {
        self.dir_mode & !self.umask
    }
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            mode: Self::DEFAULT_MODE,
            dir_mode: Self::DEFAULT_DIR_MODE,
            umask: Self::DEFAULT_UMASK,
        }
    }
}

/// Set the permission bits of `path`.
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("Failed to set permissions: {}", path.display()))
}

/// Create `dir` and any missing parents, like `mkdir -p`.
///
/// Only directories created here get `mode`; existing ones are left alone.
pub fn create_dir_with_mode(dir: &Path, mode: u32) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.exists() {
        return Ok(());
    }
    if let Some(parent) = dir.parent() {
        create_dir_with_mode(parent, mode)?;
    }
    fs::create_dir(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    set_mode(dir, mode)?;
    debug!(dir = %dir.display(), mode = %format!("{mode:o}"), "created directory");
    Ok(())
}

/// Copy one file to `dest`, creating its parent directories first.
pub fn install_file(src: &Path, dest: &Path, options: &InstallOptions) -> Result<()> {
    if let Some(parent) = dest.parent() {
        create_dir_with_mode(parent, options.directory_mode())?;
    }
    fs::copy(src, dest).with_context(|| {
        format!("Failed to copy {} to {}", src.display(), dest.display())
    })?;
    set_mode(dest, options.file_mode())?;
    info!(src = %src.display(), dest = %dest.display(), "installed");
    Ok(())
}

/// Install `src` as `dest`.
///
/// Directories are mirrored entry by entry; everything else is installed
/// as a file. Returns the number of files installed.
pub fn install_as(src: &Path, dest: &Path, options: &InstallOptions) -> Result<usize> {
    if !src.exists() {
        bail!("Source does not exist: {}", src.display());
    }
    if !src.is_dir() {
        install_file(src, dest, options)?;
        return Ok(1);
    }

    let mut entries = fs::read_dir(src)
        .with_context(|| format!("Failed to read directory: {}", src.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to read directory: {}", src.display()))?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut installed = 0;
    for entry in entries {
        let name = entry.file_name();
        installed += install_as(&src.join(&name), &dest.join(&name), options)?;
    }
    Ok(installed)
}

/// Install every source to `dest`.
///
/// If `dest` ends with `/`, each source goes to `dest/<source name>`.
/// Otherwise each source is installed as `dest` itself.
pub fn install<P: AsRef<Path>>(
    sources: &[P],
    dest: &Path,
    options: &InstallOptions,
) -> Result<usize> {
    let mut installed = 0;
    for src in sources {
        let src = src.as_ref();
        installed += install_as(src, &install_destination(src, dest), options)?;
    }
    Ok(installed)
}
