//! Zip packaging of files and directory trees.

use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::paths::{archive_entry_name, archive_root_name};

/// Write `sources` into a new deflate-compressed zip at `archive_path`.
///
/// Each source is stored under its own name: `a/b.txt` becomes `b.txt`
/// and a directory `a/dir` becomes `dir/` with all its descendants below
/// it. Returns the number of entries written.
pub fn write_archive<P: AsRef<Path>>(archive_path: &Path, sources: &[P]) -> Result<usize> {
    let file = File::create(archive_path)
        .with_context(|| format!("Failed to create archive: {}", archive_path.display()))?;
    let mut writer = ZipWriter::new(file);

    let mut entries = 0;
    for src in sources {
        let src = src.as_ref();
        if !src.exists() {
            bail!("Source does not exist: {}", src.display());
        }
        let root = archive_root_name(src)?;
        entries += add_entries(&mut writer, src, &root, Path::new(""))?;
    }

    writer
        .finish()
        .with_context(|| format!("Failed to finish archive: {}", archive_path.display()))?;
    info!(archive = %archive_path.display(), entries, "wrote archive");
    Ok(entries)
}

/// Add `path` (stored as `root/relative`) and, for directories, everything
/// below it.
///
/// Symlinks to directories below the source root are stored as a single
/// directory entry and not descended into.
fn add_entries<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    path: &Path,
    root: &str,
    relative: &Path,
) -> Result<usize> {
    let name = archive_entry_name(root, relative);
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
    let is_link = !relative.as_os_str().is_empty()
        && fs::symlink_metadata(path)
            .with_context(|| format!("Failed to read metadata: {}", path.display()))?
            .file_type()
            .is_symlink();
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(metadata.permissions().mode() & 0o777);

    if !metadata.is_dir() {
        writer
            .start_file(name.as_str(), options)
            .with_context(|| format!("Failed to add archive entry: {name}"))?;
        let mut file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        io::copy(&mut file, writer)
            .with_context(|| format!("Failed to write archive entry: {name}"))?;
        debug!(entry = %name, "added file");
        return Ok(1);
    }

    let mut count = 0;
    // The filesystem root has no name of its own.
    if !name.is_empty() {
        writer
            .add_directory(name.as_str(), options)
            .with_context(|| format!("Failed to add archive entry: {name}/"))?;
        debug!(entry = %name, "added directory");
        count += 1;
    }
    if is_link {
        return Ok(count);
    }

    let mut children = fs::read_dir(path)
        .with_context(|| format!("Failed to read directory: {}", path.display()))?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to read directory: {}", path.display()))?;
    children.sort();

    for child in children {
        count += add_entries(writer, &path.join(&child), root, &relative.join(&child))?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn entry_names(archive: &Path) -> Vec<String> {
        let mut archive = ZipArchive::new(File::open(archive).unwrap()).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_write_archive_tree_and_file() {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join("pkg/data");
        fs::create_dir_all(data.join("sub")).unwrap();
        fs::write(data.join("a.txt"), "alpha").unwrap();
        fs::write(data.join("sub/b.txt"), "beta").unwrap();
        let top = temp.path().join("pkg/top.txt");
        fs::write(&top, "top").unwrap();
        let out = temp.path().join("out.zip");

        let count = write_archive(&out, &[&data, &top]).unwrap();

        assert_eq!(count, 5);
        assert_eq!(
            entry_names(&out),
            vec!["data/", "data/a.txt", "data/sub/", "data/sub/b.txt", "top.txt"]
        );

        let mut archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let mut contents = String::new();
        archive
            .by_name("data/sub/b.txt")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "beta");
    }

    #[test]
    fn test_write_archive_keeps_permissions() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join("run.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        let out = temp.path().join("out.zip");

        write_archive(&out, &[&script]).unwrap();

        let mut archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let entry = archive.by_name("run.sh").unwrap();
        assert_eq!(entry.unix_mode().unwrap() & 0o777, 0o755);
    }

    #[test]
    fn test_write_archive_does_not_follow_directory_links() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("pkg");
        fs::create_dir(&pkg).unwrap();
        fs::write(pkg.join("a.txt"), "a").unwrap();
        std::os::unix::fs::symlink(".", pkg.join("self")).unwrap();
        let out = temp.path().join("out.zip");

        let count = write_archive(&out, &[&pkg]).unwrap();

        assert_eq!(count, 3);
        assert_eq!(entry_names(&out), vec!["pkg/", "pkg/a.txt", "pkg/self/"]);
    }

    #[test]
    fn test_write_archive_follows_file_links() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("pkg");
        fs::create_dir(&pkg).unwrap();
        fs::write(pkg.join("real.txt"), "real").unwrap();
        std::os::unix::fs::symlink("real.txt", pkg.join("link.txt")).unwrap();
        let out = temp.path().join("out.zip");

        write_archive(&out, &[&pkg]).unwrap();

        let mut archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let mut contents = String::new();
        archive
            .by_name("pkg/link.txt")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "real");
    }

    #[test]
    fn test_write_archive_missing_source() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.zip");

        let err = write_archive(&out, &[temp.path().join("missing")]).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
