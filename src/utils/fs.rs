//! Filesystem helpers for the build pipeline.
//!
//! Directory copy, cleanup and parent-creating writes. Every failure carries
//! the offending path as context.

use anyhow::{Context, Result};
use jwalk::WalkDir;
use std::fs;
use std::path::{Path, PathBuf};

const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect all files from a directory recursively, sorted.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| e.path())
        .collect();
    files.sort();
    files
}

/// Copy `src` into `dst` recursively, returning the written destination paths.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dst)
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    let mut written = Vec::new();
    for source in collect_all_files(src) {
        let rel = source.strip_prefix(src).unwrap_or(&source);
        let dest = dst.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::copy(&source, &dest).with_context(|| {
            format!("failed to copy {} to {}", source.display(), dest.display())
        })?;
        written.push(dest);
    }

    Ok(written)
}

/// Remove a directory tree if it exists.
pub fn remove_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("failed to remove directory {}", dir.display()))?;
    }
    Ok(())
}

/// Write a file, creating missing parent directories first.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_dir_preserves_layout() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("_app/entry")).unwrap();
        fs::write(src.join("_app/entry/start.abc.js"), "x").unwrap();
        fs::write(src.join("favicon.png"), "y").unwrap();
        fs::write(src.join(".DS_Store"), "z").unwrap();

        let dst = temp.path().join("dst");
        let written = copy_dir(&src, &dst).unwrap();

        assert_eq!(written.len(), 2);
        assert!(dst.join("_app/entry/start.abc.js").is_file());
        assert!(dst.join("favicon.png").is_file());
        assert!(!dst.join(".DS_Store").exists());
    }

    #[test]
    fn test_remove_dir_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        assert!(remove_dir(&temp.path().join("missing")).is_ok());
    }

    #[test]
    fn test_write_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a/b/c.php");
        write_file(&path, "<?php").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<?php");
    }
}
