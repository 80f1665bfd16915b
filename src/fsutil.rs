//! File-system helpers for artifact copying and source-file discovery.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Recursively copy a directory tree, returning the number of files copied.
///
/// Returns `Ok(0)` without creating the destination when `src` does not
/// exist, so callers can treat a missing source directory the same as an
/// empty one.
///
/// Symlinks within the source tree are *followed*: the function uses
/// [`Path::is_dir`] (which follows symlinks) so directory symlinks are
/// recursed into and their contents materialised rather than copying the
/// link itself.
///
/// # Errors
///
/// Returns an error if the destination directory cannot be created, a source
/// entry cannot be read, or a file cannot be copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    std::fs::create_dir_all(dst)
        .with_context(|| format!("creating directory {}", dst.display()))?;
    for entry in
        std::fs::read_dir(src).with_context(|| format!("reading directory {}", src.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", src.display()))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            copied += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path).with_context(|| {
                format!("copying {} to {}", src_path.display(), dst_path.display())
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Recursively copy the files under `src` whose names end with `suffix`,
/// preserving their paths relative to `src`, returning the number copied.
///
/// Returns `Ok(0)` when `src` does not exist. The destination directory is
/// only created when at least one file matches.
///
/// # Errors
///
/// Returns an error if a source entry cannot be read or a file cannot be
/// copied.
pub fn copy_files_with_suffix(src: &Path, dst: &Path, suffix: &str) -> Result<usize> {
    let mut copied = 0;
    for file in collect_files(src)? {
        if !file_name_ends_with(&file, suffix) {
            continue;
        }
        let rel = file.strip_prefix(src).unwrap_or(&file);
        let dst_path = dst.join(rel);
        ensure_parent_dir(&dst_path)?;
        std::fs::copy(&file, &dst_path)
            .with_context(|| format!("copying {} to {}", file.display(), dst_path.display()))?;
        copied += 1;
    }
    Ok(copied)
}

/// Recursively collect the files under `dir` whose extension equals `ext`
/// (without the leading dot), sorted for deterministic processing.
///
/// Returns an empty list when `dir` does not exist.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn collect_files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = collect_files(dir)?
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == ext))
        .collect();
    files.sort();
    Ok(files)
}

/// Recursively collect every file under `dir`, in directory-entry order.
///
/// Returns an empty list when `dir` does not exist. Directory symlinks are
/// followed.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !dir.is_dir() {
        return Ok(files);
    }
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            files.extend(collect_files(&path)?);
        } else {
            files.push(path);
        }
    }
    Ok(files)
}

/// Whether the final path component ends with `suffix`.
fn file_name_ends_with(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(suffix))
}
