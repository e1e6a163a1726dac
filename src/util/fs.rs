//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::Serialize;
use walkdir::WalkDir;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Serialize `value` as JSON indented by four spaces and write it to `path`.
///
/// The file is replaced, never appended to.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .with_context(|| format!("failed to serialize {}", path.display()))?;

    let contents = String::from_utf8(buf).context("serialized JSON is not UTF-8")?;
    write_string(path, &contents)
}

/// Copy a single file, creating the destination's parent directories.
///
/// An existing destination is overwritten.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        ensure_dir(parent)?;
    }
    fs::copy(src, dst).with_context(|| {
        format!("failed to copy {} to {}", src.display(), dst.display())
    })?;
    Ok(())
}

/// Files under `src` (recursively) whose file name matches `pattern`.
///
/// A missing `src` yields no files.
fn matching_files(src: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern =
        Pattern::new(pattern).with_context(|| format!("invalid glob pattern: {}", pattern))?;

    if !src.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(src).follow_links(true) {
        let entry =
            entry.with_context(|| format!("failed to walk directory: {}", src.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if pattern.matches(&entry.file_name().to_string_lossy()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Copy every file under `src` whose name matches `pattern` into `dst`,
/// keeping its path relative to `src`.
///
/// Returns the destination paths. Copying twice yields the same tree.
pub fn copy_matching(src: &Path, pattern: &str, dst: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for file in matching_files(src, pattern)? {
        let relative = file.strip_prefix(src).unwrap_or(&file);
        let target = dst.join(relative);
        copy_file(&file, &target)?;
        copied.push(target);
    }
    Ok(copied)
}

/// Like [`copy_matching`], but every file lands directly in `dst`.
///
/// Files with the same name overwrite each other; the last one copied wins.
pub fn copy_matching_flat(src: &Path, pattern: &str, dst: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for file in matching_files(src, pattern)? {
        let Some(name) = file.file_name() else {
            continue;
        };
        let target = dst.join(name);
        copy_file(&file, &target)?;
        if !copied.contains(&target) {
            copied.push(target);
        }
    }
    Ok(copied)
}
