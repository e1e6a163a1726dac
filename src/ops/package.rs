//! Implementation of `sdkpack package`.
//!
//! Collects the installer's own build outputs into the package folder: the
//! license, public headers (tree kept), libraries and binaries (flattened).

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::fs::{copy_file, copy_matching, copy_matching_flat};

const LICENSE_FILE: &str = "LICENSE.md";
const LIB_PATTERNS: &[&str] = &["*.a", "*.so*", "*.dylib", "*.lib"];
const BIN_PATTERNS: &[&str] = &["*.exe", "*.dll"];

/// Folders of one packaging run.
#[derive(Debug, Clone)]
pub struct PackageOptions {
    pub source_folder: PathBuf,
    pub build_folder: PathBuf,
    pub package_folder: PathBuf,
}

/// Copy build outputs into the package folder. Returns the files written.
///
/// Missing source directories copy nothing.
pub fn package_artifacts(opts: &PackageOptions) -> Result<Vec<PathBuf>> {
    let package = &opts.package_folder;
    let mut files = Vec::new();

    let license = opts.source_folder.join(LICENSE_FILE);
    if license.is_file() {
        let target = package.join("licenses").join(LICENSE_FILE);
        copy_file(&license, &target)?;
        files.push(target);
    }

    files.extend(copy_matching(
        &opts.source_folder.join("include"),
        "*.h",
        &package.join("include"),
    )?);

    files.extend(copy_flat(&opts.build_folder, LIB_PATTERNS, &package.join("lib"))?);
    files.extend(copy_flat(&opts.build_folder, BIN_PATTERNS, &package.join("bin"))?);

    tracing::info!("packaged {} files into {}", files.len(), package.display());
    Ok(files)
}

fn copy_flat(src: &Path, patterns: &[&str], dst: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        files.extend(copy_matching_flat(src, pattern, dst)?);
    }
    Ok(files)
}
