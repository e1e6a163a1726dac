//! The flat include/lib/bin tree dependencies are staged into.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::fs::ensure_dir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingTree {
    root: PathBuf,
}

impl StagingTree {
    /// A staging tree rooted at `<build_folder>/<folder>`.
    pub fn new(build_folder: &Path, folder: &str) -> Self {
        StagingTree {
            root: build_folder.join(folder),
        }
    }

    /// Create the root directory. Subdirectories appear as files are copied.
    pub fn create(&self) -> Result<()> {
        ensure_dir(&self.root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn include_dir(&self) -> PathBuf {
        self.root.join("include")
    }

    pub fn lib_dir(&self) -> PathBuf {
        self.root.join("lib")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }
}
