//! Resolved dependency graph exported by the native package manager.
//!
//! The package manager solves versions on its own; this module only reads the
//! result (`graph info --format=json`):
//!
//! ```json
//! {"graph": {"nodes": {
//!     "1": {
//!         "ref": "zlib/1.2.13#97d5730b529b4224045fe7090592d4c1",
//!         "context": "host",
//!         "package_folder": "/home/me/.conan2/p/zlib1a2b/p",
//!         "license": "Zlib",
//!         "cpp_info": {"root": {"bindirs": ["bin"], "libdirs": ["lib"], "includedirs": ["include"]}}
//!     }
//! }}}
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::util::fs::read_to_string;

/// A resolved package, as far as staging needs to know it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRef {
    /// `name/version`, without the recipe revision
    pub reference: String,
    /// `host` or `build`
    pub context: Option<String>,
    pub bindirs: Vec<PathBuf>,
    pub libdirs: Vec<PathBuf>,
    pub includedirs: Vec<PathBuf>,
    pub license: Option<String>,
}

impl DependencyRef {
    /// Create a reference with no directories.
    pub fn new(reference: impl Into<String>) -> Self {
        DependencyRef {
            reference: strip_revision(&reference.into()).to_string(),
            context: None,
            bindirs: Vec::new(),
            libdirs: Vec::new(),
            includedirs: Vec::new(),
            license: None,
        }
    }

    /// Package name (the part before `/`).
    pub fn name(&self) -> &str {
        self.reference
            .split_once('/')
            .map_or(self.reference.as_str(), |(name, _)| name)
    }
}

/// Drop the `#revision` suffix of a package reference.
pub fn strip_revision(reference: &str) -> &str {
    reference
        .split_once('#')
        .map_or(reference, |(bare, _)| bare)
}

#[derive(Debug, Deserialize)]
struct RawGraphFile {
    graph: RawGraph,
}

#[derive(Debug, Deserialize)]
struct RawGraph {
    #[serde(default)]
    nodes: BTreeMap<String, RawNode>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(rename = "ref", default)]
    reference: Option<String>,
    #[serde(default)]
    context: Option<String>,
    #[serde(default)]
    package_folder: Option<PathBuf>,
    #[serde(default)]
    license: Option<RawLicense>,
    #[serde(default)]
    cpp_info: Option<RawCppInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLicense {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct RawCppInfo {
    #[serde(default)]
    root: Option<RawComponentInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawComponentInfo {
    bindirs: Option<Vec<PathBuf>>,
    libdirs: Option<Vec<PathBuf>>,
    includedirs: Option<Vec<PathBuf>>,
}

/// The resolved dependency graph, in node order.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    deps: Vec<DependencyRef>,
}

impl DependencyGraph {
    pub fn new(deps: Vec<DependencyRef>) -> Self {
        DependencyGraph { deps }
    }

    /// Load a graph export from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse dependency graph: {}", path.display()))
    }

    /// Parse a graph export.
    pub fn parse(contents: &str) -> Result<Self> {
        let file: RawGraphFile = serde_json::from_str(contents)?;

        let mut nodes: Vec<(String, RawNode)> = file.graph.nodes.into_iter().collect();
        // Node ids are numeric strings; "10" sorts after "9".
        nodes.sort_by_key(|(id, _)| (id.parse::<u64>().unwrap_or(u64::MAX), id.clone()));

        let deps = nodes
            .into_iter()
            .filter_map(|(_, node)| Self::convert(node))
            .collect();

        Ok(DependencyGraph { deps })
    }

    fn convert(node: RawNode) -> Option<DependencyRef> {
        let reference = node.reference.filter(|r| !r.is_empty())?;
        let info = node
            .cpp_info
            .and_then(|c| c.root)
            .unwrap_or_default();
        let folder = node.package_folder;

        let absolute = |dirs: Option<Vec<PathBuf>>| -> Vec<PathBuf> {
            dirs.unwrap_or_default()
                .into_iter()
                .map(|dir| match &folder {
                    Some(folder) if dir.is_relative() => folder.join(dir),
                    _ => dir,
                })
                .collect()
        };

        Some(DependencyRef {
            reference: strip_revision(&reference).to_string(),
            context: node.context,
            bindirs: absolute(info.bindirs),
            libdirs: absolute(info.libdirs),
            includedirs: absolute(info.includedirs),
            license: node.license.map(|license| match license {
                RawLicense::One(license) => license,
                RawLicense::Many(licenses) => licenses.join(", "),
            }),
        })
    }

    /// Dependencies in graph order.
    pub fn deps(&self) -> &[DependencyRef] {
        &self.deps
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }
}
