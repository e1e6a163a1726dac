//! Declared requirements of the installer's native recipe.
//!
//! The recipe names the packages whose artifacts are staged. Anything else the
//! package manager pulls into the graph (build tools, transitive helpers) is
//! skipped during staging.
//!
//! ```toml
//! dependencies_folder = "dependencies"
//! requires = ["glib/2.76.3", "zlib/1.2.13"]
//! tool_requires = ["meson/1.2.3"]
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::graph::strip_revision;
use crate::util::fs::read_to_string;

/// Recipe file looked up next to the manifest.
pub const RECIPE_FILE: &str = "recipe.toml";

const DEFAULT_REQUIRES: &[&str] = &[
    "glib/2.76.3",
    "libxml2/2.11.4",
    "gstreamer/1.22.3",
    "zlib/1.2.13",
    "libusb/1.0.26",
    "libffi/3.4.4",
    "libiconv/1.17",
];

const DEFAULT_TOOL_REQUIRES: &[&str] = &[
    "meson/1.2.3",
    "winflexbison/2.5.24",
    "m4/1.4.19",
    "pkgconf/1.9.3",
    "pcre2/10.42",
];

const DEFAULT_DEPENDENCIES_FOLDER: &str = "dependencies";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    /// Runtime requirements; only these are staged.
    pub requires: BTreeSet<String>,
    /// Build tools, never staged.
    pub tool_requires: Vec<String>,
    /// Staging directory name under the build folder.
    pub dependencies_folder: String,
}

impl Default for Recipe {
    fn default() -> Self {
        Recipe {
            requires: DEFAULT_REQUIRES.iter().map(|r| r.to_string()).collect(),
            tool_requires: DEFAULT_TOOL_REQUIRES.iter().map(|r| r.to_string()).collect(),
            dependencies_folder: DEFAULT_DEPENDENCIES_FOLDER.to_string(),
        }
    }
}

impl Recipe {
    /// Load a recipe from a TOML file. Omitted keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse recipe: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let recipe: Recipe = toml::from_str(contents)?;
        Ok(recipe)
    }

    /// Load `path` if given, otherwise fall back to the built-in recipe.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Recipe::default()),
        }
    }

    /// Whether `reference` is one of the declared runtime requirements.
    pub fn declares(&self, reference: &str) -> bool {
        self.requires.contains(strip_revision(reference))
    }
}
