//! How a library's artifacts are obtained.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::ResolveError;

/// One of the three ways a library can be provided to the installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Build the library from source.
    Build,
    /// Download a prebuilt artifact.
    Download,
    /// Reuse an installation already present on the host.
    UseExisting,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 3] = [Action::Build, Action::Download, Action::UseExisting];

    /// The manifest spelling of every action.
    pub const NAMES: [&'static str; 3] = ["build", "download", "use_existing"];

    /// The manifest spelling of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Build => "build",
            Action::Download => "download",
            Action::UseExisting => "use_existing",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ResolveError::InvalidAction(s.to_string()))
    }
}
