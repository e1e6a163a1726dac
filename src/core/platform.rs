//! Installer target platforms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::UnsupportedTargetError;

/// An operating system the installer ships for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    Windows,
    Linux,
}

impl Platform {
    /// Every supported platform, in generation order.
    pub const ALL: [Platform; 2] = [Platform::Windows, Platform::Linux];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
        }
    }

    /// File name of the installer config generated for this platform.
    pub fn config_file_name(&self) -> String {
        format!("config_{}.json", self.as_str())
    }

    /// Whether the installer for this platform validates artifact checksums.
    pub fn verifies_checksums(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnsupportedTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnsupportedTargetError::Platform(s.to_string()))
    }
}

/// The set of platforms a generation run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformSelection {
    #[default]
    All,
    Only(Platform),
}

impl PlatformSelection {
    /// Expand the selection into concrete platforms.
    pub fn platforms(&self) -> Vec<Platform> {
        match self {
            PlatformSelection::All => Platform::ALL.to_vec(),
            PlatformSelection::Only(platform) => vec![*platform],
        }
    }
}

impl FromStr for PlatformSelection {
    type Err = UnsupportedTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(PlatformSelection::All)
        } else {
            s.parse().map(PlatformSelection::Only)
        }
    }
}
