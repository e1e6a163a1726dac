//! Configuration file support for sdkpack.
//!
//! sdkpack supports two configuration file locations:
//! - Global: `~/.sdkpack/config.toml` - User-wide defaults
//! - Project: `.sdkpack/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::sources::RetryPolicy;

/// Default API host for release lookups.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// sdkpack configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network settings
    pub net: NetConfig,

    /// Installer release settings
    pub release: ReleaseConfig,

    /// Output locations
    pub output: OutputConfig,
}

/// Network-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Retries after a failed probe or lookup
    pub retries: Option<u32>,

    /// Initial backoff between retries, in milliseconds
    pub backoff_ms: Option<u64>,

    /// User-Agent header sent with every request
    pub user_agent: Option<String>,

    /// Base URL of the release API
    pub api_base: Option<String>,
}

impl NetConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(30))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let default = RetryPolicy::default();
        RetryPolicy {
            attempts: self
                .retries
                .map(|r| r.saturating_add(1))
                .unwrap_or(default.attempts),
            backoff: self
                .backoff_ms
                .map(Duration::from_millis)
                .unwrap_or(default.backoff),
        }
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("sdkpack/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn api_base(&self) -> String {
        self.api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }
}

/// The installer project whose release versions the generated configs carry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Owner of the installer repository
    pub owner: Option<String>,

    /// Installer repository name
    pub repo: Option<String>,

    /// Key of the synthetic installer entry in generated configs
    pub installer_key: Option<String>,

    /// Name recorded in the synthetic installer entry
    pub installer_name: Option<String>,
}

impl ReleaseConfig {
    pub fn owner(&self) -> &str {
        self.owner.as_deref().unwrap_or("Sensing-Dev")
    }

    pub fn repo(&self) -> &str {
        self.repo.as_deref().unwrap_or("sensing-dev-installer")
    }

    pub fn installer_key(&self) -> &str {
        self.installer_key.as_deref().unwrap_or("sensing_dev")
    }

    pub fn installer_name(&self) -> &str {
        self.installer_name.as_deref().unwrap_or("sensing-dev")
    }
}

/// Output locations, relative to the working directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory generated installer configs are written to
    pub dir: Option<PathBuf>,

    /// Library manifest read by default
    pub manifest: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Net settings
        if other.net.timeout_secs.is_some() {
            self.net.timeout_secs = other.net.timeout_secs;
        }
        if other.net.retries.is_some() {
            self.net.retries = other.net.retries;
        }
        if other.net.backoff_ms.is_some() {
            self.net.backoff_ms = other.net.backoff_ms;
        }
        if other.net.user_agent.is_some() {
            self.net.user_agent = other.net.user_agent;
        }
        if other.net.api_base.is_some() {
            self.net.api_base = other.net.api_base;
        }

        // Release settings
        if other.release.owner.is_some() {
            self.release.owner = other.release.owner;
        }
        if other.release.repo.is_some() {
            self.release.repo = other.release.repo;
        }
        if other.release.installer_key.is_some() {
            self.release.installer_key = other.release.installer_key;
        }
        if other.release.installer_name.is_some() {
            self.release.installer_name = other.release.installer_name;
        }

        // Output settings
        if other.output.dir.is_some() {
            self.output.dir = other.output.dir;
        }
        if other.output.manifest.is_some() {
            self.output.manifest = other.output.manifest;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.sdkpack/config.toml)
/// 2. Global config (~/.sdkpack/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    // Project config overrides global
    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global sdkpack config directory (~/.sdkpack).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".sdkpack"))
}

/// Get the project config path (.sdkpack/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".sdkpack").join("config.toml")
}
