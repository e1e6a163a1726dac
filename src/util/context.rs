//! Global context for sdkpack operations.
//!
//! Provides centralized access to configuration, paths, and environment.
//! Nothing below reads the host platform: every operation takes its target
//! platform as an explicit argument.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{self, Config};

/// Manifest file name looked up in the working directory.
pub const DEFAULT_MANIFEST: &str = "config.yml";

/// Directory generated installer configs are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "build";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,

    /// Merged global and project configuration
    config: Config,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let global_config = config::global_config_dir().map(|h| h.join("config.toml"));
        let config = config::load_config(
            global_config.as_deref(),
            &config::project_config_path(&cwd),
        );

        GlobalContext {
            cwd,
            verbose: false,
            color: true,
            config,
        }
    }

    /// Replace the loaded configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve a path against the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// The manifest to read: explicit path, then config, then `config.yml`.
    pub fn manifest_path(&self, explicit: Option<&Path>) -> PathBuf {
        let path = explicit
            .or(self.config.output.manifest.as_deref())
            .unwrap_or(Path::new(DEFAULT_MANIFEST));
        self.resolve_path(path)
    }

    /// The directory generated configs go to: explicit path, then config, then `build/`.
    pub fn output_dir(&self, explicit: Option<&Path>) -> PathBuf {
        let path = explicit
            .or(self.config.output.dir.as_deref())
            .unwrap_or(Path::new(DEFAULT_OUTPUT_DIR));
        self.resolve_path(path)
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }
}
