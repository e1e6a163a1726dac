//! Implementation of `sdkpack generate-config`.
//!
//! Produces `config_<Platform>.json` for each selected platform. The file is
//! read by the platform's installer script:
//!
//! ```json
//! {
//!     "aravis": {"version": "0.8.31", "pkg_url": "https://...", "name": "Aravis", "pkg_sha": "..."},
//!     "aravis_dep": {},
//!     "sensing_dev": {"name": "sensing-dev", "version": "v24.05.01"}
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::core::{Component, Manifest, Platform, PlatformSelection, ReleaseError};
use crate::resolver::{generate_url, Artifact};
use crate::sources::{Probe, ReleaseApi};
use crate::util::config::ReleaseConfig;
use crate::util::fs::{ensure_dir, write_json};

/// Version argument meaning "ask the release API".
pub const LATEST: &str = "latest";

/// One component's entry. A component without an artifact has no fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkg_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Only on platforms whose installer verifies checksums
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkg_sha: Option<String>,
}

impl ComponentConfig {
    pub fn is_empty(&self) -> bool {
        *self == ComponentConfig::default()
    }
}

/// The synthetic entry naming the installer release itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallerEntry {
    #[serde(skip)]
    pub key: String,
    pub name: String,
    pub version: String,
}

/// Everything written to one platform's config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    pub platform: Platform,
    /// Component key and entry, in component order
    pub components: Vec<(String, ComponentConfig)>,
    pub installer: InstallerEntry,
}

impl PlatformConfig {
    pub fn file_name(&self) -> String {
        self.platform.config_file_name()
    }

    pub fn component(&self, key: &str) -> Option<&ComponentConfig> {
        self.components
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| entry)
    }
}

impl Serialize for PlatformConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.components.len() + 1))?;
        for (key, entry) in &self.components {
            map.serialize_entry(key, entry)?;
        }
        map.serialize_entry(&self.installer.key, &self.installer)?;
        map.end()
    }
}

/// Options for `generate-config`.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub selection: PlatformSelection,
    /// Already resolved installer version (never `latest`)
    pub installer_version: String,
    pub installer_key: String,
    pub installer_name: String,
    pub out_dir: PathBuf,
}

impl GenerateOptions {
    pub fn new(
        selection: PlatformSelection,
        installer_version: impl Into<String>,
        release: &ReleaseConfig,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        GenerateOptions {
            selection,
            installer_version: installer_version.into(),
            installer_key: release.installer_key().to_string(),
            installer_name: release.installer_name().to_string(),
            out_dir: out_dir.into(),
        }
    }

    fn installer_entry(&self) -> InstallerEntry {
        InstallerEntry {
            key: self.installer_key.clone(),
            name: self.installer_name.clone(),
            version: self.installer_version.clone(),
        }
    }
}

/// Turn the `--version` argument into a concrete installer version.
///
/// Only `latest` queries the release API; anything else is used verbatim.
pub fn resolve_installer_version(
    requested: &str,
    api: &dyn ReleaseApi,
    release: &ReleaseConfig,
) -> Result<String, ReleaseError> {
    if requested != LATEST {
        return Ok(requested.to_string());
    }
    let tag = api.latest_tag(release.owner(), release.repo())?;
    tracing::info!("latest {}/{} release is {}", release.owner(), release.repo(), tag);
    Ok(tag)
}

/// Resolve and verify every component for one platform.
pub fn resolve_platform_config(
    manifest: &Manifest,
    platform: Platform,
    installer: InstallerEntry,
    probe: &dyn Probe,
) -> Result<PlatformConfig> {
    let mut components = Vec::with_capacity(Component::ALL.len());

    for component in Component::ALL {
        let entry = manifest.require_library(component.key())?;
        let version = entry.require("version")?;

        let artifact = generate_url(component, &version, platform, probe)
            .with_context(|| format!("failed to resolve {} for {}", component, platform))?;

        let config = match artifact {
            Artifact::NotPublished => ComponentConfig::default(),
            Artifact::Published { url, version } => ComponentConfig {
                version: Some(version),
                pkg_url: Some(url.to_string()),
                name: Some(entry.require("name")?),
                pkg_sha: if platform.verifies_checksums() {
                    Some(entry.require("pkg_sha")?)
                } else {
                    None
                },
            },
        };
        components.push((component.key().to_string(), config));
    }

    Ok(PlatformConfig {
        platform,
        components,
        installer,
    })
}

/// Write one platform's config into `out_dir`, replacing any previous file.
pub fn emit_config(config: &PlatformConfig, out_dir: &Path) -> Result<PathBuf> {
    ensure_dir(out_dir)?;
    let path = out_dir.join(config.file_name());
    write_json(&path, config)?;
    tracing::debug!("wrote {}", path.display());
    Ok(path)
}

/// Generate the config files for every selected platform.
///
/// All platforms are resolved before anything is written, so a failure
/// leaves the output directory untouched.
pub fn generate_configs(
    manifest: &Manifest,
    opts: &GenerateOptions,
    probe: &dyn Probe,
) -> Result<Vec<PathBuf>> {
    let configs = opts
        .selection
        .platforms()
        .into_iter()
        .map(|platform| resolve_platform_config(manifest, platform, opts.installer_entry(), probe))
        .collect::<Result<Vec<_>>>()?;

    configs
        .iter()
        .map(|config| emit_config(config, &opts.out_dir))
        .collect()
}
