//! Implementation of `sdkpack component-versions`.
//!
//! Records the version of every SDK component in the release's
//! `version_info.json` under the `SDK components` key.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

use crate::core::{normalize_version, Manifest};
use crate::util::fs::{read_to_string, write_json};

/// Key the component table is stored under.
pub const SDK_COMPONENTS_KEY: &str = "SDK components";

/// Placeholder for a missing name or version.
const NOT_AVAILABLE: &str = "N/A";

/// Display name to normalized version for every library in `manifest`.
pub fn component_versions(manifest: &Manifest) -> Map<String, Value> {
    manifest
        .libraries()
        .iter()
        .map(|entry| {
            let name = entry.name.as_deref().unwrap_or(NOT_AVAILABLE);
            let version = entry
                .version
                .as_deref()
                .map_or(NOT_AVAILABLE, normalize_version);
            (name.to_string(), Value::String(version.to_string()))
        })
        .collect()
}

/// Merge the component table of `manifest_path` into the JSON document at
/// `json_path`, in place. Other keys of the document are kept.
pub fn extract_component_versions(manifest_path: &Path, json_path: &Path) -> Result<()> {
    let manifest = Manifest::load(manifest_path)?;

    if !json_path.is_file() {
        bail!("{} does not exist", json_path.display());
    }
    let contents = read_to_string(json_path)?;
    let mut document: Value = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {}", json_path.display()))?;

    let Some(object) = document.as_object_mut() else {
        bail!("{} does not contain a JSON object", json_path.display());
    };

    let versions = component_versions(&manifest);
    tracing::debug!("recording {} component versions", versions.len());
    object.insert(SDK_COMPONENTS_KEY.to_string(), Value::Object(versions));

    write_json(json_path, &document)
}
