//! Test fixtures for common test scenarios.
//!
//! A realistic library manifest, graph-export builders and small file helpers.

use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::DependencyRef;
use crate::core::Manifest;

/// A manifest covering every component, as the installer ships it.
pub const MANIFEST_YAML: &str = r#"libraries:
  aravis:
    name: Aravis
    version: 0.8.31
    action: download
    pkg_sha: 7ddc4a0b6c2c4fa0f1c7b8e5a2e0d2a1
  aravis_dep:
    name: Aravis dependencies
    version: 0.8.31
    action: download
    pkg_sha: 0a1d6f2b9e4c3d2e1f0a9b8c7d6e5f4a
  ion_kit:
    name: ion-kit
    version: v1.8.10
    action: download
    pkg_sha: 1e2d3c4b5a69788796a5b4c3d2e1f0a9
    git_repo: https://github.com/fixstars/ion-kit
  opencv:
    name: OpenCV
    version: 4.5.2
    action: use_existing
    pkg_sha: 9f8e7d6c5b4a39281706f5e4d3c2b1a0
    install_path: /opt/opencv
  gendc_separator:
    name: GenDC
    version: v0.2.8
    action: build
    pkg_sha: 5a4b3c2d1e0f9a8b7c6d5e4f3a2b1c0d
    src_path: src/gendc
"#;

/// Parse [`MANIFEST_YAML`].
pub fn manifest() -> Manifest {
    manifest_from(MANIFEST_YAML)
}

/// Parse an inline manifest; panics on invalid YAML.
pub fn manifest_from(yaml: &str) -> Manifest {
    match Manifest::parse(yaml, Path::new("config.yml")) {
        Ok(manifest) => manifest,
        Err(err) => panic!("invalid fixture manifest: {err}"),
    }
}

/// A dependency laid out like an installed package under `folder`.
pub fn dependency(reference: &str, folder: &Path) -> DependencyRef {
    let mut dep = DependencyRef::new(reference);
    dep.context = Some("host".to_string());
    dep.bindirs = vec![folder.join("bin")];
    dep.libdirs = vec![folder.join("lib")];
    dep.includedirs = vec![folder.join("include")];
    dep
}

/// Render a graph export the way the package manager writes it.
///
/// Node `0` is the consumer recipe itself and carries no reference.
pub fn graph_json(packages: &[(&str, &Path)]) -> String {
    let mut nodes = serde_json::Map::new();
    nodes.insert("0".to_string(), serde_json::json!({"ref": "", "context": "host"}));
    for (i, (reference, folder)) in packages.iter().enumerate() {
        nodes.insert(
            (i + 1).to_string(),
            serde_json::json!({
                "ref": format!("{reference}#0123456789abcdef"),
                "context": "host",
                "package_folder": folder,
                "license": "MIT",
                "cpp_info": {"root": {
                    "bindirs": ["bin"],
                    "libdirs": ["lib"],
                    "includedirs": ["include"]
                }}
            }),
        );
    }
    serde_json::json!({"graph": {"nodes": nodes}}).to_string()
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            panic!("failed to create {}: {err}", parent.display());
        }
    }
    if let Err(err) = fs::write(path, contents) {
        panic!("failed to write {}: {err}", path.display());
    }
    path.to_path_buf()
}
