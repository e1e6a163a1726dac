//! High-level operations.
//!
//! This module contains the implementation of sdkpack commands.

pub mod component_versions;
pub mod describe;
pub mod generate_config;
pub mod package;
pub mod stage_deps;

pub use component_versions::{component_versions, extract_component_versions};
pub use describe::{describe_entry, describe_library};
pub use generate_config::{
    emit_config, generate_configs, resolve_installer_version, resolve_platform_config,
    ComponentConfig, GenerateOptions, InstallerEntry, PlatformConfig,
};
pub use package::{package_artifacts, PackageOptions};
pub use stage_deps::{stage_dependencies, StageOptions};
