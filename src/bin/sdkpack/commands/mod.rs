//! Command implementations

pub mod completions;
pub mod component_versions;
pub mod generate_config;
pub mod package;
pub mod parse;
pub mod requirements;
pub mod stage_deps;
