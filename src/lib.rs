//! sdkpack - release and packaging helper for a multi-component SDK installer
//!
//! This crate resolves the installer's library manifest into actions and
//! verified download URLs, emits the per-platform installer configs, and
//! stages native dependencies for the installer's own build.

pub mod builder;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

/// Test utilities and mocks for sdkpack unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides in-memory probes, release lookups and
/// manifest/graph fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{Action, Component, LibraryEntry, Manifest, Platform};
pub use resolver::{generate_url, resolve_action, Artifact};
pub use util::context::GlobalContext;
