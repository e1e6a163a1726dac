//! Core data model: manifest entries, actions, platforms and components.

pub mod action;
pub mod component;
pub mod errors;
pub mod manifest;
pub mod platform;
pub mod version;

pub use action::Action;
pub use component::Component;
pub use errors::{
    ArtifactError, ArtifactUnavailableError, ManifestError, ReleaseError, ResolveError,
    UnsupportedTargetError,
};
pub use manifest::{LibraryEntry, Manifest};
pub use platform::{Platform, PlatformSelection};
pub use version::normalize_version;
