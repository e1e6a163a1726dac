//! Error types for manifest handling and artifact resolution.
//!
//! Manifest and resolution failures are fatal and stop the invocation before
//! anything is written. Dependency staging failures are not errors at all;
//! they are reported as [`AggregationWarning`](crate::builder::AggregationWarning)s.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::Platform;

/// The library manifest could not be loaded or lacks required data.
#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("{} does not exist", path.display())]
    #[diagnostic(
        code(sdkpack::manifest::not_found),
        help("Pass the manifest explicitly with --config-path or --manifest")
    )]
    NotFound { path: PathBuf },

    #[error("failed to read {}", path.display())]
    #[diagnostic(code(sdkpack::manifest::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    #[diagnostic(code(sdkpack::manifest::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid manifest {}: {message}", path.display())]
    #[diagnostic(
        code(sdkpack::manifest::schema),
        help("The manifest must contain a top-level `libraries` mapping")
    )]
    Schema { path: PathBuf, message: String },

    #[error("library `{library}` declares unknown action `{value}`")]
    #[diagnostic(
        code(sdkpack::manifest::invalid_action),
        help("Valid actions are: build, download, use_existing")
    )]
    InvalidAction { library: String, value: String },

    #[error("library `{library}` declares a `version` that is not a string")]
    #[diagnostic(
        code(sdkpack::manifest::unquoted_version),
        help("Quote the version so it is kept verbatim, e.g. `version: \"4.10\"`")
    )]
    UnquotedVersion { library: String },

    #[error("library `{library}` is not declared in the manifest")]
    #[diagnostic(code(sdkpack::manifest::missing_library))]
    MissingLibrary { library: String },

    #[error("library `{library}` has no `{field}` field")]
    #[diagnostic(code(sdkpack::manifest::missing_field))]
    MissingField {
        library: String,
        field: &'static str,
    },
}

/// Failure to resolve a library entry from the manifest.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    #[error("no library named `{name}` found in {}", manifest.display())]
    #[diagnostic(code(sdkpack::resolve::not_found))]
    NotFound { name: String, manifest: PathBuf },

    #[error("invalid action `{0}` (expected build, download or use_existing)")]
    #[diagnostic(code(sdkpack::resolve::invalid_action))]
    InvalidAction(String),
}

/// The requested component, platform or version has no artifact rule.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum UnsupportedTargetError {
    #[error("component `{0}` is not supported")]
    #[diagnostic(
        code(sdkpack::target::component),
        help("Supported components: aravis, aravis_dep, ion_kit, opencv, gendc_separator")
    )]
    UnknownComponent(String),

    #[error("platform `{0}` is not supported")]
    #[diagnostic(
        code(sdkpack::target::platform),
        help("Supported platforms: Windows, Linux")
    )]
    Platform(String),

    #[error("{component} {version} is not supported on {platform}")]
    #[diagnostic(code(sdkpack::target::version))]
    Version {
        component: String,
        version: String,
        platform: Platform,
    },
}

/// A composed artifact URL failed its existence probe.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{url} does not exist ({reason})")]
#[diagnostic(
    code(sdkpack::artifact::unavailable),
    help("Check that the release has been published and the manifest version is correct")
)]
pub struct ArtifactUnavailableError {
    pub url: String,
    pub reason: String,
}

/// Anything that stops URL generation for a component.
#[derive(Debug, Error, Diagnostic)]
pub enum ArtifactError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Unsupported(#[from] UnsupportedTargetError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Unavailable(#[from] ArtifactUnavailableError),

    #[error("composed URL `{url}` is malformed")]
    #[diagnostic(code(sdkpack::artifact::malformed_url))]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Failure to look up the latest release of the installer project.
#[derive(Debug, Error, Diagnostic)]
pub enum ReleaseError {
    #[error("failed to query {url}: {message}")]
    #[diagnostic(
        code(sdkpack::release::request),
        help("Pass the installer version explicitly with --version")
    )]
    Request { url: String, message: String },

    #[error("release response from {url} is not valid JSON")]
    #[diagnostic(code(sdkpack::release::decode))]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("latest release of {owner}/{repo} has no tag")]
    #[diagnostic(
        code(sdkpack::release::missing_tag),
        help("Pass the installer version explicitly with --version")
    )]
    MissingTag { owner: String, repo: String },
}
