//! Per-component download URL rules.
//!
//! Most components follow a `<releases>/<tag>/<asset>` pattern. The
//! exceptions are encoded as data: snapshot tags that were published under a
//! different release ([`VERSION_ALIASES`]), legacy installers pinned to fixed
//! URLs ([`OPENCV_WINDOWS_INSTALLERS`]), and components that publish nothing
//! for a platform.

use url::Url;

use crate::core::{
    normalize_version, ArtifactError, Component, Platform, UnsupportedTargetError,
};
use crate::sources::Probe;

const ARAVIS_RELEASES: &str = "https://github.com/Sensing-Dev/aravis/releases/download";
const ION_KIT_RELEASES: &str = "https://github.com/fixstars/ion-kit/releases/download";
const GENDC_RELEASES: &str = "https://github.com/Sensing-Dev/GenDC/releases/download";

/// Linux ships a single prebuilt OpenCV regardless of the manifest version.
const OPENCV_LINUX_VERSION: &str = "4.5.2";
const OPENCV_LINUX_INSTALLER: &str =
    "https://ion-kit.s3.us-west-2.amazonaws.com/dependencies/OpenCV-4.5.2-x86_64-gcc75.sh";

/// OpenCV versions with an official Windows installer, and where to get it.
pub const OPENCV_WINDOWS_INSTALLERS: &[(&str, &str)] = &[
    (
        "4.5.2",
        "https://github.com/opencv/opencv/releases/download/4.5.2/opencv-4.5.2-vc14_vc15.exe",
    ),
    (
        "4.5.5",
        "https://github.com/opencv/opencv/releases/download/4.5.5/opencv-4.5.5-vc14_vc15.exe",
    ),
    (
        "4.10.0",
        "https://github.com/opencv/opencv/releases/download/4.10.0/opencv-4.10.0-windows.exe",
    ),
];

/// A version tag whose assets live at a hardcoded URL.
#[derive(Debug)]
pub struct VersionAlias {
    pub component: Component,
    pub version: &'static str,
    pub platform: Platform,
    pub url: &'static str,
}

/// Internal snapshot builds, released under `internal-<version>` tags.
pub const VERSION_ALIASES: &[VersionAlias] = &[
    VersionAlias {
        component: Component::Aravis,
        version: "0.8.30-internal",
        platform: Platform::Windows,
        url: "https://github.com/Sensing-Dev/aravis/releases/download/internal-0.8.30/aravis-internal-0.8.30-win64.zip",
    },
    VersionAlias {
        component: Component::Aravis,
        version: "0.8.30-internal",
        platform: Platform::Linux,
        url: "https://github.com/Sensing-Dev/aravis/releases/download/internal-0.8.30/aravis-internal-0.8.30-x86-64-linux.tar.gz",
    },
    VersionAlias {
        component: Component::AravisDep,
        version: "0.8.30-internal",
        platform: Platform::Windows,
        url: "https://github.com/Sensing-Dev/aravis/releases/download/internal-0.8.30/Aravis-0.8.30-internal-dependencies.zip",
    },
];

/// A composed download URL that has not been probed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    /// Version to record in the installer config
    pub version: String,
}

impl Candidate {
    fn new(url: impl Into<String>, version: impl Into<String>) -> Self {
        Candidate {
            url: url.into(),
            version: version.into(),
        }
    }
}

/// Outcome of URL generation for one component on one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// A verified, fetchable artifact.
    Published { url: Url, version: String },
    /// The component publishes nothing for this platform.
    NotPublished,
}

/// Compose the download URL for a component without touching the network.
///
/// Returns `Ok(None)` when the component has no artifact on `platform`.
pub fn compose_url(
    component: Component,
    version: &str,
    platform: Platform,
) -> Result<Option<Candidate>, UnsupportedTargetError> {
    if let Some(alias) = VERSION_ALIASES
        .iter()
        .find(|a| a.component == component && a.platform == platform && a.version == version)
    {
        return Ok(Some(Candidate::new(alias.url, version)));
    }

    let url = match (component, platform) {
        (Component::Aravis, Platform::Windows) => {
            format!("{ARAVIS_RELEASES}/{version}/aravis-{version}-win64.zip")
        }
        (Component::Aravis, Platform::Linux) => {
            format!("{ARAVIS_RELEASES}/{version}/aravis-{version}-x86-64-linux.tar.gz")
        }
        (Component::AravisDep, Platform::Windows) => {
            format!("{ARAVIS_RELEASES}/{version}/Aravis-{version}-dependencies.zip")
        }
        // Linux installs Aravis' runtime dependencies from the system package manager.
        (Component::AravisDep, Platform::Linux) => return Ok(None),
        (Component::IonKit, Platform::Windows) => format!(
            "{ION_KIT_RELEASES}/{version}/ion-kit-{}-x86-64-windows.zip",
            normalize_version(version)
        ),
        (Component::IonKit, Platform::Linux) => format!(
            "{ION_KIT_RELEASES}/{version}/ion-kit-{}-x86-64-linux.tar.gz",
            normalize_version(version)
        ),
        (Component::OpenCv, Platform::Windows) => OPENCV_WINDOWS_INSTALLERS
            .iter()
            .find(|(pinned, _)| *pinned == version)
            .map(|(_, url)| url.to_string())
            .ok_or_else(|| UnsupportedTargetError::Version {
                component: "OpenCV".to_string(),
                version: version.to_string(),
                platform,
            })?,
        (Component::OpenCv, Platform::Linux) => {
            return Ok(Some(Candidate::new(
                OPENCV_LINUX_INSTALLER,
                OPENCV_LINUX_VERSION,
            )));
        }
        // The same separator archive serves both installers.
        (Component::GendcSeparator, _) => {
            format!("{GENDC_RELEASES}/{version}/gendc_separator_{version}_win64.zip")
        }
    };

    Ok(Some(Candidate::new(url, version)))
}

/// Compose the download URL for a component and verify that it exists.
///
/// A URL is only returned after `probe` has confirmed it is fetchable.
pub fn generate_url(
    component: Component,
    version: &str,
    platform: Platform,
    probe: &dyn Probe,
) -> Result<Artifact, ArtifactError> {
    let Some(candidate) = compose_url(component, version, platform)? else {
        tracing::debug!("{} publishes no artifact for {}", component, platform);
        return Ok(Artifact::NotPublished);
    };

    let url = Url::parse(&candidate.url).map_err(|source| ArtifactError::MalformedUrl {
        url: candidate.url.clone(),
        source,
    })?;

    probe.probe(&url)?;
    tracing::info!("{} {} ({}): {}", component, candidate.version, platform, url);

    Ok(Artifact::Published {
        url,
        version: candidate.version,
    })
}
