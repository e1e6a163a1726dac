//! Artifact existence probe.

use url::Url;

use crate::core::ArtifactUnavailableError;

/// Checks that an artifact URL resolves before it is written anywhere.
pub trait Probe {
    /// Succeed only if `url` answers with a success status.
    fn probe(&self, url: &Url) -> Result<(), ArtifactUnavailableError>;
}
