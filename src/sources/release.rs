//! Release metadata lookups.

use crate::core::ReleaseError;

/// Source of release tags for a hosted project.
pub trait ReleaseApi {
    /// Tag name of the most recent published release of `owner/repo`.
    fn latest_tag(&self, owner: &str, repo: &str) -> Result<String, ReleaseError>;
}
