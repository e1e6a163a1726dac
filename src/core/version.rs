//! Version tag helpers.

/// Strip the leading `v` of a release tag (`v1.2.3` -> `1.2.3`).
///
/// Every leading `v` is removed, so normalizing twice equals normalizing once.
pub fn normalize_version(version: &str) -> &str {
    version.trim_start_matches('v')
}
