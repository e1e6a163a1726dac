//! Action resolution for a single library.

use crate::core::{Action, LibraryEntry, Manifest, ResolveError};

/// Resolve a library entry, applying a host-supplied action override.
///
/// The override always wins over the manifest's declared action. The manifest
/// itself is never modified; the caller gets an owned copy of the entry.
pub fn resolve_action(
    manifest: &Manifest,
    name: &str,
    action_override: Option<Action>,
) -> Result<LibraryEntry, ResolveError> {
    let mut entry = manifest
        .library(name)
        .cloned()
        .ok_or_else(|| ResolveError::NotFound {
            name: name.to_string(),
            manifest: manifest.path().to_path_buf(),
        })?;

    if let Some(action) = action_override {
        tracing::debug!(
            "overriding action for `{}`: {:?} -> {}",
            name,
            entry.action,
            action
        );
        entry.action = Some(action);
    }

    Ok(entry)
}
