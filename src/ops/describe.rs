//! Implementation of `sdkpack parse`.
//!
//! Shell build scripts read one library's fields line by line, so the output
//! is eight lines in a fixed order with `None` standing in for absent fields.

use crate::core::{Action, LibraryEntry, Manifest, ResolveError};
use crate::resolver::resolve_action;

/// Rendered value of an absent field.
pub const ABSENT: &str = "None";

/// The shell lines for an already resolved entry.
pub fn describe_entry(entry: &LibraryEntry) -> Vec<String> {
    LibraryEntry::FIELDS
        .iter()
        .map(|field| entry.get(field).unwrap_or_else(|| ABSENT.to_string()))
        .collect()
}

/// Resolve `name` (applying the override) and render its shell lines.
pub fn describe_library(
    manifest: &Manifest,
    name: &str,
    action_override: Option<Action>,
) -> Result<Vec<String>, ResolveError> {
    let entry = resolve_action(manifest, name, action_override)?;
    Ok(describe_entry(&entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::manifest;

    #[test]
    fn test_describe_field_order() {
        let lines = describe_library(&manifest(), "opencv", None).unwrap();
        assert_eq!(
            lines,
            vec![
                "OpenCV",
                "None",
                "/opt/opencv",
                "use_existing",
                "None",
                "9f8e7d6c5b4a39281706f5e4d3c2b1a0",
                "None",
                "4.5.2",
            ]
        );
    }

    #[test]
    fn test_describe_with_override() {
        let lines = describe_library(&manifest(), "gendc_separator", Some(Action::Download)).unwrap();
        assert_eq!(lines[0], "GenDC");
        assert_eq!(lines[1], "src/gendc");
        assert_eq!(lines[3], "download");
    }

    #[test]
    fn test_describe_unknown_library() {
        let err = describe_library(&manifest(), "halide", None).unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { name, .. } if name == "halide"));
    }
}
