//! Library manifest (`config.yml`) parsing.
//!
//! The manifest declares every library the installer knows about:
//!
//! ```yaml
//! libraries:
//!   ion_kit:
//!     name: ion-kit
//!     version: v1.2.3
//!     action: download
//!     pkg_sha: 5d6c...
//! ```
//!
//! Optional fields are not checked at load time; consumers that need one use
//! [`LibraryEntry::require`]. Two fields are checked: an unknown `action`
//! fails the load, and so does an unquoted `version` (YAML reads `4.10` as
//! the float `4.1`). Libraries keep their declaration order.

use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_yaml::Value;

use crate::core::errors::ManifestError;
use crate::core::Action;

/// One library declared in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    /// Key under `libraries` (e.g. `ion_kit`)
    pub id: String,
    /// Display name
    pub name: Option<String>,
    /// Version or release tag, possibly `v`-prefixed
    pub version: Option<String>,
    /// How the artifacts are obtained
    pub action: Option<Action>,
    pub src_path: Option<PathBuf>,
    pub install_path: Option<PathBuf>,
    pub pkg_url: Option<String>,
    pub pkg_sha: Option<String>,
    pub git_repo: Option<String>,
}

impl LibraryEntry {
    /// Field names in the order shell callers read them.
    pub const FIELDS: [&'static str; 8] = [
        "name",
        "src_path",
        "install_path",
        "action",
        "pkg_url",
        "pkg_sha",
        "git_repo",
        "version",
    ];

    /// Look up a field by its manifest name.
    pub fn get(&self, field: &str) -> Option<String> {
        match field {
            "name" => self.name.clone(),
            "version" => self.version.clone(),
            "action" => self.action.map(|a| a.to_string()),
            "src_path" => self.src_path.as_ref().map(|p| p.display().to_string()),
            "install_path" => self.install_path.as_ref().map(|p| p.display().to_string()),
            "pkg_url" => self.pkg_url.clone(),
            "pkg_sha" => self.pkg_sha.clone(),
            "git_repo" => self.git_repo.clone(),
            _ => None,
        }
    }

    /// Look up a field the caller cannot do without.
    pub fn require(&self, field: &'static str) -> Result<String, ManifestError> {
        self.get(field).ok_or_else(|| ManifestError::MissingField {
            library: self.id.clone(),
            field,
        })
    }
}

/// Raw YAML shape of a library entry, before action validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLibrary {
    #[serde(deserialize_with = "scalar_string")]
    name: Option<String>,
    version: Option<Value>,
    #[serde(deserialize_with = "scalar_string")]
    action: Option<String>,
    src_path: Option<PathBuf>,
    install_path: Option<PathBuf>,
    #[serde(deserialize_with = "scalar_string")]
    pkg_url: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pkg_sha: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    git_repo: Option<String>,
}

/// Accept any YAML scalar as a string.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a scalar value, found {:?}",
            other
        ))),
    }
}

/// The parsed library manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    libraries: Vec<LibraryEntry>,
}

impl Manifest {
    /// Load and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.is_file() {
            return Err(ManifestError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest = Self::parse(&contents, path)?;
        tracing::debug!(
            "loaded {} libraries from {}",
            manifest.libraries.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Parse manifest contents. `path` is only used in error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ManifestError> {
        let parse_err = |source: serde_yaml::Error| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        };
        let schema_err = |message: &str| ManifestError::Schema {
            path: path.to_path_buf(),
            message: message.to_string(),
        };

        let document: Value = serde_yaml::from_str(contents).map_err(parse_err)?;
        let Value::Mapping(mut top) = document else {
            return Err(schema_err("top-level document is not a mapping"));
        };

        let declared = match top.remove("libraries") {
            None => return Err(schema_err("missing `libraries` key")),
            Some(Value::Null) => serde_yaml::Mapping::new(),
            Some(Value::Mapping(mapping)) => mapping,
            Some(_) => return Err(schema_err("`libraries` is not a mapping")),
        };

        // Mapping iterates in document order.
        let mut libraries = Vec::with_capacity(declared.len());
        for (key, value) in declared {
            let Value::String(id) = key else {
                return Err(schema_err("library identifiers must be strings"));
            };
            let raw: RawLibrary = serde_yaml::from_value(value).map_err(parse_err)?;
            libraries.push(Self::validate(id, raw)?);
        }

        Ok(Manifest {
            path: path.to_path_buf(),
            libraries,
        })
    }

    fn validate(id: String, raw: RawLibrary) -> Result<LibraryEntry, ManifestError> {
        let action = raw
            .action
            .map(|value| {
                value
                    .parse::<Action>()
                    .map_err(|_| ManifestError::InvalidAction {
                        library: id.clone(),
                        value,
                    })
            })
            .transpose()?;

        let version = match raw.version {
            None | Some(Value::Null) => None,
            Some(Value::String(version)) => Some(version),
            Some(_) => return Err(ManifestError::UnquotedVersion { library: id }),
        };

        Ok(LibraryEntry {
            id,
            name: raw.name,
            version,
            action,
            src_path: raw.src_path,
            install_path: raw.install_path,
            pkg_url: raw.pkg_url,
            pkg_sha: raw.pkg_sha,
            git_repo: raw.git_repo,
        })
    }

    /// Path the manifest was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All libraries, in declaration order.
    pub fn libraries(&self) -> &[LibraryEntry] {
        &self.libraries
    }

    /// Look up a library by identifier.
    pub fn library(&self, id: &str) -> Option<&LibraryEntry> {
        self.libraries.iter().find(|entry| entry.id == id)
    }

    /// Look up a library that must be declared.
    pub fn require_library(&self, id: &str) -> Result<&LibraryEntry, ManifestError> {
        self.library(id).ok_or_else(|| ManifestError::MissingLibrary {
            library: id.to_string(),
        })
    }
}
