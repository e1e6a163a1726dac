//! Environment handed to the native build after staging.
//!
//! Staged dependencies are found through pkg-config, so the staging directory
//! is appended to `PKG_CONFIG_PATH` in both the build and the run environment.
//! The result is written as sourceable scripts into the build folder.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::fs::write_string;

pub const PKG_CONFIG_PATH: &str = "PKG_CONFIG_PATH";

/// Which environment a variable applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnvScope {
    /// Tools run while building.
    Build,
    /// Binaries run after building.
    Run,
}

impl EnvScope {
    pub const ALL: [EnvScope; 2] = [EnvScope::Build, EnvScope::Run];

    fn script_stem(&self) -> &'static str {
        match self {
            EnvScope::Build => "sdkpack-buildenv",
            EnvScope::Run => "sdkpack-runenv",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shell {
    Sh,
    Bat,
}

impl Shell {
    fn extension(&self) -> &'static str {
        match self {
            Shell::Sh => "sh",
            Shell::Bat => "bat",
        }
    }

    fn separator(&self) -> char {
        match self {
            Shell::Sh => ':',
            Shell::Bat => ';',
        }
    }
}

/// Path-list variables appended to, per scope.
#[derive(Debug, Clone, Default)]
pub struct BuildEnv {
    vars: BTreeMap<(EnvScope, String), Vec<PathBuf>>,
}

impl BuildEnv {
    pub fn new() -> Self {
        BuildEnv::default()
    }

    /// Append `value` to the path list `name`. Appending the same path twice
    /// keeps one entry.
    pub fn append_path(&mut self, scope: EnvScope, name: &str, value: impl Into<PathBuf>) {
        let value = value.into();
        let paths = self.vars.entry((scope, name.to_string())).or_default();
        if !paths.contains(&value) {
            paths.push(value);
        }
    }

    /// Appended paths for `name` in `scope`, in insertion order.
    pub fn paths(&self, scope: EnvScope, name: &str) -> &[PathBuf] {
        self.vars
            .get(&(scope, name.to_string()))
            .map_or(&[], Vec::as_slice)
    }

    /// Write one `.sh` and one `.bat` script per scope into `dir`.
    ///
    /// Returns the written paths. Existing scripts are replaced.
    pub fn write_scripts(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for scope in EnvScope::ALL {
            for shell in [Shell::Sh, Shell::Bat] {
                let path = dir.join(format!("{}.{}", scope.script_stem(), shell.extension()));
                write_string(&path, &self.render(scope, shell))?;
                tracing::debug!("wrote {}", path.display());
                written.push(path);
            }
        }
        Ok(written)
    }

    fn render(&self, scope: EnvScope, shell: Shell) -> String {
        let mut out = String::new();
        if shell == Shell::Bat {
            out.push_str("@echo off\n");
        }

        for ((var_scope, name), paths) in &self.vars {
            if *var_scope != scope || paths.is_empty() {
                continue;
            }
            let sep = shell.separator();
            let joined = paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(&sep.to_string());
            match shell {
                Shell::Sh => out.push_str(&format!(
                    "export {name}=\"${{{name}:+${name}{sep}}}{joined}\"\n"
                )),
                Shell::Bat => {
                    out.push_str(&format!("set \"{name}=%{name}%{sep}{joined}\"\n"))
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_path_dedupes() {
        let mut env = BuildEnv::new();
        env.append_path(EnvScope::Build, PKG_CONFIG_PATH, "/b/deps");
        env.append_path(EnvScope::Build, PKG_CONFIG_PATH, "/b/deps");
        env.append_path(EnvScope::Build, PKG_CONFIG_PATH, "/b/more");

        assert_eq!(
            env.paths(EnvScope::Build, PKG_CONFIG_PATH),
            &[PathBuf::from("/b/deps"), PathBuf::from("/b/more")]
        );
        assert!(env.paths(EnvScope::Run, PKG_CONFIG_PATH).is_empty());
    }

    #[test]
    fn test_render_scripts() {
        let mut env = BuildEnv::new();
        env.append_path(EnvScope::Build, PKG_CONFIG_PATH, "/b/deps");
        env.append_path(EnvScope::Build, PKG_CONFIG_PATH, "/b/more");

        assert_eq!(
            env.render(EnvScope::Build, Shell::Sh),
            "export PKG_CONFIG_PATH=\"${PKG_CONFIG_PATH:+$PKG_CONFIG_PATH:}/b/deps:/b/more\"\n"
        );
        assert_eq!(
            env.render(EnvScope::Build, Shell::Bat),
            "@echo off\nset \"PKG_CONFIG_PATH=%PKG_CONFIG_PATH%;/b/deps;/b/more\"\n"
        );
        assert_eq!(env.render(EnvScope::Run, Shell::Sh), "");
    }

    #[test]
    fn test_write_scripts() {
        let tmp = TempDir::new().unwrap();
        let mut env = BuildEnv::new();
        env.append_path(EnvScope::Run, PKG_CONFIG_PATH, "/b/deps");

        let written = env.write_scripts(tmp.path()).unwrap();

        assert_eq!(written.len(), 4);
        let run = std::fs::read_to_string(tmp.path().join("sdkpack-runenv.sh")).unwrap();
        assert!(run.contains("/b/deps"));
        assert!(tmp.path().join("sdkpack-buildenv.bat").exists());
    }
}
