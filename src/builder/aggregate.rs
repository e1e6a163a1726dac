//! Dependency aggregation into the staging tree.
//!
//! Runs in both the generate and the build phase of the native recipe so the
//! tree exists before either step reads it. Copying is best effort: a failure
//! for one dependency becomes an [`AggregationWarning`] and the rest are still
//! staged. Truly missing artifacts surface later as compile or link errors.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::env::{BuildEnv, EnvScope, PKG_CONFIG_PATH};
use crate::builder::graph::{DependencyGraph, DependencyRef};
use crate::builder::recipe::Recipe;
use crate::builder::staging::StagingTree;
use crate::util::fs::copy_matching;

/// Recipe lifecycle step the aggregation runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    Generate,
    #[default]
    Build,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Generate => "generate",
            Phase::Build => "build",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency that could not be (fully) staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationWarning {
    /// Reference of the dependency, or the staging root for tree-wide failures
    pub dependency: String,
    pub message: String,
}

impl fmt::Display for AggregationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.dependency, self.message)
    }
}

/// Outcome of one aggregation run.
#[derive(Debug, Clone, Default)]
pub struct AggregationReport {
    /// Staging tree root
    pub root: PathBuf,
    /// References staged without error
    pub staged: Vec<String>,
    /// References in the graph but not declared by the recipe
    pub skipped: Vec<String>,
    /// Destination files written, in copy order
    pub files: Vec<PathBuf>,
    pub warnings: Vec<AggregationWarning>,
    /// Environment pointing at the staging tree
    pub env: BuildEnv,
}

impl AggregationReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Copy rules: (source dir kind, pattern, destination).
enum Rule {
    Bin(&'static str),
    Lib(&'static str),
    LibHeader,
    Include,
}

const RULES: &[Rule] = &[
    Rule::Bin("*.dll"),
    Rule::Bin("*.exe"),
    Rule::Lib("*.lib"),
    Rule::LibHeader,
    Rule::Include,
];

/// Stage every declared dependency of `graph` under `build_folder`.
///
/// Never fails: problems are reported in [`AggregationReport::warnings`].
pub fn import_dependencies(
    graph: &DependencyGraph,
    recipe: &Recipe,
    build_folder: &Path,
    phase: Phase,
) -> AggregationReport {
    let tree = StagingTree::new(build_folder, &recipe.dependencies_folder);
    tracing::info!(
        "staging dependencies into {} ({} phase)",
        tree.root().display(),
        phase
    );

    let mut report = AggregationReport {
        root: tree.root().to_path_buf(),
        ..Default::default()
    };
    for scope in EnvScope::ALL {
        report.env.append_path(scope, PKG_CONFIG_PATH, tree.root());
    }

    if let Err(err) = tree.create() {
        warn(&mut report, tree.root().display().to_string(), &err);
        return report;
    }

    for dep in graph.deps() {
        if !recipe.declares(&dep.reference) {
            tracing::debug!("skipping {} (not a declared requirement)", dep.reference);
            report.skipped.push(dep.reference.clone());
            continue;
        }

        match stage_dependency(dep, &tree) {
            Ok(files) => {
                tracing::debug!(
                    "staged {} ({} files, license: {})",
                    dep.reference,
                    files.len(),
                    dep.license.as_deref().unwrap_or("unknown")
                );
                report.files.extend(files);
                report.staged.push(dep.reference.clone());
            }
            Err(err) => warn(&mut report, dep.reference.clone(), &err),
        }
    }

    report
}

fn warn(report: &mut AggregationReport, dependency: String, err: &anyhow::Error) {
    let warning = AggregationWarning {
        dependency,
        message: format!("{:#}", err),
    };
    tracing::warn!("{}", warning);
    report.warnings.push(warning);
}

fn stage_dependency(dep: &DependencyRef, tree: &StagingTree) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for rule in RULES {
        let (dirs, pattern, dst) = match rule {
            Rule::Bin(pattern) => (&dep.bindirs, *pattern, tree.bin_dir()),
            Rule::Lib(pattern) => (&dep.libdirs, *pattern, tree.lib_dir()),
            Rule::LibHeader => (&dep.libdirs, "*.h", tree.include_dir()),
            Rule::Include => (&dep.includedirs, "*.h", tree.include_dir()),
        };
        for dir in dirs {
            files.extend(copy_matching(dir, pattern, &dst)?);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dependency, write_file};
    use std::fs;
    use tempfile::TempDir;

    fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        let mut files: Vec<_> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
                (rel, fs::read(e.path()).unwrap())
            })
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_stages_declared_dependencies() {
        let tmp = TempDir::new().unwrap();
        let glib = tmp.path().join("pkgs/glib");
        write_file(&glib.join("bin/glib-2.0-0.dll"), "dll");
        write_file(&glib.join("bin/gdbus.exe"), "exe");
        write_file(&glib.join("bin/README"), "skip");
        write_file(&glib.join("lib/glib-2.0.lib"), "lib");
        write_file(&glib.join("lib/glib-2.0/include/glibconfig.h"), "cfg");
        write_file(&glib.join("include/glib-2.0/glib.h"), "hdr");

        let pcre = tmp.path().join("pkgs/pcre2");
        write_file(&pcre.join("bin/pcre2.dll"), "tool");

        let graph = DependencyGraph::new(vec![
            dependency("glib/2.76.3", &glib),
            dependency("pcre2/10.42", &pcre),
        ]);
        let build = tmp.path().join("build");

        let report = import_dependencies(&graph, &Recipe::default(), &build, Phase::Build);

        assert!(!report.has_warnings());
        assert_eq!(report.staged, vec!["glib/2.76.3".to_string()]);
        assert_eq!(report.skipped, vec!["pcre2/10.42".to_string()]);

        let root = build.join("dependencies");
        assert_eq!(report.root, root);
        assert!(root.join("bin/glib-2.0-0.dll").exists());
        assert!(root.join("bin/gdbus.exe").exists());
        assert!(!root.join("bin/README").exists());
        assert!(!root.join("bin/pcre2.dll").exists());
        assert!(root.join("lib/glib-2.0.lib").exists());
        assert!(root.join("include/glib-2.0/include/glibconfig.h").exists());
        assert!(root.join("include/glib-2.0/glib.h").exists());
        assert_eq!(report.files.len(), 5);
        assert_eq!(
            report.env.paths(EnvScope::Run, PKG_CONFIG_PATH),
            &[root.clone()]
        );
    }

    #[test]
    fn test_missing_directories_are_not_warnings() {
        let tmp = TempDir::new().unwrap();
        let zlib = tmp.path().join("pkgs/zlib-not-installed");
        let graph = DependencyGraph::new(vec![dependency("zlib/1.2.13", &zlib)]);

        let report = import_dependencies(&graph, &Recipe::default(), tmp.path(), Phase::Generate);

        assert!(!report.has_warnings());
        assert_eq!(report.staged, vec!["zlib/1.2.13".to_string()]);
        assert!(report.files.is_empty());
        assert!(tmp.path().join("dependencies").is_dir());
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let zlib = tmp.path().join("pkgs/zlib");
        write_file(&zlib.join("bin/zlib1.dll"), "z");
        write_file(&zlib.join("lib/zlib.lib"), "z");
        write_file(&zlib.join("include/zlib.h"), "z");
        write_file(&zlib.join("include/zconf.h"), "z");
        let graph = DependencyGraph::new(vec![dependency("zlib/1.2.13", &zlib)]);
        let build = tmp.path().join("build");

        import_dependencies(&graph, &Recipe::default(), &build, Phase::Generate);
        let once = snapshot(&build);
        import_dependencies(&graph, &Recipe::default(), &build, Phase::Build);
        let twice = snapshot(&build);

        assert_eq!(once, twice);
        assert_eq!(once.len(), 4);
    }

    #[test]
    fn test_failure_becomes_warning() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("pkgs/zlib");
        write_file(&good.join("include/zlib.h"), "z");
        let bad = tmp.path().join("pkgs/libusb");
        write_file(&bad.join("include/libusb.h"), "u");

        // A file where the include directory should be makes the copy fail.
        let build = tmp.path().join("build");
        write_file(&build.join("dependencies/include"), "in the way");

        let graph = DependencyGraph::new(vec![
            dependency("libusb/1.0.26", &bad),
            dependency("zlib/1.2.13", &good),
        ]);

        let report = import_dependencies(&graph, &Recipe::default(), &build, Phase::Build);

        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.warnings[0].dependency, "libusb/1.0.26");
        assert!(report.staged.is_empty());
    }

    #[test]
    fn test_unusable_build_folder_is_reported() {
        let tmp = TempDir::new().unwrap();
        let build = tmp.path().join("build");
        write_file(&build, "not a directory");

        let graph = DependencyGraph::new(vec![DependencyRef::new("zlib/1.2.13")]);
        let report = import_dependencies(&graph, &Recipe::default(), &build, Phase::Build);

        assert_eq!(report.warnings.len(), 1);
        assert!(report.staged.is_empty());
    }
}
