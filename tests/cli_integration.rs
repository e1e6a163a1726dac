//! CLI integration tests for sdkpack.
//!
//! These tests drive the binary the way the installer's build scripts and
//! release workflow do. None of them touch the network.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the sdkpack binary command, isolated from the user's configuration.
fn sdkpack(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sdkpack").unwrap();
    cmd.env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("SDKPACK_MANIFEST")
        .env_remove("SDKPACK_OUT_DIR")
        .env_remove("RUST_LOG");
    cmd
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

const MANIFEST: &str = r#"libraries:
  ion_kit:
    name: ion-kit
    version: v1.2.3
    action: download
    pkg_sha: 5d6c7b
    git_repo: https://github.com/fixstars/ion-kit
  opencv:
    name: OpenCV
    version: 4.5.2
    action: use_existing
    install_path: /opt/opencv
"#;

// ============================================================================
// sdkpack parse
// ============================================================================

#[test]
fn test_parse_prints_fields_in_order() {
    let tmp = temp_dir();
    write(&tmp.path().join("config.yml"), MANIFEST);

    sdkpack(tmp.path())
        .args(["parse", "--name", "opencv", "--config-path", "config.yml"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout("OpenCV\nNone\n/opt/opencv\nuse_existing\nNone\nNone\nNone\n4.5.2\n");
}

#[test]
fn test_parse_action_override_wins() {
    let tmp = temp_dir();
    write(&tmp.path().join("config.yml"), MANIFEST);

    let output = sdkpack(tmp.path())
        .args(["parse", "--name", "ion_kit", "--action", "build"])
        .args(["--config-path", "config.yml"])
        .current_dir(tmp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[3], "build");
    assert_eq!(lines[6], "https://github.com/fixstars/ion-kit");
    assert_eq!(lines[7], "v1.2.3");
}

#[test]
fn test_parse_unknown_library_exits_zero() {
    let tmp = temp_dir();
    write(&tmp.path().join("config.yml"), MANIFEST);

    sdkpack(tmp.path())
        .args(["parse", "--name", "halide", "--config-path", "config.yml"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No library named halide found"));
}

#[test]
fn test_parse_rejects_unknown_action_override() {
    let tmp = temp_dir();
    write(&tmp.path().join("config.yml"), MANIFEST);

    sdkpack(tmp.path())
        .args(["parse", "--name", "opencv", "--action", "install"])
        .args(["--config-path", "config.yml"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("use_existing"));
}

#[test]
fn test_parse_invalid_manifest_action_fails() {
    let tmp = temp_dir();
    write(
        &tmp.path().join("config.yml"),
        "libraries:\n  foo:\n    name: Foo\n    action: compile\n",
    );

    sdkpack(tmp.path())
        .args(["parse", "--name", "foo", "--config-path", "config.yml"])
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown action `compile`"));
}

#[test]
fn test_parse_missing_manifest() {
    let tmp = temp_dir();

    sdkpack(tmp.path())
        .args(["parse", "--name", "foo", "--config-path", "missing.yml"])
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

// ============================================================================
// sdkpack generate-config
// ============================================================================

#[test]
fn test_generate_config_unknown_platform() {
    let tmp = temp_dir();
    write(&tmp.path().join("config.yml"), MANIFEST);

    sdkpack(tmp.path())
        .args(["generate-config", "-p", "macOS", "-V", "v1.0.0"])
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("platform `macOS` is not supported"));

    assert!(!tmp.path().join("build").exists());
}

#[test]
fn test_generate_config_platform_is_case_sensitive() {
    let tmp = temp_dir();
    write(&tmp.path().join("config.yml"), MANIFEST);

    sdkpack(tmp.path())
        .args(["generate-config", "-p", "windows", "-V", "v1.0.0"])
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("platform `windows` is not supported"));
}

#[test]
fn test_generate_config_incomplete_manifest_writes_nothing() {
    let tmp = temp_dir();
    // `aravis` is resolved first and is missing, so nothing is probed.
    write(&tmp.path().join("config.yml"), MANIFEST);

    sdkpack(tmp.path())
        .args(["generate-config", "-p", "Linux", "-V", "v1.0.0"])
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("`aravis` is not declared"));

    assert!(!tmp.path().join("build/config_Linux.json").exists());
}

#[test]
fn test_generate_config_reads_manifest_from_project_config() {
    let tmp = temp_dir();
    write(
        &tmp.path().join(".sdkpack/config.toml"),
        "[output]\nmanifest = \"installer/config.yml\"\n",
    );

    sdkpack(tmp.path())
        .args(["generate-config", "-V", "v1.0.0"])
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("installer/config.yml"));
}

// ============================================================================
// sdkpack component-versions
// ============================================================================

#[test]
fn test_component_versions_end_to_end() {
    let tmp = temp_dir();
    write(
        &tmp.path().join("config.yml"),
        "libraries:\n  foo:\n    name: Foo\n    version: \"v2.0\"\n",
    );
    write(&tmp.path().join("version_info.json"), "{}");

    sdkpack(tmp.path())
        .args(["component-versions", "config.yml", "version_info.json"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(tmp.path().join("version_info.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(json, serde_json::json!({"SDK components": {"Foo": "2.0"}}));
}

#[test]
fn test_component_versions_missing_json() {
    let tmp = temp_dir();
    write(&tmp.path().join("config.yml"), MANIFEST);

    sdkpack(tmp.path())
        .args(["component-versions", "config.yml", "version_info.json"])
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("version_info.json does not exist"));
}

// ============================================================================
// sdkpack stage-deps / package / requirements
// ============================================================================

#[test]
fn test_stage_deps_twice_is_idempotent() {
    let tmp = temp_dir();
    let zlib = tmp.path().join("pkgs/zlib");
    write(&zlib.join("bin/zlib1.dll"), "dll");
    write(&zlib.join("include/zlib.h"), "h");
    write(&zlib.join("lib/zlib.lib"), "lib");

    let graph = serde_json::json!({"graph": {"nodes": {
        "0": {"ref": ""},
        "1": {
            "ref": "zlib/1.2.13#abc",
            "package_folder": zlib,
            "cpp_info": {"root": {"bindirs": ["bin"], "libdirs": ["lib"], "includedirs": ["include"]}}
        }
    }}});
    write(&tmp.path().join("graph.json"), &graph.to_string());

    for phase in ["generate", "build"] {
        sdkpack(tmp.path())
            .args(["stage-deps", "--graph", "graph.json", "--build-folder", "build"])
            .args(["--phase", phase])
            .current_dir(tmp.path())
            .assert()
            .success()
            .stderr(predicate::str::contains("zlib/1.2.13"));
    }

    let staged = tmp.path().join("build/dependencies");
    assert_eq!(fs::read_dir(staged.join("bin")).unwrap().count(), 1);
    assert!(staged.join("include/zlib.h").exists());
    assert!(staged.join("lib/zlib.lib").exists());
    assert!(tmp.path().join("build/sdkpack-buildenv.sh").exists());
    assert!(tmp.path().join("build/sdkpack-runenv.bat").exists());
}

#[test]
fn test_stage_deps_missing_graph_fails() {
    let tmp = temp_dir();

    sdkpack(tmp.path())
        .args(["stage-deps", "--graph", "graph.json", "--build-folder", "build"])
        .current_dir(tmp.path())
        .assert()
        .code(1);
}

#[test]
fn test_package_collects_outputs() {
    let tmp = temp_dir();
    write(&tmp.path().join("src/LICENSE.md"), "MIT");
    write(&tmp.path().join("src/include/sdk.h"), "h");
    write(&tmp.path().join("build/out/libsdk.a"), "a");

    sdkpack(tmp.path())
        .args(["package", "--source-folder", "src", "--build-folder", "build"])
        .args(["--package-folder", "pkg"])
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join("pkg/licenses/LICENSE.md").exists());
    assert!(tmp.path().join("pkg/include/sdk.h").exists());
    assert!(tmp.path().join("pkg/lib/libsdk.a").exists());
}

#[test]
fn test_requirements_default_recipe() {
    let tmp = temp_dir();

    sdkpack(tmp.path())
        .arg("requirements")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[requires]\n"))
        .stdout(predicate::str::contains("glib/2.76.3"))
        .stdout(predicate::str::contains("[tool_requires]\nmeson/1.2.3\n"));
}

// ============================================================================
// sdkpack completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = temp_dir();

    sdkpack(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sdkpack"));
}
