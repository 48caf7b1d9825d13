//! Integration tests for the path algebra commands.
//!
//! These tests cover `split`, `combine`, `relative`, `in-folder` and
//! `extension`. They use the `unix` and `windows` styles so results do not
//! depend on the host platform.

mod common;

use common::{output_lines, TestEnv};
use predicates::prelude::*;

// ============================================================================
// split
// ============================================================================

#[test]
fn test_split_windows_path() {
    let env = TestEnv::new();

    let output = env
        .command()
        .args(["--style", "windows", "split", r"C:\Games\Skyrim\Data\Armor.ESP"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let lines = output_lines(&output.stdout);
    assert_eq!(
        lines,
        vec![
            r"directory: C:\Games\Skyrim\Data",
            "file_name: Armor.ESP",
            "extension: .ESP",
            "depth: 4",
        ]
    );
}

#[test]
fn test_split_unix_path_without_extension() {
    let env = TestEnv::new();

    env.command()
        .args(["--style", "unix", "split", "/opt/game/README"])
        .assert()
        .success()
        .stdout(predicate::str::contains("directory: /opt/game"))
        .stdout(predicate::str::contains("file_name: README"))
        .stdout(predicate::str::contains("depth: 3"));
}

#[test]
fn test_split_root_has_empty_file_name() {
    let env = TestEnv::new();

    env.command()
        .args(["--style", "windows", "split", r"D:\"])
        .assert()
        .success()
        .stdout(predicate::str::contains("depth: 0"));
}

#[test]
fn test_split_json_output() {
    let env = TestEnv::new();

    let output = env
        .command()
        .args([
            "--style",
            "unix",
            "split",
            "/mods/SkyUI/interface/skyui.swf",
            "--format",
            "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["full_path"], "/mods/SkyUI/interface/skyui.swf");
    assert_eq!(value["directory"], "/mods/SkyUI/interface");
    assert_eq!(value["file_name"], "skyui.swf");
    assert_eq!(value["extension"], ".swf");
    assert_eq!(value["depth"], 4);
}

// ============================================================================
// combine
// ============================================================================

#[test]
fn test_combine_converts_separators() {
    let env = TestEnv::new();

    env.command()
        .args(["--style", "windows", "combine", r"C:\Games", "Data/Meshes/a.nif"])
        .assert()
        .success()
        .stdout(predicate::eq("C:\\Games\\Data\\Meshes\\a.nif\n"));
}

#[test]
fn test_combine_onto_root() {
    let env = TestEnv::new();

    env.command()
        .args(["--style", "unix", "combine", "/", "etc/hosts"])
        .assert()
        .success()
        .stdout(predicate::eq("/etc/hosts\n"));
}

#[test]
fn test_combine_empty_relative_returns_base() {
    let env = TestEnv::new();

    env.command()
        .args(["--style", "unix", "combine", "/game/Data", ""])
        .assert()
        .success()
        .stdout(predicate::eq("/game/Data\n"));
}

#[test]
fn test_combine_rejects_unrooted_base() {
    let env = TestEnv::new();

    env.command()
        .args(["--style", "unix", "combine", "game/Data", "a.esp"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("not a rooted"));
}

// ============================================================================
// relative
// ============================================================================

#[test]
fn test_relative_ignores_case() {
    let env = TestEnv::new();

    env.command()
        .args([
            "--style",
            "unix",
            "relative",
            "/GAME/data/Textures/sky.dds",
            "/game/Data",
        ])
        .assert()
        .success()
        .stdout(predicate::eq("Textures/sky.dds\n"));
}

#[test]
fn test_relative_outside_base_fails() {
    let env = TestEnv::new();

    env.command()
        .args(["--style", "unix", "relative", "/other/file.txt", "/game"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not relative"));
}

#[test]
fn test_relative_respects_segment_boundaries() {
    let env = TestEnv::new();

    env.command()
        .args(["--style", "unix", "relative", "/foo/barbaz/x", "/foo/bar"])
        .assert()
        .code(1);
}

// ============================================================================
// in-folder
// ============================================================================

#[test]
fn test_in_folder_success() {
    let env = TestEnv::new();

    env.command()
        .args([
            "--style",
            "windows",
            "in-folder",
            r"c:\games\skyrim\data\a.esp",
            r"C:\Games\Skyrim",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(" is in "));
}

#[test]
fn test_in_folder_quiet_prints_nothing() {
    let env = TestEnv::new();

    env.command()
        .args(["--quiet", "--style", "unix", "in-folder", "/a/b/c", "/a"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_in_folder_sibling_prefix_fails() {
    let env = TestEnv::new();

    env.command()
        .args(["--style", "unix", "in-folder", "/foo/barbaz", "/foo/bar"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not in"));
}

// ============================================================================
// extension
// ============================================================================

#[test]
fn test_extension_prints_last_dot_segment() {
    let env = TestEnv::new();

    env.command()
        .args(["extension", "archive.tar.GZ"])
        .assert()
        .success()
        .stdout(predicate::eq(".GZ\n"));
}

#[test]
fn test_extension_ignores_dots_in_directories() {
    let env = TestEnv::new();

    env.command()
        .args(["extension", "/mods/v1.2/readme"])
        .assert()
        .success()
        .stdout(predicate::eq("\n"));
}

#[test]
fn test_extension_expect_is_case_insensitive() {
    let env = TestEnv::new();

    env.command()
        .args(["extension", "Armor.ESP", "--expect", ".esp"])
        .assert()
        .success();
}

#[test]
fn test_extension_expect_mismatch() {
    let env = TestEnv::new();

    env.command()
        .args(["extension", "Armor.esm", "--expect", ".esp"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected extension '.esp'"));
}

#[test]
fn test_extension_expect_without_dot_is_invalid() {
    let env = TestEnv::new();

    env.command()
        .args(["extension", "Armor.esp", "--expect", "esp"])
        .assert()
        .code(4);
}
