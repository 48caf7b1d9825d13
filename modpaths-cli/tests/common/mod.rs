//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with an isolated configuration directory
//! - Command builder helpers that strip inherited `MODPATHS_*` variables
//! - File fixtures for listing and temporary-file tests

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the CLI reads, removed from every test command.
const INHERITED_VARIABLES: [&str; 8] = [
    "MODPATHS_CONFIG_DIR",
    "MODPATHS_LOG_MODE",
    "MODPATHS_TEMP_DIR",
    "MODPATHS_DELETE_TEMP",
    "MODPATHS_MOVE_ATTEMPTS",
    "MODPATHS_MOVE_DELAY_MS",
    "MODPATHS_DELETE_ATTEMPTS",
    "MODPATHS_DELETE_DELAY_MS",
];

/// Test environment with isolated configuration.
///
/// This struct provides:
/// - A configuration directory passed through `--config-dir`
/// - A working directory commands run in, so no project file is picked up
/// - A scratch directory for files the tests create
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Directory holding `config.yaml`
    pub config_dir: PathBuf,
    /// Working directory for spawned commands
    pub work_dir: PathBuf,
    /// Directory for test files
    pub files_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let config_dir = root.join("config");
        let work_dir = root.join("work");
        let files_dir = root.join("files");
        for dir in [&config_dir, &work_dir, &files_dir] {
            std::fs::create_dir_all(dir).expect("Failed to create test directory");
        }

        Self {
            temp_dir,
            config_dir,
            work_dir,
            files_dir,
        }
    }

    /// Get a bare command builder without `--config-dir`.
    ///
    /// Inherited `MODPATHS_*` variables are still removed and the working
    /// directory is still isolated.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("modpaths").expect("Failed to find modpaths binary");
        cmd.current_dir(&self.work_dir);
        for var in INHERITED_VARIABLES {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the configuration directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config-dir").arg(&self.config_dir);
        cmd
    }

    /// Write the user configuration file.
    pub fn write_config(&self, yaml: &str) {
        std::fs::write(self.config_dir.join("config.yaml"), yaml)
            .expect("Failed to write config file");
    }

    /// Write a project configuration file into the working directory.
    pub fn write_project_config(&self, yaml: &str) {
        std::fs::write(self.work_dir.join("modpaths.yaml"), yaml)
            .expect("Failed to write project config");
    }

    /// Create a file under the scratch directory, creating parents as needed.
    pub fn create_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.files_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Create a directory under the scratch directory.
    pub fn create_dir(&self, relative: &str) -> PathBuf {
        let path = self.files_dir.join(relative);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// The scratch directory as a string argument.
    pub fn files_arg(&self) -> String {
        path_arg(&self.files_dir)
    }
}

/// Convert a path to a command-line argument.
pub fn path_arg(path: &Path) -> String {
    path.to_str().expect("test paths are UTF-8").to_string()
}

/// Collect the non-empty lines of command output.
pub fn output_lines(output: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(output)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
