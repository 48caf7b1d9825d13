//! Integration tests for global CLI options and configuration handling.
//!
//! These tests verify:
//! - --verbose and --quiet
//! - --config-dir and MODPATHS_CONFIG_DIR
//! - Precedence of user config, project config and environment variables
//! - Exit code 7 for configuration errors
//! - Shell completion generation

mod common;

use common::{path_arg, TestEnv};
use predicates::prelude::*;

// ============================================================================
// Verbose and Quiet
// ============================================================================

#[test]
fn test_verbose_flag_logs_configuration_sources() {
    let env = TestEnv::new();
    env.write_config("delete_temp_on_drop: true\n");

    env.command()
        .args(["--verbose", "show-config"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"))
        .stderr(predicate::str::contains("config.yaml"));
}

#[test]
fn test_default_output_has_no_debug_logging() {
    let env = TestEnv::new();
    env.write_config("delete_temp_on_drop: true\n");

    env.command()
        .arg("show-config")
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG").not());
}

#[test]
fn test_log_mode_environment_variable() {
    let env = TestEnv::new();
    env.write_config("delete_temp_on_drop: true\n");

    env.command()
        .env("MODPATHS_LOG_MODE", "verbose")
        .arg("show-config")
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

// ============================================================================
// Configuration Sources
// ============================================================================

#[test]
fn test_show_config_reads_user_config() {
    let env = TestEnv::new();
    env.write_config("retry:\n  move_attempts: 4\n");

    env.command()
        .arg("show-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("move_attempts: 4"));
}

#[test]
fn test_config_dir_from_environment() {
    let env = TestEnv::new();
    env.write_config("retry:\n  delete_attempts: 3\n");

    env.command_bare()
        .env("MODPATHS_CONFIG_DIR", &env.config_dir)
        .arg("show-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("delete_attempts: 3"));
}

#[test]
fn test_project_config_overrides_user_config() {
    let env = TestEnv::new();
    env.write_config("retry:\n  move_attempts: 2\n  move_delay_ms: 10\n");
    env.write_project_config("retry:\n  move_attempts: 5\n");

    env.command()
        .arg("show-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("move_attempts: 5"))
        .stdout(predicate::str::contains("move_delay_ms: 10"));
}

#[test]
fn test_environment_overrides_files() {
    let env = TestEnv::new();
    env.write_config("retry:\n  move_attempts: 2\n");

    env.command()
        .env("MODPATHS_MOVE_ATTEMPTS", "6")
        .args(["show-config", "--retry-policy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("move_retries: 5"));
}

#[test]
fn test_retry_policy_defaults() {
    let env = TestEnv::new();

    env.command()
        .args(["show-config", "--retry-policy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("move_delay_ms: 1000"))
        .stdout(predicate::str::contains("delete_attempts: 10"))
        .stdout(predicate::str::contains("delete_delay_ms: 100"));
}

// ============================================================================
// Configuration Errors (Exit Code 7)
// ============================================================================

#[test]
fn test_malformed_config_file() {
    let env = TestEnv::new();
    env.write_config("retry: [unclosed\n");

    env.command()
        .arg("show-config")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unknown_config_field() {
    let env = TestEnv::new();
    env.write_config("temp_dir: /tmp\n");

    env.command().arg("show-config").assert().code(7);
}

#[test]
fn test_config_failing_validation() {
    let env = TestEnv::new();
    env.write_config("retry:\n  move_attempts: 0\n");

    env.command()
        .arg("show-config")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("retry.move_attempts"));
}

#[test]
fn test_invalid_environment_value() {
    let env = TestEnv::new();

    env.command()
        .env("MODPATHS_DELETE_ATTEMPTS", "many")
        .arg("show-config")
        .assert()
        .code(7);
}

#[test]
fn test_config_errors_affect_path_commands() {
    let env = TestEnv::new();
    env.write_config(&format!(
        "overlay:\n  - from: {0}\n    to: {0}\n",
        path_arg(&env.files_dir)
    ));

    env.command()
        .args(["--style", "unix", "split", "/a/b"])
        .assert()
        .code(7);
}

// ============================================================================
// Argument Errors
// ============================================================================

#[test]
fn test_unknown_style_rejected() {
    let env = TestEnv::new();

    env.command()
        .args(["--style", "mac", "split", "/a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_subcommand() {
    let env = TestEnv::new();

    env.command().assert().failure();
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let env = TestEnv::new();

    env.command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("modpaths"))
        .stderr(predicate::str::contains("bash-completion"));
}

#[test]
fn test_completions_quiet_omits_hints() {
    let env = TestEnv::new();

    env.command()
        .args(["--quiet", "completions", "zsh"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
