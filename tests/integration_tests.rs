//! Integration tests for the cpt CLI
//!
//! These tests exercise the CLI end-to-end using assert_cmd. They never
//! touch a real catalog store: commands that need one run with the store
//! configuration removed and assert on the resulting diagnostics.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to get a cpt command isolated from the developer's environment
fn cpt(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cpt").unwrap();
    cmd.env_remove("CPT_STORE_URL")
        .env_remove("CPT_STORE_KEY")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let home = TempDir::new().unwrap();
    cpt(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("equipment catalog"));
}

#[test]
fn test_version_displays() {
    let home = TempDir::new().unwrap();
    cpt(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_command_fails() {
    let home = TempDir::new().unwrap();
    cpt(&home).arg("frobnicate").assert().failure();
}

#[test]
fn test_subcommand_help_lists_operations() {
    let home = TempDir::new().unwrap();
    cpt(&home)
        .args(["project", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("set-status"))
        .stdout(predicate::str::contains("delete"));
}

// ============================================================================
// Store configuration
// ============================================================================

#[test]
fn test_list_without_store_config_names_the_problem() {
    let home = TempDir::new().unwrap();
    cpt(&home)
        .args(["project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CPT_STORE_URL"));
}

#[test]
fn test_store_key_reported_when_only_url_is_set() {
    let home = TempDir::new().unwrap();
    cpt(&home)
        .env("CPT_STORE_URL", "https://db.example/rest/v1")
        .args(["domain", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CPT_STORE_KEY"));
}

#[test]
fn test_invalid_id_argument_rejected_before_any_request() {
    let home = TempDir::new().unwrap();
    cpt(&home)
        .env("CPT_STORE_URL", "https://db.example/rest/v1")
        .env("CPT_STORE_KEY", "test-key")
        .args(["project", "show", "not-a-uuid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid id"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    cpt(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cpt"));
}

#[test]
fn test_completions_zsh() {
    let home = TempDir::new().unwrap();
    cpt(&home)
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef cpt"));
}
