//! CLI integration tests using the REAL rigup binary

mod common;

use common::rigup_cmd;
use predicates::prelude::*;

#[test]
fn test_help_output() {
    rigup_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("setup contract"))
        .stdout(predicate::str::contains("configure"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version_output() {
    rigup_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rigup"))
        .stdout(predicate::str::contains("Build info"))
        .stdout(predicate::str::contains("vinejs, edge"));
}

#[test]
fn test_configure_requires_package() {
    rigup_cmd()
        .arg("configure")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<PACKAGE>"));
}

#[test]
fn test_configure_help_lists_flags() {
    rigup_cmd()
        .args(["configure", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"))
        .stdout(predicate::str::contains("--no-install"))
        .stdout(predicate::str::contains("--install-timeout"));
}

#[test]
fn test_completions_bash() {
    rigup_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rigup"));
}

#[test]
fn test_completions_unknown_shell() {
    rigup_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell: tcsh"))
        .stderr(predicate::str::contains("Supported shells"));
}
