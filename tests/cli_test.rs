//! End-to-end CLI tests driving the built binary directly.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn no_subcommand_prints_usage_and_exits_nonzero() {
    Command::cargo_bin("mobilecli")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_every_top_level_subcommand() {
    Command::cargo_bin("mobilecli")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("devices"))
        .stdout(predicate::str::contains("device"))
        .stdout(predicate::str::contains("apps"))
        .stdout(predicate::str::contains("io"))
        .stdout(predicate::str::contains("screenshot"))
        .stdout(predicate::str::contains("screencapture"))
        .stdout(predicate::str::contains("dump"))
        .stdout(predicate::str::contains("url"))
        .stdout(predicate::str::contains("server"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn completions_prints_a_nonempty_bash_script() {
    Command::cargo_bin("mobilecli")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mobilecli"));
}

#[test]
fn completions_rejects_an_unknown_shell() {
    Command::cargo_bin("mobilecli")
        .unwrap()
        .args(["completions", "not-a-shell"])
        .assert()
        .failure();
}

#[test]
fn devices_rejects_an_unrecognized_platform_filter() {
    Command::cargo_bin("mobilecli")
        .unwrap()
        .args(["devices", "--platform", "windows"])
        .assert()
        .failure();
}

#[test]
fn io_tap_requires_both_coordinates() {
    Command::cargo_bin("mobilecli")
        .unwrap()
        .args(["io", "tap", "10"])
        .assert()
        .failure();
}
