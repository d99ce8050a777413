//! CLI surface tests. The dashboard itself needs a TTY, so these only
//! exercise the flag parsing boundary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_describes_the_tool() {
    Command::cargo_bin("electroscope")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("workflow dispatches"))
        .stdout(predicate::str::contains("--server"))
        .stdout(predicate::str::contains("--page-size"));
}

#[test]
fn version_prints() {
    Command::cargo_bin("electroscope")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("electroscope"));
}

#[test]
fn unknown_flag_fails() {
    Command::cargo_bin("electroscope")
        .unwrap()
        .arg("--bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn bad_log_file_path_errors_out() {
    Command::cargo_bin("electroscope")
        .unwrap()
        .args(["--log-file", "/nonexistent-dir/out.log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("opening log file"));
}
