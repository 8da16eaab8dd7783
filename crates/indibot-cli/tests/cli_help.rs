use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_flags() {
    cargo_bin_cmd!("indibot")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("log-file"))
        .stdout(predicate::str::contains("terminal chat shell"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("indibot")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_unknown_flag_fails() {
    cargo_bin_cmd!("indibot")
        .arg("--no-such-flag")
        .assert()
        .failure();
}
