//! CLI contract tests: exit codes, stderr messages, and the inspection mode.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn remint() -> Command {
    Command::cargo_bin("remint").expect("binary to exist")
}

#[test]
fn transforms_a_file_and_confirms() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "FF (hex) equals 255").expect("write input");

    remint()
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    assert_eq!(
        fs::read_to_string(&output).expect("read output"),
        "255 equals 255"
    );
}

#[test]
fn missing_input_fails_with_context() {
    let dir = TempDir::new().expect("tempdir");
    remint()
        .arg(dir.path().join("absent.txt"))
        .arg(dir.path().join("out.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("remint:").and(predicate::str::contains("absent.txt")));
}

#[test]
fn out_of_range_overlap_is_rejected_before_processing() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("in.txt");
    fs::write(&input, "hello").expect("write input");

    remint()
        .arg(&input)
        .arg(dir.path().join("out.txt"))
        .args(["--overlap-words", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chunking.overlap_words"));
}

#[test]
fn config_file_overrides_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    let config = dir.path().join("remint.toml");
    fs::write(&input, "some words (up, 2) here").expect("write input");
    fs::write(&config, "[chunking]\nwindow_bytes = 2048\noverlap_words = 10\n")
        .expect("write config");

    remint()
        .arg(&input)
        .arg(&output)
        .args(["--config", config.to_str().expect("utf8 path")])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).expect("read output"),
        "SOME WORDS here"
    );
}

#[test]
fn dump_tokens_prints_json_without_writing() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("in.txt");
    fs::write(&input, "hi (up)").expect("write input");

    remint()
        .arg(&input)
        .arg("--dump-tokens")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"Token\"")
                .and(predicate::str::contains("\"Directive\""))
                .and(predicate::str::contains("\"hi\"")),
        );
}

#[test]
fn no_arguments_shows_usage() {
    remint().assert().failure();
}
