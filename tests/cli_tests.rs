//! Integration tests for the Darkroom CLI
//!
//! These run the actual binary with the mock codec so they pass without
//! ImageMagick installed. Conversion tests pay the real 1s yield pause.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the binary to test
fn darkroom_cmd() -> Command {
    Command::cargo_bin("darkroom").unwrap()
}

#[test]
fn test_help_flag() {
    darkroom_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "deadline-bounded image conversion",
        ));
}

#[test]
fn test_codecs_lists_known_codecs() {
    darkroom_cmd()
        .arg("codecs")
        .assert()
        .success()
        .stdout(predicate::str::contains("magick"))
        .stdout(predicate::str::contains("mock"));
}

#[test]
fn test_convert_with_mock_codec() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("photo.heic");
    let output = temp_dir.path().join("photo.png");
    fs::write(&input, [0xFF, 0xD8, 0xFF]).unwrap();

    darkroom_cmd()
        .args([
            "convert",
            input.to_str().unwrap(),
            "--format",
            "png",
            "--codec",
            "mock",
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    assert_eq!(fs::read(&output).unwrap(), b"mock converted bytes");
}

#[test]
fn test_convert_default_output_path_uses_new_extension() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("photo.heic");
    fs::write(&input, [1, 2, 3]).unwrap();

    darkroom_cmd()
        .args([
            "convert",
            input.to_str().unwrap(),
            "-f",
            "jpeg",
            "-c",
            "mock",
        ])
        .assert()
        .success();

    assert!(temp_dir.path().join("photo.jpeg").exists());
}

#[test]
fn test_convert_empty_input_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("empty.heic");
    fs::write(&input, b"").unwrap();

    darkroom_cmd()
        .args(["convert", input.to_str().unwrap(), "-f", "png", "-c", "mock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty payload"));
}

#[test]
fn test_convert_unknown_codec() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("photo.heic");
    fs::write(&input, [1]).unwrap();

    darkroom_cmd()
        .args([
            "convert",
            input.to_str().unwrap(),
            "-f",
            "png",
            "-c",
            "hypothetical",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown codec"));
}

#[test]
fn test_convert_missing_input_shows_fix_hint() {
    darkroom_cmd()
        .args(["convert", "/no/such/file.heic", "-f", "png", "-c", "mock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Fix:"));
}
