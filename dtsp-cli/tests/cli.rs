#![forbid(unsafe_code)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

fn write_config(seed: &str, udid: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp config");
    writeln!(file, "seed = \"{seed}\"\nudid = \"{udid}\"").expect("write temp config");
    file
}

#[test]
fn encrypt_then_decrypt_round_trips() {
    let config = write_config("secret", "PHP");

    let mut encrypt = Command::cargo_bin("dtsp-cli").unwrap();
    let output = encrypt
        .arg("--config")
        .arg(config.path())
        .arg("encrypt")
        .arg(hex::encode(b"hello from the cli"))
        .output()
        .expect("run encrypt");
    assert!(output.status.success());
    let frame_hex = String::from_utf8(output.stdout).unwrap().trim().to_string();
    assert!(!frame_hex.is_empty());

    let mut decrypt = Command::cargo_bin("dtsp-cli").unwrap();
    decrypt
        .arg("--config")
        .arg(config.path())
        .arg("decrypt")
        .arg(&frame_hex)
        .assert()
        .success()
        .stdout(predicate::str::contains(hex::encode(b"hello from the cli")));
}

#[test]
fn rejects_invalid_hex() {
    let config = write_config("secret", "PHP");

    let mut cmd = Command::cargo_bin("dtsp-cli").unwrap();
    cmd.arg("--config")
        .arg(config.path())
        .arg("encrypt")
        .arg("not-hex")
        .assert()
        .failure();
}

#[test]
fn decrypt_of_truncated_frame_fails() {
    let config = write_config("secret", "PHP");

    let mut cmd = Command::cargo_bin("dtsp-cli").unwrap();
    cmd.arg("--config")
        .arg(config.path())
        .arg("decrypt")
        .arg("00112233")
        .assert()
        .failure();
}
