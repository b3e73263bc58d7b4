//! Tests for the demo binary, run as a subprocess.

mod common;

use common::temp_config;
use std::process::Command;

fn authflow_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_authflow"))
}

const SEEDED: &str = r#"
[auth]
[[auth.accounts]]
email = "ada@example.com"
password = "analytical"

[[auth.reset_codes]]
code = "from-link"
email = "ada@example.com"
"#;

#[test]
fn test_help_lists_commands() {
    let output = authflow_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["login", "sign-up", "forgot-password", "reset-password"] {
        assert!(stdout.contains(command), "missing {command} in {stdout}");
    }
}

#[test]
fn test_login_with_seeded_account() {
    let (_dir, path) = temp_config(SEEDED);
    let output = authflow_cmd()
        .arg("--config")
        .arg(&path)
        .args(["login", "--email", "ada@example.com", "--password", "analytical"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("signed in as user-1"));
}

#[test]
fn test_wrong_password_exits_with_error() {
    let (_dir, path) = temp_config(SEEDED);
    let output = authflow_cmd()
        .arg("--config")
        .arg(&path)
        .args(["login", "--email", "ada@example.com", "--password", "not-it-at-all"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("email or password is incorrect"));
}

#[test]
fn test_reset_password_with_seeded_code() {
    let (_dir, path) = temp_config(SEEDED);
    let output = authflow_cmd()
        .arg("--config")
        .arg(&path)
        .args(["reset-password", "--code", "from-link", "--password", "difference"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("password changed"));
}

#[test]
fn test_invalid_config_is_reported() {
    let (_dir, path) = temp_config("[auth]\nmin_password_length = 0\n");
    let output = authflow_cmd()
        .arg("--config")
        .arg(&path)
        .args(["forgot-password", "--email", "ada@example.com"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("min_password_length"));
}
