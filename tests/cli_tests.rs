//! CLI tests for the toolgate binary
//!
//! Tests command-line interface functionality: --version and --help flags,
//! unknown arguments and the configuration commands. Each test runs the
//! binary built by cargo for this test run with a controlled environment.

use std::process::{Command, Output};
use std::str;

use tempfile::TempDir;

/// Run the toolgate binary with `args` and isolated configuration
fn run(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let home = TempDir::new().unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_toolgate"));
    cmd.args(args)
        .current_dir(home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("PORT")
        .env_remove("TOOLGATE_SERVER_PORT")
        .env_remove("TOOLGATE_SERVER_LOG_LEVEL")
        .env_remove("TOOLGATE_BACKEND_URL")
        .env_remove("TOOLGATE_BACKEND_TIMEOUT_SECS")
        .env_remove("TOOLGATE_TRANSLATION_MULTI_BLOCK")
        .env_remove("TOOLGATE_CONFIG");
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to execute command")
}

fn stdout(output: &Output) -> &str {
    str::from_utf8(&output.stdout).expect("Invalid UTF-8")
}

/// Test that --version flag works and outputs correct version format
#[test]
fn test_version_flag() {
    for flag in ["--version", "-V"] {
        let output = run(&[flag], &[]);

        assert!(output.status.success(), "Version command should succeed");
        let stdout = stdout(&output);
        assert!(
            stdout.starts_with("toolgate "),
            "Version output should start with 'toolgate', got: {}",
            stdout
        );
        assert!(
            stdout.contains(env!("CARGO_PKG_VERSION")),
            "Version output should contain the package version, got: {}",
            stdout
        );
    }
}

/// Test that --help flag works and shows usage information
#[test]
fn test_help_flag() {
    for flag in ["--help", "-h"] {
        let output = run(&[flag], &[]);

        assert!(output.status.success(), "Help command should succeed");
        let stdout = stdout(&output);
        assert!(stdout.contains("USAGE"), "Help output should contain 'USAGE', got: {}", stdout);
        assert!(stdout.contains("OPTIONS"), "Help output should contain 'OPTIONS'");
        assert!(stdout.contains("TOOLGATE_BACKEND_URL"), "Help should list env vars");
    }
}

/// Test that unknown options and commands fail
#[test]
fn test_unknown_arguments() {
    let output = run(&["--frobnicate"], &[]);
    assert!(!output.status.success());
    assert!(str::from_utf8(&output.stderr).unwrap().contains("Unknown option"));

    let output = run(&["frobnicate"], &[]);
    assert!(!output.status.success());
    assert!(str::from_utf8(&output.stderr).unwrap().contains("Unknown command"));
}

/// Test that the example configuration is valid TOML with the documented keys
#[test]
fn test_config_example() {
    let output = run(&["config", "example"], &[]);

    assert!(output.status.success());
    let parsed: toml::Table = toml::from_str(stdout(&output)).expect("Example should be valid TOML");
    assert!(parsed.contains_key("server"));
    assert!(parsed.contains_key("backend"));
    assert!(parsed.contains_key("translation"));
}

/// Test that `config show` prints the effective configuration
#[test]
fn test_config_show() {
    let output = run(&["config", "show"], &[("TOOLGATE_BACKEND_URL", "http://llm:9000/v1/chat/completions")]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("URL: http://llm:9000/v1/chat/completions"));
}

/// Test that validate exits 0 for a usable configuration and 1 otherwise
#[test]
fn test_validate_exit_codes() {
    let output = run(&["validate"], &[("TOOLGATE_SERVER_PORT", "8088")]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("[OK]"));

    let output = run(&["validate"], &[("TOOLGATE_SERVER_PORT", "0")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(str::from_utf8(&output.stderr).unwrap().contains("server.port"));
}

/// Test that doctor always completes
#[test]
fn test_doctor() {
    let output = run(&["doctor"], &[]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Configuration Health Check"));
}
