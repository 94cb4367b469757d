//! End-to-end tests for the saas-boost binary.
// crates/saas-boost-cli/tests/cli.rs
// ============================================================================
// Module: CLI End-to-End Tests
// Description: Runs the compiled binary against temporary settings files.
// Purpose: Pin exit codes and output lines for each command.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use tempfile::tempdir;

const CONFIG: &str = r#"
[quotas]
tenants_to_add = 1

[[quotas.static]]
service_code = "vpc"
quota_code = "L-F678F1CE"
quota_name = "VPCs per Region"
limit = 5
usage = 3
per_tenant = 1
"#;

/// Runs the binary with `args`, isolated from any ambient config variable.
fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_saas-boost"))
        .args(args)
        .env_remove("SAAS_BOOST_CONFIG")
        .output()
        .expect("spawn saas-boost")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_config(dir: &Path) -> String {
    let path = dir.join("saas-boost.toml");
    fs::write(&path, CONFIG).unwrap();
    path.to_string_lossy().into_owned()
}

/// Tests that --version prints the crate version.
#[test]
fn version_flag_prints_version() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), format!("saas-boost {}", env!("CARGO_PKG_VERSION")));
}

/// Tests that a passing check exits zero.
#[test]
fn quotas_check_passes() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let output = run(&["quotas", "check", "--config", &config, "--tenant-id", "acme"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), "PASSED: Service quota check passed");
}

/// Tests that a breached quota exits with code 2.
#[test]
fn quotas_check_not_passed_exits_two() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let output = run(&["quotas", "check", "--config", &config, "--tenants", "3"]);
    assert_eq!(output.status.code(), Some(2));
    let line = stdout(&output);
    assert!(line.starts_with("NOT PASSED: Service quota check failed: VPCs per Region"), "{line}");
}

/// Tests that --raw prints the JSON body.
#[test]
fn quotas_check_raw_prints_body() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let output = run(&["quotas", "check", "--config", &config, "--raw"]);
    assert_eq!(output.status.code(), Some(0));
    let body: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(body["passed"], serde_json::Value::Bool(true));
}

/// Tests that a missing config file exits with code 1.
#[test]
fn quotas_check_missing_config_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let output = run(&["quotas", "check", "--config", &missing.to_string_lossy()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config"));
}

/// Tests config validation success and failure.
#[test]
fn config_validate_reports_result() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let output = run(&["config", "validate", "--config", &config]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "Config valid.");

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "[quotas]\ntenants_to_add = 0\n").unwrap();
    let output = run(&["config", "validate", "--config", &bad.to_string_lossy()]);
    assert_eq!(output.status.code(), Some(1));
}

/// Tests tier validation for valid and invalid documents.
#[test]
fn tier_validate_reports_result() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("tier.json");
    fs::write(&good, r#"{"type": "FSX_WINDOWS", "storageGb": 32, "throughputMbs": 8}"#).unwrap();
    let output = run(&["tier", "validate", "--file", &good.to_string_lossy()]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "Tier config valid (type=FSX_WINDOWS).");

    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"{"type": "FSX_WINDOWS", "storageGb": 32, "throughputMbs": 7}"#).unwrap();
    let output = run(&["tier", "validate", "--file", &bad.to_string_lossy()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("throughputMbs"));
}

/// Writes a config whose `tiers.catalog` points at `catalog`.
fn write_config_with_catalog(dir: &Path, catalog: &Path) -> String {
    let path = dir.join("with-catalog.toml");
    let text = format!("{CONFIG}\n[tiers]\ncatalog = {:?}\n", catalog.to_string_lossy());
    fs::write(&path, text).unwrap();
    path.to_string_lossy().into_owned()
}

/// Tests that tier validation falls back to the configured catalog.
#[test]
fn tier_validate_uses_configured_catalog() {
    let dir = tempdir().unwrap();
    let catalog = dir.path().join("tiers.json");
    fs::write(
        &catalog,
        r#"{"tiers": {"default": {"type": "FSX_WINDOWS", "storageGb": 32, "throughputMbs": 8},
            "basic": {"type": "EFS"}}}"#,
    )
    .unwrap();
    let config = write_config_with_catalog(dir.path(), &catalog);
    let output = run(&["tier", "validate", "--config", &config]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), "Tier catalog valid (2 tiers: basic, default).");

    let plain = write_config(dir.path());
    let output = run(&["tier", "validate", "--config", &plain]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("tiers.catalog is not set"));
}

/// Tests that config validation fails when the configured catalog is missing or invalid.
#[test]
fn config_validate_loads_configured_catalog() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let config = write_config_with_catalog(dir.path(), &missing);
    let output = run(&["config", "validate", "--config", &config]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load tier catalog"));

    fs::write(&missing, r#"{"tiers": {"bad name": {"type": "EFS"}}}"#).unwrap();
    let output = run(&["config", "validate", "--config", &config]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("bad name"));

    fs::write(&missing, r#"{"tiers": {"basic": {"type": "EFS"}}}"#).unwrap();
    let output = run(&["config", "validate", "--config", &config]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "Config valid.");
}
