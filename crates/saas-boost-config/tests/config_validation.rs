//! Settings file validation tests for saas-boost-config.
// crates/saas-boost-config/tests/config_validation.rs
// =============================================================================
// Module: Config Validation Tests
// Description: Defaults, limits, and cross-field rules for saas-boost.toml.
// Purpose: Ensure invalid settings fail closed with a message naming the key.
// =============================================================================

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

use saas_boost_config::AuditSinkKind;
use saas_boost_config::ConfigError;
use saas_boost_config::SaasBoostConfig;
use tempfile::tempdir;

mod common;

use crate::common::TestResult;
use crate::common::assert_invalid;
use crate::common::config_from_toml;
use crate::common::minimal_config;

const STATIC_VPC: &str = r#"
[[quotas.static]]
service_code = "vpc"
quota_code = "L-F678F1CE"
quota_name = "VPCs per Region"
limit = 5
usage = 2
per_tenant = 1
"#;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Tests that an empty file validates with documented defaults.
#[test]
fn empty_config_uses_defaults() -> TestResult {
    let config = minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    assert_eq!(config.quotas.tenants_to_add, 1);
    assert!(config.quotas.static_quotas.is_empty());
    assert_eq!(config.audit.sink, AuditSinkKind::None);
    assert!(config.tiers.catalog.is_none());
    assert_eq!(config.quotas.tenant_context().tenants_to_add, 1);
    Ok(())
}

/// Tests that a full example document validates.
#[test]
fn full_example_validates() -> TestResult {
    let text = format!(
        r#"
[quotas]
tenants_to_add = 3
{STATIC_VPC}
[quotas.json]
path = "quotas.json"
max_bytes = 1048576

[quotas.http]
url = "https://quotas.internal/snapshot"
timeout_ms = 5000
allowed_hosts = ["quotas.internal"]

[audit]
sink = "stderr"

[tiers]
catalog = "tiers.json"
"#
    );
    let config = SaasBoostConfig::from_toml(&text).map_err(|err| err.to_string())?;
    assert_eq!(config.quotas.tenants_to_add, 3);
    assert_eq!(config.quotas.static_quotas.len(), 1);
    assert_eq!(config.audit.sink, AuditSinkKind::Stderr);
    Ok(())
}

/// Tests that unknown keys are rejected at parse time.
#[test]
fn unknown_keys_are_rejected() {
    assert!(config_from_toml("[quotas]\nunknown = 1\n").is_err());
    assert!(config_from_toml("[server]\nbind = \"x\"\n").is_err());
    assert!(matches!(
        SaasBoostConfig::from_toml("[audit]\nsink = \"syslog\"\n"),
        Err(ConfigError::Parse(_))
    ));
}

// ============================================================================
// SECTION: Quotas
// ============================================================================

/// Tests the tenants_to_add bounds.
#[test]
fn tenants_to_add_bounds() -> TestResult {
    assert_invalid(SaasBoostConfig::from_toml("[quotas]\ntenants_to_add = 0\n"), "tenants_to_add")?;
    assert_invalid(
        SaasBoostConfig::from_toml("[quotas]\ntenants_to_add = 1001\n"),
        "tenants_to_add",
    )?;
    SaasBoostConfig::from_toml("[quotas]\ntenants_to_add = 1000\n").map_err(|err| err.to_string())?;
    Ok(())
}

/// Tests that a static quota with usage above its limit is invalid.
#[test]
fn static_usage_above_limit_rejected() -> TestResult {
    let mut config = config_from_toml(STATIC_VPC).map_err(|err| err.to_string())?;
    config.quotas.static_quotas[0].usage = 6;
    assert_invalid(config.validate(), "usage exceeds limit")
}

/// Tests that static quotas need both codes.
#[test]
fn static_blank_codes_rejected() -> TestResult {
    let mut config = config_from_toml(STATIC_VPC).map_err(|err| err.to_string())?;
    config.quotas.static_quotas[0].quota_code = " ".into();
    assert_invalid(config.validate(), "require service_code and quota_code")
}

/// Tests that duplicate static quotas are rejected.
#[test]
fn static_duplicates_rejected() -> TestResult {
    let text = format!("{STATIC_VPC}{STATIC_VPC}");
    assert_invalid(SaasBoostConfig::from_toml(&text), "declared twice")
}

/// Tests JSON source limits.
#[test]
fn json_source_limits() -> TestResult {
    assert_invalid(
        SaasBoostConfig::from_toml("[quotas.json]\npath = \"q.json\"\nmax_bytes = 0\n"),
        "quotas.json.max_bytes",
    )?;
    assert_invalid(
        SaasBoostConfig::from_toml("[quotas.json]\npath = \"  \"\n"),
        "quotas.json.path must be non-empty",
    )?;
    let long_component = "a".repeat(256);
    assert_invalid(
        SaasBoostConfig::from_toml(&format!("[quotas.json]\npath = \"{long_component}\"\n")),
        "path component too long",
    )
}

/// Tests HTTP source limits.
#[test]
fn http_source_limits() -> TestResult {
    assert_invalid(
        SaasBoostConfig::from_toml("[quotas.http]\nurl = \"https://q\"\ntimeout_ms = 99\n"),
        "quotas.http.timeout_ms",
    )?;
    assert_invalid(
        SaasBoostConfig::from_toml("[quotas.http]\nurl = \"https://q\"\ntimeout_ms = 30001\n"),
        "quotas.http.timeout_ms",
    )?;
    assert_invalid(SaasBoostConfig::from_toml("[quotas.http]\nurl = \"\"\n"), "quotas.http.url")?;
    assert_invalid(
        SaasBoostConfig::from_toml("[quotas.http]\nurl = \"https://q\"\nallowed_hosts = [\"\"]\n"),
        "allowed_hosts",
    )
}

/// Tests that the registry holds one source per configured section.
#[test]
fn registry_reflects_configured_sources() -> TestResult {
    let text = format!("{STATIC_VPC}\n[quotas.json]\npath = \"quotas.json\"\n");
    let config = SaasBoostConfig::from_toml(&text).map_err(|err| err.to_string())?;
    let registry = config.quotas.build_registry().map_err(|err| err.to_string())?;
    assert_eq!(registry.names(), vec!["json", "static"]);

    let empty = minimal_config().map_err(|err| err.to_string())?;
    assert!(empty.quotas.build_registry().map_err(|err| err.to_string())?.is_empty());
    Ok(())
}

/// Tests that validation applies the same URL policy the HTTP source enforces.
#[test]
fn http_url_policy_checked_at_validation() -> TestResult {
    assert_invalid(
        SaasBoostConfig::from_toml("[quotas.http]\nurl = \"http://quotas.internal/snap\"\n"),
        "unsupported url scheme",
    )?;
    assert_invalid(
        SaasBoostConfig::from_toml("[quotas.http]\nurl = \"not a url\"\n"),
        "invalid quota snapshot url",
    )?;
    assert_invalid(
        SaasBoostConfig::from_toml(
            "[quotas.http]\nurl = \"https://example.com/snap\"\nallowed_hosts = \
             [\"quotas.internal\"]\n",
        ),
        "url host not allowed",
    )?;
    let config = SaasBoostConfig::from_toml(
        "[quotas.http]\nurl = \"http://quotas.internal/snap\"\nallow_http = true\n",
    )
    .map_err(|err| err.to_string())?;
    let registry = config.quotas.build_registry().map_err(|err| err.to_string())?;
    assert_eq!(registry.names(), vec!["http"]);
    Ok(())
}

/// Tests that misspelled keys inside static quota entries are rejected.
#[test]
fn static_quota_unknown_keys_rejected() {
    let text = format!("{STATIC_VPC}per_tenent_typo = 9\n");
    let result = SaasBoostConfig::from_toml(&text);
    assert!(matches!(result, Err(ConfigError::Parse(message)) if message.contains("per_tenent_typo")));
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Tests the file sink path rules.
#[test]
fn audit_path_rules() -> TestResult {
    assert_invalid(SaasBoostConfig::from_toml("[audit]\nsink = \"file\"\n"), "audit.path is required")?;
    assert_invalid(
        SaasBoostConfig::from_toml("[audit]\nsink = \"stderr\"\npath = \"a.jsonl\"\n"),
        "only valid when audit.sink = file",
    )?;
    SaasBoostConfig::from_toml("[audit]\nsink = \"file\"\npath = \"a.jsonl\"\n")
        .map_err(|err| err.to_string())?;
    Ok(())
}

/// Tests that the file sink opens its log.
#[test]
fn audit_file_sink_opens() -> TestResult {
    let dir = tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("audit.jsonl");
    let text = format!("[audit]\nsink = \"file\"\npath = {:?}\n", path.to_string_lossy());
    let config = SaasBoostConfig::from_toml(&text).map_err(|err| err.to_string())?;
    config.audit.build_sink().map_err(|err| err.to_string())?;
    assert!(path.exists());
    Ok(())
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Tests loading from an explicit path.
#[test]
fn load_reads_explicit_path() -> TestResult {
    let dir = tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("saas-boost.toml");
    fs::write(&path, "[quotas]\ntenants_to_add = 2\n").map_err(|err| err.to_string())?;
    let config = SaasBoostConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    assert_eq!(config.quotas.tenants_to_add, 2);
    Ok(())
}

/// Tests that oversized files are rejected before parsing.
#[test]
fn load_rejects_oversized_file() -> TestResult {
    let dir = tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("big.toml");
    let padding = format!("# {}\n", "x".repeat(1024 * 1024));
    fs::write(&path, padding).map_err(|err| err.to_string())?;
    assert_invalid(SaasBoostConfig::load(Some(&path)), "exceeds size limit")
}

/// Tests that reads stop at the size limit even for much larger files.
#[test]
fn load_rejects_file_far_above_limit() -> TestResult {
    let dir = tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("huge.toml");
    fs::write(&path, vec![b'#'; 8 * 1024 * 1024]).map_err(|err| err.to_string())?;
    assert_invalid(SaasBoostConfig::load(Some(&path)), "exceeds size limit")
}

/// Tests that non UTF-8 files are rejected.
#[test]
fn load_rejects_non_utf8() -> TestResult {
    let dir = tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("bad.toml");
    fs::write(&path, [0xff, 0xfe, 0x00]).map_err(|err| err.to_string())?;
    assert_invalid(SaasBoostConfig::load(Some(&path)), "utf-8")
}

/// Tests that a missing file is an I/O error.
#[test]
fn load_missing_file_is_io_error() {
    let result = SaasBoostConfig::load(Some(Path::new("/nonexistent/saas-boost.toml")));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

/// Tests that overlong path components are rejected.
#[test]
fn load_rejects_long_component() -> TestResult {
    let path = Path::new("/tmp").join("c".repeat(256));
    assert_invalid(SaasBoostConfig::load(Some(&path)), "component too long")
}
