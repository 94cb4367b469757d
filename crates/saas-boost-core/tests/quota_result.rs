//! Response body decoding tests for saas-boost-core.
// crates/saas-boost-core/tests/quota_result.rs
// =============================================================================
// Module: Quota Result Decoding Tests
// Description: Validate typed decoding of quota check response bodies.
// Purpose: Ensure absent or mistyped fields fail explicitly instead of
//          producing a default.
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

use saas_boost_core::QuotaCheckResult;
use saas_boost_core::QuotaResultError;

/// Tests that a well-formed body yields both fields.
#[test]
fn decodes_passed_and_message() {
    let result = QuotaCheckResult::from_body(r#"{"passed": true, "message": "ok"}"#).unwrap();
    assert!(result.passed);
    assert_eq!(result.message, "ok");
}

/// Tests that extra keys do not interfere with decoding.
#[test]
fn ignores_unknown_keys() {
    let body = r#"{"message": "VPC quota exceeded", "passed": false, "requestId": "abc"}"#;
    let result = QuotaCheckResult::from_body(body).unwrap();
    assert_eq!(result, QuotaCheckResult::fail("VPC quota exceeded"));
}

/// Tests that a missing `passed` key is reported by name.
#[test]
fn missing_passed_is_explicit() {
    let err = QuotaCheckResult::from_body(r#"{"message": "ok"}"#).unwrap_err();
    assert_eq!(err, QuotaResultError::MissingField("passed"));
}

/// Tests that a missing `message` key is reported by name.
#[test]
fn missing_message_is_explicit() {
    let err = QuotaCheckResult::from_body(r#"{"passed": true}"#).unwrap_err();
    assert_eq!(err, QuotaResultError::MissingField("message"));
}

/// Tests that `null` counts as absent.
#[test]
fn null_passed_is_missing() {
    let err = QuotaCheckResult::from_body(r#"{"passed": null, "message": "ok"}"#).unwrap_err();
    assert_eq!(err, QuotaResultError::MissingField("passed"));
}

/// Tests that a string where a boolean belongs is a type error.
#[test]
fn string_passed_is_wrong_type() {
    let err = QuotaCheckResult::from_body(r#"{"passed": "true", "message": "ok"}"#).unwrap_err();
    assert_eq!(
        err,
        QuotaResultError::WrongType {
            field: "passed",
            expected: "boolean",
        }
    );
}

/// Tests that a numeric message is a type error.
#[test]
fn numeric_message_is_wrong_type() {
    let err = QuotaCheckResult::from_body(r#"{"passed": false, "message": 3}"#).unwrap_err();
    assert_eq!(
        err,
        QuotaResultError::WrongType {
            field: "message",
            expected: "string",
        }
    );
}

/// Tests that non-object and non-JSON bodies are malformed.
#[test]
fn non_object_bodies_are_malformed() {
    for body in ["[]", "true", "not json", ""] {
        let err = QuotaCheckResult::from_body(body).unwrap_err();
        assert!(matches!(err, QuotaResultError::Malformed(_)), "body {body:?} gave {err}");
    }
}
