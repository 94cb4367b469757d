// crates/saas-boost-providers/tests/common/mod.rs
// =============================================================================
// Module: Provider Test Helpers
// Description: Shared fixtures for quota source tests.
// Purpose: Reduce duplication across integration tests for saas-boost-providers.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use saas_boost_core::QuotaCode;
use saas_boost_core::ServiceCode;
use saas_boost_core::ServiceQuota;

/// Snapshot document with one VPC and one ALB quota.
pub const SNAPSHOT_JSON: &str = r#"{
  "quotas": [
    {
      "service_code": "vpc",
      "quota_code": "L-F678F1CE",
      "quota_name": "VPCs per Region",
      "limit": 5,
      "usage": 2,
      "per_tenant": 1
    },
    {
      "service_code": "elasticloadbalancing",
      "quota_code": "L-53DA6B97",
      "quota_name": "Application Load Balancers per Region",
      "limit": 50,
      "usage": 49,
      "per_tenant": 1
    }
  ]
}"#;

/// YAML rendering of a single-quota snapshot.
pub const SNAPSHOT_YAML: &str = "quotas:
  - service_code: rds
    quota_code: L-7B6409FD
    quota_name: DB instances
    limit: 40
    usage: 10
    per_tenant: 2
";

/// Builds a quota fixture.
pub fn quota(service: &str, code: &str, usage: u64) -> ServiceQuota {
    ServiceQuota {
        service_code: ServiceCode::new(service),
        quota_code: QuotaCode::new(code),
        quota_name: format!("{service} {code}"),
        limit: 10,
        usage,
        per_tenant: 1,
    }
}

/// Returns a string of `len` bytes.
pub fn oversized_string(len: usize) -> String {
    "x".repeat(len)
}
