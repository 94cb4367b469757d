// crates/saas-boost-core/tests/common/mod.rs
// =============================================================================
// Module: Core Test Helpers
// Description: Shared fixtures for quota evaluation tests.
// Purpose: Reduce duplication across integration tests for saas-boost-core.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::sync::Mutex;

use saas_boost_core::QuotaAuditEvent;
use saas_boost_core::QuotaAuditSink;
use saas_boost_core::QuotaCode;
use saas_boost_core::QuotaSource;
use saas_boost_core::QuotaSourceError;
use saas_boost_core::ServiceCode;
use saas_boost_core::ServiceQuota;
use saas_boost_core::TenantContext;

/// Builds a quota fixture.
pub fn quota(
    service: &str,
    code: &str,
    name: &str,
    limit: u64,
    usage: u64,
    per_tenant: u64,
) -> ServiceQuota {
    ServiceQuota {
        service_code: ServiceCode::new(service),
        quota_code: QuotaCode::new(code),
        quota_name: name.to_string(),
        limit,
        usage,
        per_tenant,
    }
}

/// VPC quota with the given usage and a limit of five.
pub fn vpc_quota(usage: u64) -> ServiceQuota {
    quota("vpc", "L-F678F1CE", "VPCs per Region", 5, usage, 1)
}

/// ALB quota with the given usage and a limit of fifty.
pub fn alb_quota(usage: u64) -> ServiceQuota {
    quota(
        "elasticloadbalancing",
        "L-53DA6B97",
        "Application Load Balancers per Region",
        50,
        usage,
        1,
    )
}

/// Quota source that always fails.
pub struct FailingSource;

impl QuotaSource for FailingSource {
    fn service_quotas(&self, _ctx: &TenantContext) -> Result<Vec<ServiceQuota>, QuotaSourceError> {
        Err(QuotaSourceError::Source("service quotas unavailable".to_string()))
    }
}

/// Audit sink capturing events in memory.
#[derive(Default)]
pub struct CapturingAudit {
    /// Captured events.
    pub events: Mutex<Vec<QuotaAuditEvent>>,
}

impl QuotaAuditSink for CapturingAudit {
    fn record(&self, event: &QuotaAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
