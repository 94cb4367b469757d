// crates/saas-boost-core/tests/proptest_quota.rs
// ============================================================================
// Module: Quota Property-Based Tests
// Description: Property tests for headroom, breaches, and result decoding.
// Purpose: Detect panics and invariant violations across wide input ranges.
// ============================================================================

//! Property-based tests for quota arithmetic and result decoding.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use saas_boost_core::QuotaCheckResult;
use saas_boost_core::QuotaCode;
use saas_boost_core::QuotaEvaluator;
use saas_boost_core::ServiceCode;
use saas_boost_core::ServiceQuota;
use saas_boost_core::TenantContext;

fn quota(limit: u64, usage: u64, per_tenant: u64) -> ServiceQuota {
    ServiceQuota {
        service_code: ServiceCode::new("svc"),
        quota_code: QuotaCode::new("L-1"),
        quota_name: "generated".to_string(),
        limit,
        usage,
        per_tenant,
    }
}

proptest! {
    #[test]
    fn breach_matches_headroom_arithmetic(
        limit in any::<u64>(),
        usage in any::<u64>(),
        per_tenant in 0u64 .. 1_000_000,
        tenants in 1u32 .. 10_000,
    ) {
        let quota = quota(limit, usage, per_tenant);
        let headroom = limit.saturating_sub(usage);
        let required = per_tenant.saturating_mul(u64::from(tenants));
        prop_assert_eq!(quota.breach_for(tenants).is_some(), required > headroom);
        prop_assert!(quota.headroom() <= limit);
    }

    #[test]
    fn evaluation_passes_iff_no_quota_is_breached(
        quotas in prop::collection::vec((0u64 .. 100, 0u64 .. 100, 0u64 .. 5), 1 .. 8),
        tenants in 1u32 .. 20,
    ) {
        let quotas: Vec<ServiceQuota> = quotas
            .into_iter()
            .map(|(limit, usage, per_tenant)| quota(limit, usage, per_tenant))
            .collect();
        let any_breach = quotas.iter().any(|quota| quota.breach_for(tenants).is_some());
        let evaluator = QuotaEvaluator::new(quotas);
        let ctx = TenantContext::new().with_tenants_to_add(tenants);
        let result = evaluator.evaluate(&ctx).unwrap();
        prop_assert_eq!(result.passed, !any_breach);
    }

    #[test]
    fn from_body_never_panics(body in ".*") {
        let _ = QuotaCheckResult::from_body(&body);
    }

    #[test]
    fn encoded_results_decode(passed in any::<bool>(), message in ".*") {
        let result = QuotaCheckResult { passed, message };
        prop_assert_eq!(QuotaCheckResult::from_body(&result.to_body()).unwrap(), result);
    }
}
