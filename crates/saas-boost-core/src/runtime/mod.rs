// crates/saas-boost-core/src/runtime/mod.rs
// ============================================================================
// Module: SaaS Boost Runtime
// Description: Quota evaluation, the proxy handler facade, and audit sinks.
// Purpose: Turn quota source data into pass/fail results for onboarding.
// Dependencies: crate::{core, interfaces}, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The runtime evaluates quotas for a tenant context ([`QuotaEvaluator`]),
//! exposes the evaluation through a proxy request/response facade
//! ([`QuotaCheckHandler`]), and records one audit event per evaluation.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod evaluator;
pub mod handler;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::QuotaAuditEvent;
pub use audit::QuotaAuditSink;
pub use audit::QuotaOutcome;
pub use audit::StderrAuditSink;
pub use evaluator::NO_QUOTAS_MESSAGE;
pub use evaluator::PASSED_MESSAGE;
pub use evaluator::QuotaError;
pub use evaluator::QuotaEvaluator;
pub use handler::ProxyResponse;
pub use handler::QuotaCheckHandler;
pub use handler::QuotaCheckRequest;
pub use handler::QuotaInvokeError;
pub use handler::decode_response;
pub use handler::invoke_quota_check;
