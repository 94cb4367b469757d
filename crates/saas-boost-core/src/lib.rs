// crates/saas-boost-core/src/lib.rs
// ============================================================================
// Module: SaaS Boost Core Library
// Description: Public API surface for tenant quota evaluation.
// Purpose: Expose quota types, the quota source interface, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! SaaS Boost core decides whether onboarding one or more tenants fits inside
//! the account's service quotas. Quota data arrives through the
//! [`QuotaSource`] interface; [`QuotaEvaluator`] turns it into a
//! [`QuotaCheckResult`], and [`QuotaCheckHandler`] wraps the evaluator in the
//! proxy request/response shape consumed by the onboarding workflow.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::QuotaSource;
pub use interfaces::QuotaSourceError;
pub use runtime::FileAuditSink;
pub use runtime::NO_QUOTAS_MESSAGE;
pub use runtime::NoopAuditSink;
pub use runtime::PASSED_MESSAGE;
pub use runtime::ProxyResponse;
pub use runtime::QuotaAuditEvent;
pub use runtime::QuotaAuditSink;
pub use runtime::QuotaCheckHandler;
pub use runtime::QuotaCheckRequest;
pub use runtime::QuotaError;
pub use runtime::QuotaEvaluator;
pub use runtime::QuotaInvokeError;
pub use runtime::QuotaOutcome;
pub use runtime::StderrAuditSink;
pub use runtime::decode_response;
pub use runtime::invoke_quota_check;
