// crates/saas-boost-core/src/core/mod.rs
// ============================================================================
// Module: SaaS Boost Core Types
// Description: Canonical identifiers and quota records.
// Purpose: Provide stable, serializable types shared by sources and runtime.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types describe service quotas, the tenant context an evaluation runs
//! against, and the pass/fail result returned to callers.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod quota;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::QuotaCode;
pub use identifiers::ServiceCode;
pub use identifiers::TenantId;
pub use quota::DEFAULT_TENANTS_TO_ADD;
pub use quota::MAX_TENANTS_TO_ADD;
pub use quota::QuotaBreach;
pub use quota::QuotaCheckResult;
pub use quota::QuotaResultError;
pub use quota::ServiceQuota;
pub use quota::TenantContext;
