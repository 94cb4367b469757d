// crates/saas-boost-core/src/interfaces/mod.rs
// ============================================================================
// Module: SaaS Boost Interfaces
// Description: Backend-agnostic seams for quota data.
// Purpose: Decouple quota evaluation from where quota data comes from.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Quota evaluation never talks to a cloud API directly. It asks a
//! [`QuotaSource`] for the quotas relevant to a tenant context, so static
//! config, local snapshots, and HTTP services can all feed the same evaluator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::ServiceQuota;
use crate::core::TenantContext;

// ============================================================================
// SECTION: Quota Source
// ============================================================================

/// Quota source errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotaSourceError {
    /// Source reported an error.
    #[error("quota source error: {0}")]
    Source(String),
}

/// Supplier of service quota snapshots.
pub trait QuotaSource {
    /// Returns the quotas that apply to the given context.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaSourceError`] when quota data cannot be fetched or parsed.
    fn service_quotas(&self, ctx: &TenantContext) -> Result<Vec<ServiceQuota>, QuotaSourceError>;
}

impl<T: QuotaSource + ?Sized> QuotaSource for Box<T> {
    fn service_quotas(&self, ctx: &TenantContext) -> Result<Vec<ServiceQuota>, QuotaSourceError> {
        (**self).service_quotas(ctx)
    }
}

impl<T: QuotaSource + ?Sized> QuotaSource for Arc<T> {
    fn service_quotas(&self, ctx: &TenantContext) -> Result<Vec<ServiceQuota>, QuotaSourceError> {
        (**self).service_quotas(ctx)
    }
}

impl QuotaSource for Vec<ServiceQuota> {
    fn service_quotas(&self, _ctx: &TenantContext) -> Result<Vec<ServiceQuota>, QuotaSourceError> {
        Ok(self.clone())
    }
}
