// crates/saas-boost-providers/src/static_source.rs
// ============================================================================
// Module: Static Quota Source
// Description: Quota source backed by a fixed list.
// Purpose: Serve quotas declared directly in the settings file.
// Dependencies: saas-boost-core
// ============================================================================

//! ## Overview
//! The static source returns the same quotas for every context. It is the
//! source used for quotas declared under `[[quotas.static]]`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use saas_boost_core::QuotaSource;
use saas_boost_core::QuotaSourceError;
use saas_boost_core::ServiceQuota;
use saas_boost_core::TenantContext;

use crate::snapshot::QuotaSnapshot;

// ============================================================================
// SECTION: Provider Implementation
// ============================================================================

/// Quota source returning a fixed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticQuotaSource {
    /// Quotas returned on every call.
    quotas: Vec<ServiceQuota>,
}

impl StaticQuotaSource {
    /// Creates a static source after checking snapshot invariants.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaSourceError`] for blank codes or duplicate quotas.
    pub fn new(quotas: Vec<ServiceQuota>) -> Result<Self, QuotaSourceError> {
        let snapshot = QuotaSnapshot {
            quotas,
        };
        snapshot.validate()?;
        Ok(Self {
            quotas: snapshot.quotas,
        })
    }

    /// Returns the configured quotas.
    #[must_use]
    pub fn quotas(&self) -> &[ServiceQuota] {
        &self.quotas
    }
}

impl QuotaSource for StaticQuotaSource {
    fn service_quotas(&self, _ctx: &TenantContext) -> Result<Vec<ServiceQuota>, QuotaSourceError> {
        Ok(self.quotas.clone())
    }
}
