// crates/saas-boost-providers/src/registry.rs
// ============================================================================
// Module: Quota Source Registry
// Description: Registry merging quota snapshots from named sources.
// Purpose: Let one evaluator consult static, file, and HTTP sources together.
// Dependencies: saas-boost-core
// ============================================================================

//! ## Overview
//! The registry holds named quota sources and implements
//! [`saas_boost_core::QuotaSource`] itself, so it plugs straight into the
//! evaluator. Sources are consulted in name order and their quotas are
//! concatenated; the first failing source aborts the call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use saas_boost_core::QuotaSource;
use saas_boost_core::QuotaSourceError;
use saas_boost_core::ServiceQuota;
use saas_boost_core::TenantContext;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Quota source registry.
///
/// # Invariants
/// - Source names are unique within the registry.
/// - Registered sources are `Send + Sync` and stored behind trait objects.
#[derive(Default)]
pub struct QuotaSourceRegistry {
    /// Source implementations keyed by name.
    sources: BTreeMap<String, Box<dyn QuotaSource + Send + Sync>>,
}

impl QuotaSourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new source under the given name.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaSourceError`] when the name is blank or already registered.
    pub fn register_source(
        &mut self,
        name: impl Into<String>,
        source: impl QuotaSource + Send + Sync + 'static,
    ) -> Result<(), QuotaSourceError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(QuotaSourceError::Source("quota source name must be set".to_string()));
        }
        if self.sources.contains_key(&name) {
            return Err(QuotaSourceError::Source(format!(
                "quota source already registered: {name}"
            )));
        }
        self.sources.insert(name, Box::new(source));
        Ok(())
    }

    /// Returns registered source names in query order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.sources.keys().map(String::as_str).collect()
    }

    /// Returns true when no sources are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl QuotaSource for QuotaSourceRegistry {
    fn service_quotas(&self, ctx: &TenantContext) -> Result<Vec<ServiceQuota>, QuotaSourceError> {
        let mut quotas = Vec::new();
        for (name, source) in &self.sources {
            let batch = source.service_quotas(ctx).map_err(|QuotaSourceError::Source(message)| {
                QuotaSourceError::Source(format!("{name}: {message}"))
            })?;
            quotas.extend(batch);
        }
        Ok(quotas)
    }
}
