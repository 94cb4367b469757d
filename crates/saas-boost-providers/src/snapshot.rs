// crates/saas-boost-providers/src/snapshot.rs
// ============================================================================
// Module: Quota Snapshot Documents
// Description: Wire format shared by file and HTTP quota sources.
// Purpose: Parse and validate `{"quotas": [...]}` documents.
// Dependencies: saas-boost-core, serde, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! A snapshot is a point-in-time list of service quotas. File and HTTP
//! sources share this format so a snapshot exported from one place can be
//! served from the other.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use saas_boost_core::QuotaSourceError;
use saas_boost_core::ServiceQuota;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Snapshot
// ============================================================================

/// Point-in-time list of service quotas.
///
/// # Invariants
/// - Service and quota codes are non-blank.
/// - Each `(service_code, quota_code)` pair appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuotaSnapshot {
    /// Quotas in reporting order.
    pub quotas: Vec<ServiceQuota>,
}

impl QuotaSnapshot {
    /// Parses a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaSourceError`] when the document is not a valid snapshot.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, QuotaSourceError> {
        let snapshot: Self = serde_json::from_slice(bytes)
            .map_err(|err| QuotaSourceError::Source(format!("invalid quota snapshot: {err}")))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Parses a YAML snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaSourceError`] when the document is not a valid snapshot.
    pub fn from_yaml_slice(bytes: &[u8]) -> Result<Self, QuotaSourceError> {
        let snapshot: Self = serde_yaml::from_slice(bytes)
            .map_err(|err| QuotaSourceError::Source(format!("invalid quota snapshot: {err}")))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks snapshot invariants.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaSourceError`] naming the first offending quota.
    pub fn validate(&self) -> Result<(), QuotaSourceError> {
        let mut seen = BTreeSet::new();
        for quota in &self.quotas {
            if quota.service_code.is_blank() || quota.quota_code.is_blank() {
                return Err(QuotaSourceError::Source(
                    "quota snapshot entries require service_code and quota_code".to_string(),
                ));
            }
            if !seen.insert((quota.service_code.clone(), quota.quota_code.clone())) {
                return Err(QuotaSourceError::Source(format!(
                    "duplicate quota in snapshot: {}/{}",
                    quota.service_code, quota.quota_code
                )));
            }
        }
        Ok(())
    }
}
