// crates/saas-boost-core/src/core/quota.rs
// ============================================================================
// Module: Service Quota Types
// Description: Quota records, tenant context, breaches, and check results.
// Purpose: Model quota headroom and the pass/fail result of a quota check.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`ServiceQuota`] pairs an account limit with current usage and the amount
//! each onboarded tenant consumes. A quota is breached when the remaining
//! headroom cannot absorb the tenants being added. The outcome of a check is a
//! [`QuotaCheckResult`], which also owns the typed decoding of response bodies.
//!
//! Invariants:
//! - Headroom saturates at zero when usage already exceeds the limit.
//! - Decoding a result body never guesses: absent or mistyped fields are errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::QuotaCode;
use crate::core::identifiers::ServiceCode;
use crate::core::identifiers::TenantId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Number of tenants an evaluation assumes when the caller does not say.
pub const DEFAULT_TENANTS_TO_ADD: u32 = 1;
/// Largest tenant count a single evaluation may request.
pub const MAX_TENANTS_TO_ADD: u32 = 1_000;

// ============================================================================
// SECTION: Service Quotas
// ============================================================================

/// A single account-level service quota and its current consumption.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceQuota {
    /// Service owning the quota.
    pub service_code: ServiceCode,
    /// Quota code within the service.
    pub quota_code: QuotaCode,
    /// Human-readable quota name.
    pub quota_name: String,
    /// Applied quota value.
    pub limit: u64,
    /// Current usage counted against the quota.
    pub usage: u64,
    /// Units of the quota consumed by each onboarded tenant.
    pub per_tenant: u64,
}

impl ServiceQuota {
    /// Returns the remaining headroom under the quota.
    #[must_use]
    pub const fn headroom(&self) -> u64 {
        self.limit.saturating_sub(self.usage)
    }

    /// Returns the units needed to onboard `tenants` tenants.
    #[must_use]
    pub fn required_for(&self, tenants: u32) -> u64 {
        self.per_tenant.saturating_mul(u64::from(tenants))
    }

    /// Returns a breach record when the headroom cannot absorb `tenants`.
    #[must_use]
    pub fn breach_for(&self, tenants: u32) -> Option<QuotaBreach> {
        let required = self.required_for(tenants);
        let available = self.headroom();
        if required <= available {
            return None;
        }
        Some(QuotaBreach {
            service_code: self.service_code.clone(),
            quota_code: self.quota_code.clone(),
            quota_name: self.quota_name.clone(),
            required,
            available,
            limit: self.limit,
        })
    }
}

/// A quota whose headroom is smaller than the units a check requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaBreach {
    /// Service owning the quota.
    pub service_code: ServiceCode,
    /// Quota code within the service.
    pub quota_code: QuotaCode,
    /// Human-readable quota name.
    pub quota_name: String,
    /// Units required by the tenants being added.
    pub required: u64,
    /// Units still available under the quota.
    pub available: u64,
    /// Applied quota value.
    pub limit: u64,
}

impl fmt::Display for QuotaBreach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{}) needs {}, available {} of {}",
            self.quota_name,
            self.service_code,
            self.quota_code,
            self.required,
            self.available,
            self.limit
        )
    }
}

// ============================================================================
// SECTION: Tenant Context
// ============================================================================

/// Input for a quota evaluation.
///
/// # Invariants
/// - `tenants_to_add` must be at least one; the evaluator rejects zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    /// Tenant being onboarded, when known.
    #[serde(default)]
    pub tenant_id: Option<TenantId>,
    /// Number of tenants the check must make room for.
    #[serde(default = "default_tenants_to_add")]
    pub tenants_to_add: u32,
}

impl TenantContext {
    /// Creates a context for an anonymous single-tenant check.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tenant_id: None,
            tenants_to_add: DEFAULT_TENANTS_TO_ADD,
        }
    }

    /// Creates a context for a named tenant.
    #[must_use]
    pub fn for_tenant(tenant_id: impl Into<TenantId>) -> Self {
        Self {
            tenant_id: Some(tenant_id.into()),
            tenants_to_add: DEFAULT_TENANTS_TO_ADD,
        }
    }

    /// Returns the context with a different tenant count.
    #[must_use]
    pub const fn with_tenants_to_add(mut self, tenants_to_add: u32) -> Self {
        self.tenants_to_add = tenants_to_add;
        self
    }
}

impl Default for TenantContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Serde default for [`TenantContext::tenants_to_add`].
const fn default_tenants_to_add() -> u32 {
    DEFAULT_TENANTS_TO_ADD
}

// ============================================================================
// SECTION: Check Result
// ============================================================================

/// Outcome of a quota check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaCheckResult {
    /// True when every quota can absorb the requested tenants.
    pub passed: bool,
    /// Explanation suitable for display to an operator.
    pub message: String,
}

impl QuotaCheckResult {
    /// Creates a passing result.
    #[must_use]
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
        }
    }

    /// Creates a failing result.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }

    /// Decodes a JSON response body.
    ///
    /// Extra keys are ignored. A `null` value counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaResultError`] when the body is not a JSON object, or when
    /// `passed` or `message` is absent or has the wrong type.
    pub fn from_body(body: &str) -> Result<Self, QuotaResultError> {
        let value: Value =
            serde_json::from_str(body).map_err(|err| QuotaResultError::Malformed(err.to_string()))?;
        let Value::Object(map) = value else {
            return Err(QuotaResultError::Malformed("body must be a json object".to_string()));
        };
        let passed = match field(&map, "passed")? {
            Value::Bool(passed) => *passed,
            _ => {
                return Err(QuotaResultError::WrongType {
                    field: "passed",
                    expected: "boolean",
                });
            }
        };
        let message = match field(&map, "message")? {
            Value::String(message) => message.clone(),
            _ => {
                return Err(QuotaResultError::WrongType {
                    field: "message",
                    expected: "string",
                });
            }
        };
        Ok(Self {
            passed,
            message,
        })
    }

    /// Encodes the result as a JSON response body.
    #[must_use]
    pub fn to_body(&self) -> String {
        let mut map = Map::new();
        map.insert("passed".to_string(), Value::Bool(self.passed));
        map.insert("message".to_string(), Value::String(self.message.clone()));
        Value::Object(map).to_string()
    }
}

/// Looks up a required field, treating `null` as absent.
fn field<'a>(map: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value, QuotaResultError> {
    match map.get(name) {
        None | Some(Value::Null) => Err(QuotaResultError::MissingField(name)),
        Some(value) => Ok(value),
    }
}

/// Errors raised while decoding a quota check result body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotaResultError {
    /// Body is not a JSON object.
    #[error("malformed quota result: {0}")]
    Malformed(String),
    /// Required field is absent.
    #[error("quota result missing field: {0}")]
    MissingField(&'static str),
    /// Field is present with an unexpected type.
    #[error("quota result field {field} must be a {expected}")]
    WrongType {
        /// Field name.
        field: &'static str,
        /// Expected JSON type.
        expected: &'static str,
    },
}

// ============================================================================
// SECTION: Tests
// ============================================================================
