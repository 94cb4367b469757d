// crates/saas-boost-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Quota Evaluator
// Description: Compares quota headroom against the tenants being onboarded.
// Purpose: Produce a deterministic pass/fail result with an operator message.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! The evaluator pulls quotas from its [`QuotaSource`], checks each one for a
//! breach, and folds the breaches into a single [`QuotaCheckResult`]. Breaches
//! are reported in the order the source returned the quotas.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::MAX_TENANTS_TO_ADD;
use crate::core::QuotaBreach;
use crate::core::QuotaCheckResult;
use crate::core::TenantContext;
use crate::interfaces::QuotaSource;
use crate::interfaces::QuotaSourceError;
use crate::runtime::audit::NoopAuditSink;
use crate::runtime::audit::QuotaAuditEvent;
use crate::runtime::audit::QuotaAuditSink;
use crate::runtime::audit::QuotaOutcome;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Message returned when the source reports no quotas.
pub const NO_QUOTAS_MESSAGE: &str = "No service quotas to check";
/// Message returned when every quota has headroom.
pub const PASSED_MESSAGE: &str = "Service quota check passed";
/// Prefix for the message returned when a quota is breached.
const FAILED_PREFIX: &str = "Service quota check failed: ";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when an evaluation cannot produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotaError {
    /// The quota source failed.
    #[error(transparent)]
    Source(#[from] QuotaSourceError),
    /// The tenant context is not usable.
    #[error("invalid tenant context: {0}")]
    InvalidContext(String),
}

// ============================================================================
// SECTION: Evaluator
// ============================================================================

/// Quota evaluator bound to a single quota source.
pub struct QuotaEvaluator<S> {
    /// Source of quota snapshots.
    source: S,
    /// Sink receiving one event per evaluation.
    audit: Arc<dyn QuotaAuditSink>,
}

impl<S: QuotaSource> QuotaEvaluator<S> {
    /// Creates an evaluator that does not emit audit events.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_audit(source, Arc::new(NoopAuditSink))
    }

    /// Creates an evaluator that records each evaluation to `audit`.
    #[must_use]
    pub fn with_audit(source: S, audit: Arc<dyn QuotaAuditSink>) -> Self {
        Self {
            source,
            audit,
        }
    }

    /// Returns the underlying quota source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Evaluates whether the tenants in `ctx` fit inside every quota.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::InvalidContext`] when `tenants_to_add` is outside
    /// `1 ..= MAX_TENANTS_TO_ADD` and
    /// [`QuotaError::Source`] when the quota source fails.
    pub fn evaluate(&self, ctx: &TenantContext) -> Result<QuotaCheckResult, QuotaError> {
        if !(1 ..= MAX_TENANTS_TO_ADD).contains(&ctx.tenants_to_add) {
            let err = QuotaError::InvalidContext(format!(
                "tenants_to_add must be between 1 and {MAX_TENANTS_TO_ADD}"
            ));
            self.record_error(ctx, &err);
            return Err(err);
        }
        let quotas = match self.source.service_quotas(ctx) {
            Ok(quotas) => quotas,
            Err(err) => {
                let err = QuotaError::from(err);
                self.record_error(ctx, &err);
                return Err(err);
            }
        };
        let breaches: Vec<QuotaBreach> =
            quotas.iter().filter_map(|quota| quota.breach_for(ctx.tenants_to_add)).collect();
        let result = summarize(quotas.len(), &breaches);
        let outcome = if result.passed { QuotaOutcome::Passed } else { QuotaOutcome::Failed };
        self.audit.record(&QuotaAuditEvent::new(ctx, quotas.len(), breaches, outcome, None));
        Ok(result)
    }

    /// Records a failed evaluation.
    fn record_error(&self, ctx: &TenantContext, err: &QuotaError) {
        self.audit.record(&QuotaAuditEvent::new(
            ctx,
            0,
            Vec::new(),
            QuotaOutcome::Error,
            Some(err.to_string()),
        ));
    }
}

/// Folds breaches into the operator-facing result.
fn summarize(quota_count: usize, breaches: &[QuotaBreach]) -> QuotaCheckResult {
    if quota_count == 0 {
        return QuotaCheckResult::pass(NO_QUOTAS_MESSAGE);
    }
    if breaches.is_empty() {
        return QuotaCheckResult::pass(PASSED_MESSAGE);
    }
    let details: Vec<String> = breaches.iter().map(ToString::to_string).collect();
    QuotaCheckResult::fail(format!("{FAILED_PREFIX}{}", details.join("; ")))
}
