// crates/saas-boost-core/src/runtime/audit.rs
// ============================================================================
// Module: Quota Audit Logging
// Description: Structured audit events for quota evaluations.
// Purpose: Emit JSON-line audit records without a logging framework dependency.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every evaluation produces one [`QuotaAuditEvent`]. Sinks decide where the
//! JSON line goes: nowhere, stderr, or an append-only file.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::QuotaBreach;
use crate::core::TenantContext;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Evaluation outcome recorded in audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaOutcome {
    /// Every quota had headroom.
    Passed,
    /// At least one quota was breached.
    Failed,
    /// The evaluation could not complete.
    Error,
}

/// Quota evaluation audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct QuotaAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Tenant identifier when known.
    pub tenant_id: Option<String>,
    /// Number of tenants the check made room for.
    pub tenants_to_add: u32,
    /// Number of quotas inspected.
    pub quota_count: usize,
    /// Breached quotas, in source order.
    pub breaches: Vec<QuotaBreach>,
    /// Evaluation outcome.
    pub outcome: QuotaOutcome,
    /// Error text when the outcome is [`QuotaOutcome::Error`].
    pub error: Option<String>,
}

impl QuotaAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(
        ctx: &TenantContext,
        quota_count: usize,
        breaches: Vec<QuotaBreach>,
        outcome: QuotaOutcome,
        error: Option<String>,
    ) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "quota_check",
            timestamp_ms,
            tenant_id: ctx.tenant_id.as_ref().map(|id| id.as_str().to_string()),
            tenants_to_add: ctx.tenants_to_add,
            quota_count,
            breaches,
            outcome,
            error,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for quota evaluation events.
pub trait QuotaAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &QuotaAuditEvent);
}

/// Audit sink that discards events.
pub struct NoopAuditSink;

impl QuotaAuditSink for NoopAuditSink {
    fn record(&self, _event: &QuotaAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl QuotaAuditSink for StderrAuditSink {
    fn record(&self, event: &QuotaAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl QuotaAuditSink for FileAuditSink {
    fn record(&self, event: &QuotaAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}
