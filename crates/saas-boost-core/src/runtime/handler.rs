// crates/saas-boost-core/src/runtime/handler.rs
// ============================================================================
// Module: Quota Check Handler
// Description: Proxy request/response facade over the quota evaluator.
// Purpose: Serve quota checks to callers that speak JSON bodies, and decode
//          those bodies on the calling side.
// Dependencies: crate::{core, runtime::evaluator}, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`QuotaCheckHandler::check_quotas`] accepts a loosely typed request map and
//! always answers with a [`ProxyResponse`]: 200 with the result body, 400 for
//! an unusable request, 500 when the quota source fails.
//! [`invoke_quota_check`] is the calling side: it runs the handler and decodes
//! the body into a typed [`QuotaCheckResult`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::MAX_TENANTS_TO_ADD;
use crate::core::QuotaCheckResult;
use crate::core::QuotaResultError;
use crate::core::TenantContext;
use crate::core::TenantId;
use crate::interfaces::QuotaSource;
use crate::runtime::evaluator::QuotaError;
use crate::runtime::evaluator::QuotaEvaluator;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Request key carrying the tenant identifier.
const TENANT_ID_KEY: &str = "tenantId";
/// Request key carrying the tenant count.
const TENANTS_TO_ADD_KEY: &str = "tenantsToAdd";
/// Content type of every response body.
const JSON_CONTENT_TYPE: &str = "application/json";

// ============================================================================
// SECTION: Request / Response
// ============================================================================

/// Loosely typed quota check request.
///
/// Recognized keys are `tenantId` (string) and `tenantsToAdd` (integer in
/// `1 ..= MAX_TENANTS_TO_ADD`). Other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuotaCheckRequest(Map<String, Value>);

impl QuotaCheckRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps an existing JSON map.
    #[must_use]
    pub const fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Sets a request key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Returns the request with `tenantId` set.
    #[must_use]
    pub fn with_tenant_id(mut self, tenant_id: &TenantId) -> Self {
        self.insert(TENANT_ID_KEY, Value::String(tenant_id.as_str().to_string()));
        self
    }

    /// Returns the request with `tenantsToAdd` set.
    #[must_use]
    pub fn with_tenants_to_add(mut self, tenants_to_add: u32) -> Self {
        self.insert(TENANTS_TO_ADD_KEY, Value::from(tenants_to_add));
        self
    }

    /// Derives the tenant context from the request keys.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::InvalidContext`] when a recognized key has the
    /// wrong type or an out-of-range value.
    pub fn tenant_context(&self) -> Result<TenantContext, QuotaError> {
        let mut ctx = TenantContext::new();
        match self.0.get(TENANT_ID_KEY) {
            None | Some(Value::Null) => {}
            Some(Value::String(id)) if !id.trim().is_empty() => {
                ctx.tenant_id = Some(TenantId::new(id.clone()));
            }
            Some(_) => {
                return Err(QuotaError::InvalidContext(format!(
                    "{TENANT_ID_KEY} must be a non-empty string"
                )));
            }
        }
        match self.0.get(TENANTS_TO_ADD_KEY) {
            None | Some(Value::Null) => {}
            Some(value) => {
                let count = value
                    .as_u64()
                    .and_then(|count| u32::try_from(count).ok())
                    .filter(|count| (1 ..= MAX_TENANTS_TO_ADD).contains(count))
                    .ok_or_else(|| {
                        QuotaError::InvalidContext(format!(
                            "{TENANTS_TO_ADD_KEY} must be an integer between 1 and \
                             {MAX_TENANTS_TO_ADD}"
                        ))
                    })?;
                ctx.tenants_to_add = count;
            }
        }
        Ok(ctx)
    }
}

/// Proxy-style response carrying a JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// JSON body text.
    pub body: String,
}

impl ProxyResponse {
    /// Creates a JSON response with the given status and body.
    #[must_use]
    pub fn json(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// Creates an error response with a `{"message": ...}` body.
    #[must_use]
    pub fn error(status_code: u16, message: &str) -> Self {
        let mut map = Map::new();
        map.insert("message".to_string(), Value::String(message.to_string()));
        Self::json(status_code, Value::Object(map).to_string())
    }

    /// Returns true for 2xx status codes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }
}

// ============================================================================
// SECTION: Handler
// ============================================================================

/// Quota check facade returning proxy responses.
pub struct QuotaCheckHandler<S> {
    /// Evaluator backing the handler.
    evaluator: QuotaEvaluator<S>,
}

impl<S: QuotaSource> QuotaCheckHandler<S> {
    /// Creates a handler over an evaluator.
    #[must_use]
    pub const fn new(evaluator: QuotaEvaluator<S>) -> Self {
        Self {
            evaluator,
        }
    }

    /// Returns the backing evaluator.
    #[must_use]
    pub const fn evaluator(&self) -> &QuotaEvaluator<S> {
        &self.evaluator
    }

    /// Runs a quota check and renders the outcome as a proxy response.
    #[must_use]
    pub fn check_quotas(&self, request: &QuotaCheckRequest) -> ProxyResponse {
        let outcome = request.tenant_context().and_then(|ctx| self.evaluator.evaluate(&ctx));
        match outcome {
            Ok(result) => ProxyResponse::json(200, result.to_body()),
            Err(err @ QuotaError::InvalidContext(_)) => ProxyResponse::error(400, &err.to_string()),
            Err(err @ QuotaError::Source(_)) => ProxyResponse::error(500, &err.to_string()),
        }
    }
}

// ============================================================================
// SECTION: Invoker
// ============================================================================

/// Errors raised when invoking a quota check through the handler facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotaInvokeError {
    /// The handler answered with a non-success status.
    #[error("quota check returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or the raw body when none was given.
        message: String,
    },
    /// The success body could not be decoded.
    #[error(transparent)]
    Body(#[from] QuotaResultError),
}

/// Invokes the handler and decodes its response body.
///
/// # Errors
///
/// Returns [`QuotaInvokeError::Status`] for non-2xx responses and
/// [`QuotaInvokeError::Body`] when the body lacks `passed` or `message`.
pub fn invoke_quota_check<S: QuotaSource>(
    handler: &QuotaCheckHandler<S>,
    request: &QuotaCheckRequest,
) -> Result<QuotaCheckResult, QuotaInvokeError> {
    let response = handler.check_quotas(request);
    decode_response(&response)
}

/// Decodes a proxy response into a typed result.
///
/// # Errors
///
/// Returns [`QuotaInvokeError`] under the same rules as [`invoke_quota_check`].
pub fn decode_response(response: &ProxyResponse) -> Result<QuotaCheckResult, QuotaInvokeError> {
    if !response.is_success() {
        return Err(QuotaInvokeError::Status {
            status: response.status_code,
            message: error_message(&response.body),
        });
    }
    Ok(QuotaCheckResult::from_body(&response.body)?)
}

/// Extracts `message` from an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => body.to_string(),
        },
        _ => body.to_string(),
    }
}
