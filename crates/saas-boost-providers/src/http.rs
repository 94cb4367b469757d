// crates/saas-boost-providers/src/http.rs
// ============================================================================
// Module: HTTP Quota Source
// Description: Quota source that fetches snapshots from an HTTP endpoint.
// Purpose: Read quotas published by a central quota service.
// Dependencies: saas-boost-core, reqwest, serde
// ============================================================================

//! ## Overview
//! The HTTP source issues a bounded GET for a snapshot document on every
//! call. It enforces scheme restrictions, an optional host allowlist,
//! disabled redirects, and a response size limit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::io::Read;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use saas_boost_core::QuotaSource;
use saas_boost_core::QuotaSourceError;
use saas_boost_core::ServiceQuota;
use saas_boost_core::TenantContext;
use serde::Deserialize;

use crate::snapshot::QuotaSnapshot;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the HTTP source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpQuotaSourceConfig {
    /// Snapshot endpoint.
    pub url: String,
    /// Allow cleartext HTTP (disabled by default).
    #[serde(default)]
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
    /// Optional host allowlist.
    #[serde(default)]
    pub allowed_hosts: Option<BTreeSet<String>>,
    /// User agent string for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl HttpQuotaSourceConfig {
    /// Creates a config for `url` with default limits.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            allow_http: false,
            timeout_ms: default_timeout_ms(),
            max_response_bytes: default_max_response_bytes(),
            allowed_hosts: None,
            user_agent: default_user_agent(),
        }
    }

    /// Parses the endpoint and checks it against the scheme and host policy.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaSourceError`] when the URL does not parse, uses a
    /// disallowed scheme, or names a host outside the allowlist.
    pub fn endpoint(&self) -> Result<Url, QuotaSourceError> {
        let url = Url::parse(self.url.trim())
            .map_err(|_| QuotaSourceError::Source("invalid quota snapshot url".to_string()))?;
        validate_url(&url, self)?;
        Ok(url)
    }
}

/// Default request timeout in milliseconds.
const fn default_timeout_ms() -> u64 {
    5_000
}

/// Default response size limit in bytes.
const fn default_max_response_bytes() -> usize {
    1024 * 1024
}

/// Default user agent.
fn default_user_agent() -> String {
    "saas-boost/0.1".to_string()
}

// ============================================================================
// SECTION: Provider Implementation
// ============================================================================

/// Quota source for HTTP snapshot endpoints.
pub struct HttpQuotaSource {
    /// Source configuration, including limits and policy.
    config: HttpQuotaSourceConfig,
    /// Parsed and policy-checked endpoint.
    url: Url,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl HttpQuotaSource {
    /// Creates a new HTTP source with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaSourceError`] when the URL is invalid or disallowed, or
    /// when the HTTP client cannot be created.
    pub fn new(config: HttpQuotaSourceConfig) -> Result<Self, QuotaSourceError> {
        let url = config.endpoint()?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|_| QuotaSourceError::Source("http client build failed".to_string()))?;
        Ok(Self {
            config,
            url,
            client,
        })
    }
}

impl QuotaSource for HttpQuotaSource {
    fn service_quotas(&self, _ctx: &TenantContext) -> Result<Vec<ServiceQuota>, QuotaSourceError> {
        let mut response = self
            .client
            .get(self.url.clone())
            .send()
            .map_err(|_| QuotaSourceError::Source("http request failed".to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuotaSourceError::Source(format!(
                "quota snapshot request returned status {}",
                status.as_u16()
            )));
        }
        let body = read_response_limited(&mut response, self.config.max_response_bytes)?;
        Ok(QuotaSnapshot::from_json_slice(&body)?.quotas)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates URL scheme and allowlist policy.
fn validate_url(url: &Url, config: &HttpQuotaSourceConfig) -> Result<(), QuotaSourceError> {
    match url.scheme() {
        "https" => {}
        "http" if config.allow_http => {}
        _ => return Err(QuotaSourceError::Source("unsupported url scheme".to_string())),
    }
    if let Some(allowlist) = &config.allowed_hosts {
        let host = url
            .host_str()
            .ok_or_else(|| QuotaSourceError::Source("url host required".to_string()))?;
        if !allowlist.contains(host) {
            return Err(QuotaSourceError::Source("url host not allowed".to_string()));
        }
    }
    Ok(())
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(
    response: &mut reqwest::blocking::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, QuotaSourceError> {
    let expected_len = response.content_length();
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| QuotaSourceError::Source("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err(QuotaSourceError::Source("http response exceeds size limit".to_string()));
    }
    let mut buf = Vec::new();
    let limit = max_bytes_u64.saturating_add(1);
    let mut handle = response.take(limit);
    handle
        .read_to_end(&mut buf)
        .map_err(|_| QuotaSourceError::Source("failed to read response".to_string()))?;
    if buf.len() > max_bytes {
        return Err(QuotaSourceError::Source("http response exceeds size limit".to_string()));
    }
    Ok(buf)
}
