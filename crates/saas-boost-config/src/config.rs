// crates/saas-boost-config/src/config.rs
// ============================================================================
// Module: SaaS Boost Configuration
// Description: Settings file loading and validation for SaaS Boost.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: saas-boost-core, saas-boost-providers, serde, toml
// ============================================================================

//! ## Overview
//! Settings are loaded from a TOML file with strict size and path limits.
//! Missing or invalid settings fail closed. The validated config can build
//! the quota source registry, the audit sink, and the tier catalog it
//! describes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use saas_boost_core::DEFAULT_TENANTS_TO_ADD;
use saas_boost_core::FileAuditSink;
use saas_boost_core::MAX_TENANTS_TO_ADD;
use saas_boost_core::NoopAuditSink;
use saas_boost_core::QuotaAuditSink;
use saas_boost_core::QuotaSource;
use saas_boost_core::ServiceQuota;
use saas_boost_core::StderrAuditSink;
use saas_boost_core::TenantContext;
use saas_boost_providers::HttpQuotaSource;
use saas_boost_providers::HttpQuotaSourceConfig;
use saas_boost_providers::JsonQuotaSource;
use saas_boost_providers::JsonQuotaSourceConfig;
use saas_boost_providers::QuotaSourceRegistry;
use saas_boost_providers::StaticQuotaSource;
use serde::Deserialize;
use thiserror::Error;

use crate::filesystem::TierCatalog;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "saas-boost.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "SAAS_BOOST_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of static quota entries.
pub(crate) const MAX_STATIC_QUOTAS: usize = 1_024;
/// Minimum HTTP source timeout in milliseconds.
pub(crate) const MIN_HTTP_TIMEOUT_MS: u64 = 100;
/// Maximum HTTP source timeout in milliseconds.
pub(crate) const MAX_HTTP_TIMEOUT_MS: u64 = 30_000;
/// Maximum snapshot size either file or HTTP source may accept.
pub(crate) const MAX_SNAPSHOT_BYTES: usize = 10 * 1024 * 1024;

/// Registry name of the static quota source.
const STATIC_SOURCE_NAME: &str = "static";
/// Registry name of the file snapshot source.
const JSON_SOURCE_NAME: &str = "json";
/// Registry name of the HTTP snapshot source.
const HTTP_SOURCE_NAME: &str = "http";

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// SaaS Boost settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaasBoostConfig {
    /// Quota check settings.
    #[serde(default)]
    pub quotas: QuotasConfig,
    /// Audit sink settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Filesystem tier settings.
    #[serde(default)]
    pub tiers: TiersConfig,
}

impl SaasBoostConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let file = File::open(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        let limit = u64::try_from(MAX_CONFIG_FILE_SIZE)
            .map_err(|_| ConfigError::Invalid("config size limit exceeds u64".to_string()))?;
        let mut bytes = Vec::new();
        file.take(limit.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config = Self::from_toml(content)?;
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.quotas.validate()?;
        self.audit.validate()?;
        self.tiers.validate()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Quotas
// ============================================================================

/// Quota check configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuotasConfig {
    /// Tenants a check makes room for when the caller does not say.
    #[serde(default = "default_tenants_to_add")]
    pub tenants_to_add: u32,
    /// Quotas declared inline.
    #[serde(default, rename = "static")]
    pub static_quotas: Vec<ServiceQuota>,
    /// Optional snapshot file source.
    #[serde(default)]
    pub json: Option<JsonQuotaSourceConfig>,
    /// Optional HTTP snapshot source.
    #[serde(default)]
    pub http: Option<HttpQuotaSourceConfig>,
}

impl Default for QuotasConfig {
    fn default() -> Self {
        Self {
            tenants_to_add: default_tenants_to_add(),
            static_quotas: Vec::new(),
            json: None,
            http: None,
        }
    }
}

impl QuotasConfig {
    /// Validates quota settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.tenants_to_add == 0 || self.tenants_to_add > MAX_TENANTS_TO_ADD {
            return Err(ConfigError::Invalid(format!(
                "quotas.tenants_to_add must be between 1 and {MAX_TENANTS_TO_ADD}"
            )));
        }
        if self.static_quotas.len() > MAX_STATIC_QUOTAS {
            return Err(ConfigError::Invalid("quotas.static exceeds max entries".to_string()));
        }
        let mut seen = BTreeSet::new();
        for quota in &self.static_quotas {
            if quota.service_code.is_blank() || quota.quota_code.is_blank() {
                return Err(ConfigError::Invalid(
                    "quotas.static entries require service_code and quota_code".to_string(),
                ));
            }
            if !seen.insert((quota.service_code.as_str(), quota.quota_code.as_str())) {
                return Err(ConfigError::Invalid(format!(
                    "quotas.static {}/{} is declared twice",
                    quota.service_code, quota.quota_code
                )));
            }
            if quota.usage > quota.limit {
                return Err(ConfigError::Invalid(format!(
                    "quotas.static {}/{} usage exceeds limit",
                    quota.service_code, quota.quota_code
                )));
            }
        }
        if let Some(json) = &self.json {
            validate_path_string("quotas.json.path", &json.path.to_string_lossy())?;
            if let Some(root) = &json.root {
                validate_path_string("quotas.json.root", &root.to_string_lossy())?;
            }
            if json.max_bytes == 0 || json.max_bytes > MAX_SNAPSHOT_BYTES {
                return Err(ConfigError::Invalid(
                    "quotas.json.max_bytes must be between 1 and 10485760".to_string(),
                ));
            }
        }
        if let Some(http) = &self.http {
            if http.url.trim().is_empty() {
                return Err(ConfigError::Invalid("quotas.http.url must be non-empty".to_string()));
            }
            if !(MIN_HTTP_TIMEOUT_MS ..= MAX_HTTP_TIMEOUT_MS).contains(&http.timeout_ms) {
                return Err(ConfigError::Invalid(format!(
                    "quotas.http.timeout_ms must be between {MIN_HTTP_TIMEOUT_MS} and \
                     {MAX_HTTP_TIMEOUT_MS}"
                )));
            }
            if http.max_response_bytes == 0 || http.max_response_bytes > MAX_SNAPSHOT_BYTES {
                return Err(ConfigError::Invalid(
                    "quotas.http.max_response_bytes must be between 1 and 10485760".to_string(),
                ));
            }
            if let Some(hosts) = &http.allowed_hosts
                && hosts.iter().any(|host| host.trim().is_empty())
            {
                return Err(ConfigError::Invalid(
                    "quotas.http.allowed_hosts entries must be non-empty".to_string(),
                ));
            }
            http.endpoint()
                .map_err(|err| ConfigError::Invalid(format!("quotas.http.url: {err}")))?;
        }
        Ok(())
    }

    /// Returns the default tenant context for a check.
    #[must_use]
    pub fn tenant_context(&self) -> TenantContext {
        TenantContext::new().with_tenants_to_add(self.tenants_to_add)
    }

    /// Builds a registry holding every configured quota source.
    ///
    /// Sources are registered as `static`, `json`, and `http`; sections that
    /// are absent or empty register nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a source rejects its settings.
    pub fn build_registry(&self) -> Result<QuotaSourceRegistry, ConfigError> {
        let mut registry = QuotaSourceRegistry::new();
        if !self.static_quotas.is_empty() {
            let source = StaticQuotaSource::new(self.static_quotas.clone())
                .map_err(|err| ConfigError::Invalid(err.to_string()))?;
            register(&mut registry, STATIC_SOURCE_NAME, source)?;
        }
        if let Some(json) = &self.json {
            register(&mut registry, JSON_SOURCE_NAME, JsonQuotaSource::new(json.clone()))?;
        }
        if let Some(http) = &self.http {
            let source = HttpQuotaSource::new(http.clone())
                .map_err(|err| ConfigError::Invalid(format!("quotas.http: {err}")))?;
            register(&mut registry, HTTP_SOURCE_NAME, source)?;
        }
        Ok(registry)
    }
}

/// Registers a source, mapping registry errors into config errors.
fn register(
    registry: &mut QuotaSourceRegistry,
    name: &str,
    source: impl QuotaSource + Send + Sync + 'static,
) -> Result<(), ConfigError> {
    registry.register_source(name, source).map_err(|err| ConfigError::Invalid(err.to_string()))
}

/// Serde default for [`QuotasConfig::tenants_to_add`].
const fn default_tenants_to_add() -> u32 {
    DEFAULT_TENANTS_TO_ADD
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard audit events.
    #[default]
    None,
    /// Write JSON lines to stderr.
    Stderr,
    /// Append JSON lines to a file.
    File,
}

/// Audit configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink receiving quota check events.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path, required for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AuditConfig {
    /// Validates audit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required when audit.sink = file".to_string()))
            }
            (AuditSinkKind::File, Some(path)) => {
                validate_path_string("audit.path", &path.to_string_lossy())
            }
            (_, Some(_)) => {
                Err(ConfigError::Invalid("audit.path is only valid when audit.sink = file".to_string()))
            }
            (_, None) => Ok(()),
        }
    }

    /// Opens the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file sink cannot be opened.
    pub fn build_sink(&self) -> Result<Arc<dyn QuotaAuditSink>, ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::None, _) => Ok(Arc::new(NoopAuditSink)),
            (AuditSinkKind::Stderr, _) => Ok(Arc::new(StderrAuditSink)),
            (AuditSinkKind::File, Some(path)) => {
                let sink = FileAuditSink::new(path).map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required when audit.sink = file".to_string()))
            }
        }
    }
}

// ============================================================================
// SECTION: Tiers
// ============================================================================

/// Filesystem tier configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TiersConfig {
    /// Optional path to a tier catalog JSON file.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

impl TiersConfig {
    /// Validates tier settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(catalog) = &self.catalog {
            validate_path_string("tiers.catalog", &catalog.to_string_lossy())?;
        }
        Ok(())
    }

    /// Loads the configured tier catalog, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the catalog cannot be read or is invalid.
    pub fn load_catalog(&self) -> Result<Option<TierCatalog>, ConfigError> {
        let Some(path) = &self.catalog else {
            return Ok(None);
        };
        TierCatalog::load(path).map(Some).map_err(|err| ConfigError::Invalid(err.to_string()))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
