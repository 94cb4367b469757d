// crates/saas-boost-providers/src/json.rs
// ============================================================================
// Module: JSON Quota Source
// Description: Quota source for JSON and YAML snapshot files.
// Purpose: Load quota snapshots from local files with strict limits.
// Dependencies: saas-boost-core, serde, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! The JSON source reads a snapshot file on every call so an operator can
//! refresh quotas without restarting anything. Files ending in `.yaml` or
//! `.yml` are parsed as YAML when allowed. An optional root confines the
//! snapshot path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use saas_boost_core::QuotaSource;
use saas_boost_core::QuotaSourceError;
use saas_boost_core::ServiceQuota;
use saas_boost_core::TenantContext;
use serde::Deserialize;

use crate::snapshot::QuotaSnapshot;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default maximum snapshot file size in bytes.
pub const DEFAULT_MAX_SNAPSHOT_BYTES: usize = 1024 * 1024;

/// Configuration for the JSON source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonQuotaSourceConfig {
    /// Snapshot file path, relative to `root` when a root is set.
    pub path: PathBuf,
    /// Optional root directory the snapshot must live under.
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Maximum file size allowed, in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    /// Allow YAML parsing when file extension is .yaml or .yml.
    #[serde(default = "default_allow_yaml")]
    pub allow_yaml: bool,
}

impl JsonQuotaSourceConfig {
    /// Creates a config for `path` with default limits.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            root: None,
            max_bytes: DEFAULT_MAX_SNAPSHOT_BYTES,
            allow_yaml: true,
        }
    }
}

/// Serde default for [`JsonQuotaSourceConfig::max_bytes`].
const fn default_max_bytes() -> usize {
    DEFAULT_MAX_SNAPSHOT_BYTES
}

/// Serde default for [`JsonQuotaSourceConfig::allow_yaml`].
const fn default_allow_yaml() -> bool {
    true
}

// ============================================================================
// SECTION: Provider Implementation
// ============================================================================

/// Quota source for JSON and YAML snapshot files.
pub struct JsonQuotaSource {
    /// Source configuration, including limits and root policy.
    config: JsonQuotaSourceConfig,
}

impl JsonQuotaSource {
    /// Creates a new JSON source with the given configuration.
    #[must_use]
    pub const fn new(config: JsonQuotaSourceConfig) -> Self {
        Self {
            config,
        }
    }

    /// Loads and validates the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaSourceError`] when the file is missing, escapes the root,
    /// exceeds the size limit, or does not parse.
    pub fn load(&self) -> Result<QuotaSnapshot, QuotaSourceError> {
        let resolved = resolve_path(&self.config)?;
        let content = read_file_limited(&resolved, self.config.max_bytes)?;
        if is_yaml(&resolved) {
            if !self.config.allow_yaml {
                return Err(QuotaSourceError::Source("yaml parsing is disabled".to_string()));
            }
            return QuotaSnapshot::from_yaml_slice(&content);
        }
        QuotaSnapshot::from_json_slice(&content)
    }
}

impl QuotaSource for JsonQuotaSource {
    fn service_quotas(&self, _ctx: &TenantContext) -> Result<Vec<ServiceQuota>, QuotaSourceError> {
        Ok(self.load()?.quotas)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the snapshot path against the configured root policy.
fn resolve_path(config: &JsonQuotaSourceConfig) -> Result<PathBuf, QuotaSourceError> {
    let candidate = config.path.clone();
    if let Some(root) = &config.root {
        let root = root
            .canonicalize()
            .map_err(|_| QuotaSourceError::Source("invalid snapshot root".to_string()))?;
        let joined = if candidate.is_absolute() { candidate } else { root.join(candidate) };
        let resolved = joined
            .canonicalize()
            .map_err(|_| QuotaSourceError::Source("unable to resolve snapshot file".to_string()))?;
        if !resolved.starts_with(&root) {
            return Err(QuotaSourceError::Source("snapshot path escapes root".to_string()));
        }
        return Ok(resolved);
    }
    candidate
        .canonicalize()
        .map_err(|_| QuotaSourceError::Source("unable to resolve snapshot file".to_string()))
}

/// Reads a file while enforcing a maximum byte limit.
fn read_file_limited(path: &Path, max_bytes: usize) -> Result<Vec<u8>, QuotaSourceError> {
    let file = File::open(path)
        .map_err(|_| QuotaSourceError::Source("unable to open snapshot file".to_string()))?;
    let mut buf = Vec::new();
    let limit = max_bytes.saturating_add(1);
    let limit = u64::try_from(limit)
        .map_err(|_| QuotaSourceError::Source("snapshot size limit exceeds u64".to_string()))?;
    let mut handle = file.take(limit);
    handle
        .read_to_end(&mut buf)
        .map_err(|_| QuotaSourceError::Source("unable to read snapshot file".to_string()))?;
    if buf.len() > max_bytes {
        return Err(QuotaSourceError::Source("snapshot file exceeds size limit".to_string()));
    }
    Ok(buf)
}

/// Returns true when the path has a YAML extension.
fn is_yaml(path: &Path) -> bool {
    let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    let ext = ext.to_ascii_lowercase();
    ext == "yaml" || ext == "yml"
}
