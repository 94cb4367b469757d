// crates/saas-boost-config/src/filesystem/catalog.rs
// ============================================================================
// Module: Tier Catalog
// Description: Named set of filesystem tier configurations.
// Purpose: Load and validate the tier → filesystem mapping from JSON.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A catalog document looks like `{"tiers": {"default": {...}, "premium":
//! {...}}}` where each entry is a tagged [`FilesystemTierConfig`]. Catalog
//! files are untrusted input: they are size limited and tier names are
//! restricted to a small identifier alphabet.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::FilesystemTierConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum catalog file size in bytes.
pub const MAX_CATALOG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum tier name length.
pub const MAX_TIER_NAME_LENGTH: usize = 64;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading a tier catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierCatalogError {
    /// I/O failure while reading the catalog.
    #[error("tier catalog io error: {0}")]
    Io(String),
    /// JSON decoding or tier validation failed.
    #[error("tier catalog parse error: {0}")]
    Parse(String),
    /// Catalog content violates a limit.
    #[error("invalid tier catalog: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Tier name to filesystem configuration mapping.
///
/// Deserialization goes through [`TierCatalog::new`], so a decoded catalog
/// always has valid tier names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TierCatalogDocument")]
pub struct TierCatalog {
    /// Tier configurations keyed by tier name.
    tiers: BTreeMap<String, FilesystemTierConfig>,
}

/// Wire shape of a catalog document before tier names are checked.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TierCatalogDocument {
    /// Tier configurations keyed by tier name.
    tiers: BTreeMap<String, FilesystemTierConfig>,
}

impl TryFrom<TierCatalogDocument> for TierCatalog {
    type Error = TierCatalogError;

    fn try_from(document: TierCatalogDocument) -> Result<Self, Self::Error> {
        Self::new(document.tiers)
    }
}

impl TierCatalog {
    /// Builds a catalog after checking every tier name.
    ///
    /// # Errors
    ///
    /// Returns [`TierCatalogError::Invalid`] naming the first bad tier.
    pub fn new(tiers: BTreeMap<String, FilesystemTierConfig>) -> Result<Self, TierCatalogError> {
        let catalog = Self { tiers };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Decodes and validates a catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`TierCatalogError`] when decoding fails or a tier name is
    /// invalid.
    pub fn from_json(json: &str) -> Result<Self, TierCatalogError> {
        let document: TierCatalogDocument =
            serde_json::from_str(json).map_err(|err| TierCatalogError::Parse(err.to_string()))?;
        Self::new(document.tiers)
    }

    /// Loads a catalog file with a size limit.
    ///
    /// # Errors
    ///
    /// Returns [`TierCatalogError`] when the file cannot be read, exceeds
    /// [`MAX_CATALOG_FILE_SIZE`], is not UTF-8, or fails decoding.
    pub fn load(path: &Path) -> Result<Self, TierCatalogError> {
        let file = File::open(path).map_err(|err| TierCatalogError::Io(err.to_string()))?;
        let mut bytes = Vec::new();
        let limit = u64::try_from(MAX_CATALOG_FILE_SIZE)
            .map_err(|_| TierCatalogError::Invalid("catalog size limit exceeds u64".to_string()))?;
        file.take(limit.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(|err| TierCatalogError::Io(err.to_string()))?;
        if bytes.len() > MAX_CATALOG_FILE_SIZE {
            return Err(TierCatalogError::Invalid("catalog file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| TierCatalogError::Invalid("catalog file must be utf-8".to_string()))?;
        Self::from_json(content)
    }

    /// Checks every tier name.
    ///
    /// # Errors
    ///
    /// Returns [`TierCatalogError::Invalid`] naming the first bad tier.
    fn validate(&self) -> Result<(), TierCatalogError> {
        for name in self.tiers.keys() {
            validate_tier_name(name)?;
        }
        Ok(())
    }

    /// Returns every tier keyed by name.
    #[must_use]
    pub const fn tiers(&self) -> &BTreeMap<String, FilesystemTierConfig> {
        &self.tiers
    }

    /// Returns the configuration for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FilesystemTierConfig> {
        self.tiers.get(name)
    }

    /// Returns the tier names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.tiers.keys().map(String::as_str).collect()
    }

    /// Returns the number of tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Returns true when the catalog has no tiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// Validates a tier name against length and alphabet rules.
fn validate_tier_name(name: &str) -> Result<(), TierCatalogError> {
    if name.is_empty() {
        return Err(TierCatalogError::Invalid("tier name must be non-empty".to_string()));
    }
    if name.len() > MAX_TIER_NAME_LENGTH {
        return Err(TierCatalogError::Invalid(format!("tier name too long: {name}")));
    }
    if !name.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-') {
        return Err(TierCatalogError::Invalid(format!(
            "tier name must use [A-Za-z0-9_-]: {name}"
        )));
    }
    Ok(())
}
