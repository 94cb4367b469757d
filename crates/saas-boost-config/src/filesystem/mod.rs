// crates/saas-boost-config/src/filesystem/mod.rs
// ============================================================================
// Module: Filesystem Tier Configuration
// Description: Immutable per-tier managed file storage settings.
// Purpose: Model the filesystem tier family as a closed sum type.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A tenant tier selects one managed file storage flavor. Each flavor is an
//! immutable value built through its own builder; `build()` is the only place
//! validation happens. [`FilesystemTierConfig`] closes the family so that
//! equality across flavors is decided by the variant first, then by fields.
//!
//! JSON uses camelCase keys matching the builder setters. The polymorphic
//! form carries a `type` discriminator (`FSX_WINDOWS`, `FSX_ONTAP`, `EFS`);
//! concrete types decode from the same object without it. Unknown keys are
//! rejected everywhere.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod catalog;
mod efs;
mod fsx_ontap;
mod fsx_windows;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

pub use self::catalog::TierCatalog;
pub use self::catalog::TierCatalogError;
pub use self::efs::EfsFilesystemTierConfig;
pub use self::efs::EfsFilesystemTierConfigBuilder;
pub use self::efs::EfsLifecycle;
pub use self::fsx_ontap::FsxOntapFilesystemTierConfig;
pub use self::fsx_ontap::FsxOntapFilesystemTierConfigBuilder;
pub use self::fsx_windows::FsxWindowsFilesystemTierConfig;
pub use self::fsx_windows::FsxWindowsFilesystemTierConfigBuilder;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Backup retention applied when none is given.
pub const DEFAULT_BACKUP_RETENTION_DAYS: u32 = 7;
/// Upper bound for automatic backup retention.
pub const MAX_BACKUP_RETENTION_DAYS: u32 = 90;
/// Daily backup window start applied when none is given (`HH:MM`, UTC).
pub const DEFAULT_DAILY_BACKUP_TIME: &str = "02:00";
/// Weekly maintenance window start applied when none is given (`D:HH:MM`, UTC).
pub const DEFAULT_WEEKLY_MAINTENANCE_TIME: &str = "7:01:00";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building or decoding a tier configuration.
///
/// Field names are reported with their JSON spelling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierConfigError {
    /// A required field was never set.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// A numeric field is outside its allowed range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: u64,
        /// Inclusive lower bound.
        min: u64,
        /// Inclusive upper bound.
        max: u64,
    },
    /// A field value is malformed or not in its allowed set.
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        /// Field name.
        field: &'static str,
        /// What is wrong with the value.
        reason: String,
    },
    /// The JSON document could not be decoded.
    #[error("invalid tier config json: {0}")]
    Parse(String),
}

// ============================================================================
// SECTION: Tier Family
// ============================================================================

/// Variant label of a [`FilesystemTierConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilesystemTierKind {
    /// Amazon FSx for Windows File Server.
    FsxWindows,
    /// Amazon FSx for NetApp ONTAP.
    FsxOntap,
    /// Amazon EFS.
    Efs,
}

impl FilesystemTierKind {
    /// Returns the discriminator used in JSON documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FsxWindows => "FSX_WINDOWS",
            Self::FsxOntap => "FSX_ONTAP",
            Self::Efs => "EFS",
        }
    }
}

impl fmt::Display for FilesystemTierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filesystem configuration for one tenant tier.
///
/// Two values are equal only when they are the same variant with equal
/// fields; the hash agrees with equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FilesystemTierConfig {
    /// Amazon FSx for Windows File Server.
    #[serde(rename = "FSX_WINDOWS")]
    FsxWindows(FsxWindowsFilesystemTierConfig),
    /// Amazon FSx for NetApp ONTAP.
    #[serde(rename = "FSX_ONTAP")]
    FsxOntap(FsxOntapFilesystemTierConfig),
    /// Amazon EFS.
    #[serde(rename = "EFS")]
    Efs(EfsFilesystemTierConfig),
}

impl FilesystemTierConfig {
    /// Decodes a tagged tier document.
    ///
    /// # Errors
    ///
    /// Returns [`TierConfigError::Parse`] when the document is malformed, has
    /// an unknown `type` or key, or fails builder validation.
    pub fn from_json(json: &str) -> Result<Self, TierConfigError> {
        serde_json::from_str(json).map_err(|err| TierConfigError::Parse(err.to_string()))
    }

    /// Encodes the tier as a tagged JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`TierConfigError::Parse`] when serialization fails.
    pub fn to_json(&self) -> Result<String, TierConfigError> {
        serde_json::to_string(self).map_err(|err| TierConfigError::Parse(err.to_string()))
    }

    /// Returns the variant label.
    #[must_use]
    pub const fn kind(&self) -> FilesystemTierKind {
        match self {
            Self::FsxWindows(_) => FilesystemTierKind::FsxWindows,
            Self::FsxOntap(_) => FilesystemTierKind::FsxOntap,
            Self::Efs(_) => FilesystemTierKind::Efs,
        }
    }

    /// Returns the shared FSx settings, or `None` for EFS.
    #[must_use]
    pub const fn fsx_settings(&self) -> Option<&FsxTierSettings> {
        match self {
            Self::FsxWindows(config) => Some(config.settings()),
            Self::FsxOntap(config) => Some(config.settings()),
            Self::Efs(_) => None,
        }
    }
}

impl From<FsxWindowsFilesystemTierConfig> for FilesystemTierConfig {
    fn from(config: FsxWindowsFilesystemTierConfig) -> Self {
        Self::FsxWindows(config)
    }
}

impl From<FsxOntapFilesystemTierConfig> for FilesystemTierConfig {
    fn from(config: FsxOntapFilesystemTierConfig) -> Self {
        Self::FsxOntap(config)
    }
}

impl From<EfsFilesystemTierConfig> for FilesystemTierConfig {
    fn from(config: EfsFilesystemTierConfig) -> Self {
        Self::Efs(config)
    }
}

// ============================================================================
// SECTION: Shared FSx Settings
// ============================================================================

/// Settings shared by every FSx flavor.
///
/// # Invariants
/// - `backup_retention_days` is at most 90.
/// - `daily_backup_time` is `HH:MM`; `weekly_maintenance_time` is `D:HH:MM`
///   with `D` in 1..=7.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FsxTierSettings {
    /// Provisioned storage in GiB.
    storage_gb: u32,
    /// Provisioned throughput in MB/s.
    throughput_mbs: u32,
    /// Days automatic backups are kept; zero disables them.
    backup_retention_days: u32,
    /// Daily backup window start.
    daily_backup_time: String,
    /// Weekly maintenance window start.
    weekly_maintenance_time: String,
}

impl FsxTierSettings {
    /// Returns the provisioned storage in GiB.
    #[must_use]
    pub const fn storage_gb(&self) -> u32 {
        self.storage_gb
    }

    /// Returns the provisioned throughput in MB/s.
    #[must_use]
    pub const fn throughput_mbs(&self) -> u32 {
        self.throughput_mbs
    }

    /// Returns the automatic backup retention in days.
    #[must_use]
    pub const fn backup_retention_days(&self) -> u32 {
        self.backup_retention_days
    }

    /// Returns the daily backup window start (`HH:MM`).
    #[must_use]
    pub fn daily_backup_time(&self) -> &str {
        &self.daily_backup_time
    }

    /// Returns the weekly maintenance window start (`D:HH:MM`).
    #[must_use]
    pub fn weekly_maintenance_time(&self) -> &str {
        &self.weekly_maintenance_time
    }

    /// Checks presence and the flavor-independent rules, applying defaults.
    pub(crate) fn resolve(
        storage_gb: Option<u32>,
        throughput_mbs: Option<u32>,
        backup_retention_days: Option<u32>,
        daily_backup_time: Option<String>,
        weekly_maintenance_time: Option<String>,
    ) -> Result<Self, TierConfigError> {
        let storage_gb = storage_gb.ok_or(TierConfigError::MissingField("storageGb"))?;
        let throughput_mbs = throughput_mbs.ok_or(TierConfigError::MissingField("throughputMbs"))?;
        let backup_retention_days = backup_retention_days.unwrap_or(DEFAULT_BACKUP_RETENTION_DAYS);
        check_range("backupRetentionDays", backup_retention_days, 0, MAX_BACKUP_RETENTION_DAYS)?;
        let daily_backup_time =
            daily_backup_time.unwrap_or_else(|| DEFAULT_DAILY_BACKUP_TIME.to_string());
        validate_daily_time(&daily_backup_time)?;
        let weekly_maintenance_time =
            weekly_maintenance_time.unwrap_or_else(|| DEFAULT_WEEKLY_MAINTENANCE_TIME.to_string());
        validate_weekly_time(&weekly_maintenance_time)?;
        Ok(Self {
            storage_gb,
            throughput_mbs,
            backup_retention_days,
            daily_backup_time,
            weekly_maintenance_time,
        })
    }
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Rejects `value` outside `min..=max`.
pub(crate) fn check_range(
    field: &'static str,
    value: u32,
    min: u32,
    max: u32,
) -> Result<(), TierConfigError> {
    if (min ..= max).contains(&value) {
        return Ok(());
    }
    Err(TierConfigError::OutOfRange {
        field,
        value: u64::from(value),
        min: u64::from(min),
        max: u64::from(max),
    })
}

/// Validates a `HH:MM` time of day.
fn validate_daily_time(value: &str) -> Result<(), TierConfigError> {
    let invalid = || TierConfigError::InvalidValue {
        field: "dailyBackupTime",
        reason: format!("expected HH:MM, got {value:?}"),
    };
    let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
    if !is_clock(hours, minutes) {
        return Err(invalid());
    }
    Ok(())
}

/// Validates a `D:HH:MM` weekly slot with `D` in 1..=7 (Monday is 1).
fn validate_weekly_time(value: &str) -> Result<(), TierConfigError> {
    let invalid = || TierConfigError::InvalidValue {
        field: "weeklyMaintenanceTime",
        reason: format!("expected D:HH:MM with D in 1..=7, got {value:?}"),
    };
    let (day, clock) = value.split_once(':').ok_or_else(invalid)?;
    let (hours, minutes) = clock.split_once(':').ok_or_else(invalid)?;
    let day_ok = day.len() == 1 && matches!(day.as_bytes().first(), Some(b'1' ..= b'7'));
    if !day_ok || !is_clock(hours, minutes) {
        return Err(invalid());
    }
    Ok(())
}

/// Returns true for two-digit hours 00..=23 and minutes 00..=59.
fn is_clock(hours: &str, minutes: &str) -> bool {
    two_digits(hours).is_some_and(|hours| hours <= 23)
        && two_digits(minutes).is_some_and(|minutes| minutes <= 59)
}

/// Parses exactly two ASCII digits.
fn two_digits(text: &str) -> Option<u8> {
    match text.as_bytes() {
        [tens @ b'0' ..= b'9', ones @ b'0' ..= b'9'] => Some((tens - b'0') * 10 + (ones - b'0')),
        _ => None,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions are permitted."
    )]

    use super::*;

    #[test]
    fn daily_time_accepts_only_hh_mm() {
        assert!(validate_daily_time("00:00").is_ok());
        assert!(validate_daily_time("23:59").is_ok());
        for bad in ["24:00", "2:00", "02:60", "0200", "02:00:00", "ab:cd", ""] {
            assert!(validate_daily_time(bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn weekly_time_requires_weekday_prefix() {
        assert!(validate_weekly_time("1:00:00").is_ok());
        assert!(validate_weekly_time("7:23:59").is_ok());
        for bad in ["0:01:00", "8:01:00", "17:01:00", "7:1:00", "7:01", "01:00"] {
            assert!(validate_weekly_time(bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn resolve_applies_defaults() {
        let settings = FsxTierSettings::resolve(Some(32), Some(8), None, None, None).unwrap();
        assert_eq!(settings.backup_retention_days(), DEFAULT_BACKUP_RETENTION_DAYS);
        assert_eq!(settings.daily_backup_time(), DEFAULT_DAILY_BACKUP_TIME);
        assert_eq!(settings.weekly_maintenance_time(), DEFAULT_WEEKLY_MAINTENANCE_TIME);
    }

    #[test]
    fn resolve_reports_first_missing_field() {
        assert_eq!(
            FsxTierSettings::resolve(None, None, None, None, None),
            Err(TierConfigError::MissingField("storageGb"))
        );
        assert_eq!(
            FsxTierSettings::resolve(Some(32), None, None, None, None),
            Err(TierConfigError::MissingField("throughputMbs"))
        );
    }

    #[test]
    fn kind_labels_match_discriminators() {
        assert_eq!(FilesystemTierKind::FsxWindows.to_string(), "FSX_WINDOWS");
        assert_eq!(
            serde_json::to_string(&FilesystemTierKind::FsxOntap).unwrap(),
            "\"FSX_ONTAP\""
        );
    }
}
