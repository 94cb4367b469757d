// crates/saas-boost-config/src/filesystem/fsx_windows.rs
// ============================================================================
// Module: FSx for Windows Tier Configuration
// Description: Windows File Server tier settings and their builder.
// Purpose: Construct validated, immutable Windows FSx tier values.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Windows FSx accepts 32 GiB to 64 TiB of storage and throughput capacities
//! that are powers of two from 8 to 2048 MB/s.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use super::FsxTierSettings;
use super::TierConfigError;
use super::check_range;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Smallest storage capacity in GiB.
const MIN_STORAGE_GB: u32 = 32;
/// Largest storage capacity in GiB.
const MAX_STORAGE_GB: u32 = 65_536;
/// Smallest throughput capacity in MB/s.
const MIN_THROUGHPUT_MBS: u32 = 8;
/// Largest throughput capacity in MB/s.
const MAX_THROUGHPUT_MBS: u32 = 2_048;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Tier settings for Amazon FSx for Windows File Server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "FsxWindowsFilesystemTierConfigBuilder",
    into = "FsxWindowsFilesystemTierConfigBuilder"
)]
pub struct FsxWindowsFilesystemTierConfig {
    /// Shared FSx settings.
    settings: FsxTierSettings,
}

impl FsxWindowsFilesystemTierConfig {
    /// Returns a builder with no fields set.
    #[must_use]
    pub fn builder() -> FsxWindowsFilesystemTierConfigBuilder {
        FsxWindowsFilesystemTierConfigBuilder::default()
    }

    /// Returns the shared FSx settings.
    #[must_use]
    pub const fn settings(&self) -> &FsxTierSettings {
        &self.settings
    }

    /// Returns the provisioned storage in GiB.
    #[must_use]
    pub const fn storage_gb(&self) -> u32 {
        self.settings.storage_gb()
    }

    /// Returns the provisioned throughput in MB/s.
    #[must_use]
    pub const fn throughput_mbs(&self) -> u32 {
        self.settings.throughput_mbs()
    }

    /// Returns the automatic backup retention in days.
    #[must_use]
    pub const fn backup_retention_days(&self) -> u32 {
        self.settings.backup_retention_days()
    }

    /// Returns the daily backup window start.
    #[must_use]
    pub fn daily_backup_time(&self) -> &str {
        self.settings.daily_backup_time()
    }

    /// Returns the weekly maintenance window start.
    #[must_use]
    pub fn weekly_maintenance_time(&self) -> &str {
        self.settings.weekly_maintenance_time()
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for [`FsxWindowsFilesystemTierConfig`].
///
/// Setters may be called in any order and repeated; the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FsxWindowsFilesystemTierConfigBuilder {
    /// Provisioned storage in GiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    storage_gb: Option<u32>,
    /// Provisioned throughput in MB/s.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    throughput_mbs: Option<u32>,
    /// Automatic backup retention in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    backup_retention_days: Option<u32>,
    /// Daily backup window start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    daily_backup_time: Option<String>,
    /// Weekly maintenance window start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weekly_maintenance_time: Option<String>,
}

impl FsxWindowsFilesystemTierConfigBuilder {
    /// Sets the provisioned storage in GiB.
    #[must_use]
    pub const fn storage_gb(mut self, storage_gb: u32) -> Self {
        self.storage_gb = Some(storage_gb);
        self
    }

    /// Sets the provisioned throughput in MB/s.
    #[must_use]
    pub const fn throughput_mbs(mut self, throughput_mbs: u32) -> Self {
        self.throughput_mbs = Some(throughput_mbs);
        self
    }

    /// Sets the automatic backup retention in days.
    #[must_use]
    pub const fn backup_retention_days(mut self, days: u32) -> Self {
        self.backup_retention_days = Some(days);
        self
    }

    /// Sets the daily backup window start (`HH:MM`).
    #[must_use]
    pub fn daily_backup_time(mut self, time: impl Into<String>) -> Self {
        self.daily_backup_time = Some(time.into());
        self
    }

    /// Sets the weekly maintenance window start (`D:HH:MM`).
    #[must_use]
    pub fn weekly_maintenance_time(mut self, time: impl Into<String>) -> Self {
        self.weekly_maintenance_time = Some(time.into());
        self
    }

    /// Validates the fields and returns the immutable configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TierConfigError`] when a required field is missing or any
    /// field violates its constraint.
    pub fn build(self) -> Result<FsxWindowsFilesystemTierConfig, TierConfigError> {
        let settings = FsxTierSettings::resolve(
            self.storage_gb,
            self.throughput_mbs,
            self.backup_retention_days,
            self.daily_backup_time,
            self.weekly_maintenance_time,
        )?;
        check_range("storageGb", settings.storage_gb(), MIN_STORAGE_GB, MAX_STORAGE_GB)?;
        let throughput = settings.throughput_mbs();
        check_range("throughputMbs", throughput, MIN_THROUGHPUT_MBS, MAX_THROUGHPUT_MBS)?;
        if !throughput.is_power_of_two() {
            return Err(TierConfigError::InvalidValue {
                field: "throughputMbs",
                reason: format!("{throughput} is not a power of two"),
            });
        }
        Ok(FsxWindowsFilesystemTierConfig {
            settings,
        })
    }
}

impl TryFrom<FsxWindowsFilesystemTierConfigBuilder> for FsxWindowsFilesystemTierConfig {
    type Error = TierConfigError;

    fn try_from(builder: FsxWindowsFilesystemTierConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl From<FsxWindowsFilesystemTierConfig> for FsxWindowsFilesystemTierConfigBuilder {
    fn from(config: FsxWindowsFilesystemTierConfig) -> Self {
        let FsxTierSettings {
            storage_gb,
            throughput_mbs,
            backup_retention_days,
            daily_backup_time,
            weekly_maintenance_time,
        } = config.settings;
        Self {
            storage_gb: Some(storage_gb),
            throughput_mbs: Some(throughput_mbs),
            backup_retention_days: Some(backup_retention_days),
            daily_backup_time: Some(daily_backup_time),
            weekly_maintenance_time: Some(weekly_maintenance_time),
        }
    }
}
