// crates/saas-boost-config/src/filesystem/fsx_ontap.rs
// ============================================================================
// Module: FSx for ONTAP Tier Configuration
// Description: NetApp ONTAP tier settings and their builder.
// Purpose: Construct validated, immutable ONTAP FSx tier values.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! ONTAP file systems start at 1 TiB of SSD storage and offer a fixed set of
//! throughput capacities. Each tenant gets one volume carved out of the file
//! system, so the volume can never exceed the provisioned storage.

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
const MIN_STORAGE_GB: u32 = 1_024;
/// Largest storage capacity in GiB.
const MAX_STORAGE_GB: u32 = 196_608;
/// Throughput capacities offered, in MB/s.
const THROUGHPUT_OPTIONS_MBS: [u32; 6] = [128, 256, 512, 1_024, 2_048, 4_096];
/// Smallest tenant volume in GiB.
const MIN_VOLUME_SIZE_GB: u32 = 20;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Tier settings for Amazon FSx for NetApp ONTAP.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "FsxOntapFilesystemTierConfigBuilder",
    into = "FsxOntapFilesystemTierConfigBuilder"
)]
pub struct FsxOntapFilesystemTierConfig {
    /// Shared FSx settings.
    settings: FsxTierSettings,
    /// Tenant volume size in GiB.
    volume_size: u32,
}

impl FsxOntapFilesystemTierConfig {
    /// Returns a builder with no fields set.
    #[must_use]
    pub fn builder() -> FsxOntapFilesystemTierConfigBuilder {
        FsxOntapFilesystemTierConfigBuilder::default()
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

    /// Returns the tenant volume size in GiB.
    #[must_use]
    pub const fn volume_size(&self) -> u32 {
        self.volume_size
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for [`FsxOntapFilesystemTierConfig`].
///
/// Setters may be called in any order and repeated; the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FsxOntapFilesystemTierConfigBuilder {
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
    /// Tenant volume size in GiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    volume_size: Option<u32>,
}

impl FsxOntapFilesystemTierConfigBuilder {
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

    /// Sets the tenant volume size in GiB.
    #[must_use]
    pub const fn volume_size(mut self, volume_size: u32) -> Self {
        self.volume_size = Some(volume_size);
        self
    }

    /// Validates the fields and returns the immutable configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TierConfigError`] when a required field is missing or any
    /// field violates its constraint.
    pub fn build(self) -> Result<FsxOntapFilesystemTierConfig, TierConfigError> {
        let settings = FsxTierSettings::resolve(
            self.storage_gb,
            self.throughput_mbs,
            self.backup_retention_days,
            self.daily_backup_time,
            self.weekly_maintenance_time,
        )?;
        check_range("storageGb", settings.storage_gb(), MIN_STORAGE_GB, MAX_STORAGE_GB)?;
        let throughput = settings.throughput_mbs();
        if !THROUGHPUT_OPTIONS_MBS.contains(&throughput) {
            return Err(TierConfigError::InvalidValue {
                field: "throughputMbs",
                reason: format!(
                    "{throughput} is not one of {}",
                    THROUGHPUT_OPTIONS_MBS.map(|option| option.to_string()).join(", ")
                ),
            });
        }
        let volume_size = self.volume_size.ok_or(TierConfigError::MissingField("volumeSize"))?;
        check_range("volumeSize", volume_size, MIN_VOLUME_SIZE_GB, settings.storage_gb())?;
        Ok(FsxOntapFilesystemTierConfig {
            settings,
            volume_size,
        })
    }
}

impl TryFrom<FsxOntapFilesystemTierConfigBuilder> for FsxOntapFilesystemTierConfig {
    type Error = TierConfigError;

    fn try_from(builder: FsxOntapFilesystemTierConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl From<FsxOntapFilesystemTierConfig> for FsxOntapFilesystemTierConfigBuilder {
    fn from(config: FsxOntapFilesystemTierConfig) -> Self {
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
            volume_size: Some(config.volume_size),
        }
    }
}
