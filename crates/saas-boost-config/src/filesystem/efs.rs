// crates/saas-boost-config/src/filesystem/efs.rs
// ============================================================================
// Module: EFS Tier Configuration
// Description: Elastic File System tier settings and their builder.
// Purpose: Construct immutable EFS tier values.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! EFS scales on demand, so a tier only chooses encryption at rest and when
//! idle files move to infrequent-access storage. Every field has a default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use super::TierConfigError;

// ============================================================================
// SECTION: Lifecycle
// ============================================================================

/// Age after which idle files transition to infrequent-access storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EfsLifecycle {
    /// Files never transition.
    #[default]
    #[serde(rename = "NEVER")]
    Never,
    /// Transition after 7 days without access.
    #[serde(rename = "AFTER_7_DAYS")]
    After7Days,
    /// Transition after 14 days without access.
    #[serde(rename = "AFTER_14_DAYS")]
    After14Days,
    /// Transition after 30 days without access.
    #[serde(rename = "AFTER_30_DAYS")]
    After30Days,
    /// Transition after 60 days without access.
    #[serde(rename = "AFTER_60_DAYS")]
    After60Days,
    /// Transition after 90 days without access.
    #[serde(rename = "AFTER_90_DAYS")]
    After90Days,
}

impl EfsLifecycle {
    /// Returns the idle days before transition, or `None` for [`Self::Never`].
    #[must_use]
    pub const fn days(self) -> Option<u32> {
        match self {
            Self::Never => None,
            Self::After7Days => Some(7),
            Self::After14Days => Some(14),
            Self::After30Days => Some(30),
            Self::After60Days => Some(60),
            Self::After90Days => Some(90),
        }
    }
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Tier settings for Amazon EFS.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "EfsFilesystemTierConfigBuilder", into = "EfsFilesystemTierConfigBuilder")]
pub struct EfsFilesystemTierConfig {
    /// Whether the file system is encrypted at rest.
    encrypt_at_rest: bool,
    /// Infrequent-access transition policy.
    lifecycle: EfsLifecycle,
}

impl EfsFilesystemTierConfig {
    /// Returns a builder with no fields set.
    #[must_use]
    pub fn builder() -> EfsFilesystemTierConfigBuilder {
        EfsFilesystemTierConfigBuilder::default()
    }

    /// Returns whether the file system is encrypted at rest.
    #[must_use]
    pub const fn encrypt_at_rest(&self) -> bool {
        self.encrypt_at_rest
    }

    /// Returns the infrequent-access transition policy.
    #[must_use]
    pub const fn lifecycle(&self) -> EfsLifecycle {
        self.lifecycle
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for [`EfsFilesystemTierConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EfsFilesystemTierConfigBuilder {
    /// Whether the file system is encrypted at rest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    encrypt_at_rest: Option<bool>,
    /// Infrequent-access transition policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lifecycle: Option<EfsLifecycle>,
}

impl EfsFilesystemTierConfigBuilder {
    /// Sets whether the file system is encrypted at rest.
    #[must_use]
    pub const fn encrypt_at_rest(mut self, encrypt_at_rest: bool) -> Self {
        self.encrypt_at_rest = Some(encrypt_at_rest);
        self
    }

    /// Sets the infrequent-access transition policy.
    #[must_use]
    pub const fn lifecycle(mut self, lifecycle: EfsLifecycle) -> Self {
        self.lifecycle = Some(lifecycle);
        self
    }

    /// Applies defaults and returns the immutable configuration.
    ///
    /// # Errors
    ///
    /// Never fails today; the signature matches the other tier builders.
    pub fn build(self) -> Result<EfsFilesystemTierConfig, TierConfigError> {
        Ok(EfsFilesystemTierConfig {
            encrypt_at_rest: self.encrypt_at_rest.unwrap_or(true),
            lifecycle: self.lifecycle.unwrap_or_default(),
        })
    }
}

impl TryFrom<EfsFilesystemTierConfigBuilder> for EfsFilesystemTierConfig {
    type Error = TierConfigError;

    fn try_from(builder: EfsFilesystemTierConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl From<EfsFilesystemTierConfig> for EfsFilesystemTierConfigBuilder {
    fn from(config: EfsFilesystemTierConfig) -> Self {
        Self {
            encrypt_at_rest: Some(config.encrypt_at_rest),
            lifecycle: Some(config.lifecycle),
        }
    }
}
