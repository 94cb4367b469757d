// crates/saas-boost-config/src/lib.rs
// ============================================================================
// Module: SaaS Boost Config Library
// Description: Settings file model, validation, and filesystem tier configs.
// Purpose: Single source of truth for saas-boost.toml and tier JSON semantics.
// Dependencies: saas-boost-core, saas-boost-providers, serde, toml
// ============================================================================

//! ## Overview
//! `saas-boost-config` owns two kinds of configuration:
//! - The `saas-boost.toml` settings file, loaded with strict size and path
//!   limits and validated fail-closed.
//! - The filesystem tier family ([`FilesystemTierConfig`]), immutable values
//!   built only through validating builders and decoded from JSON by field
//!   name.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod filesystem;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use filesystem::EfsFilesystemTierConfig;
pub use filesystem::EfsFilesystemTierConfigBuilder;
pub use filesystem::EfsLifecycle;
pub use filesystem::FilesystemTierConfig;
pub use filesystem::FilesystemTierKind;
pub use filesystem::FsxOntapFilesystemTierConfig;
pub use filesystem::FsxOntapFilesystemTierConfigBuilder;
pub use filesystem::FsxTierSettings;
pub use filesystem::FsxWindowsFilesystemTierConfig;
pub use filesystem::FsxWindowsFilesystemTierConfigBuilder;
pub use filesystem::TierCatalog;
pub use filesystem::TierCatalogError;
pub use filesystem::TierConfigError;
