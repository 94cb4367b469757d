// crates/saas-boost-providers/src/lib.rs
// ============================================================================
// Module: SaaS Boost Providers
// Description: Built-in quota sources and registry utilities.
// Purpose: Feed the quota evaluator from config, local snapshots, or HTTP.
// Dependencies: saas-boost-core, serde, serde_json, serde_yaml, reqwest
// ============================================================================

//! ## Overview
//! This crate ships built-in quota sources (static, json, http) and a registry
//! that merges their output. Every source implements
//! [`saas_boost_core::QuotaSource`].
//! Invariants:
//! - Snapshot documents are validated before their quotas are returned.
//! - File and HTTP sources enforce size limits and fail closed on bad input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod http;
pub mod json;
pub mod registry;
pub mod snapshot;
pub mod static_source;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use http::HttpQuotaSource;
pub use http::HttpQuotaSourceConfig;
pub use json::JsonQuotaSource;
pub use json::JsonQuotaSourceConfig;
pub use registry::QuotaSourceRegistry;
pub use snapshot::QuotaSnapshot;
pub use static_source::StaticQuotaSource;
