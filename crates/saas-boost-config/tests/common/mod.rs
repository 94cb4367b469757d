// crates/saas-boost-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for settings and tier configuration tests.
// Purpose: Reduce duplication across integration tests for saas-boost-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use saas_boost_config::ConfigError;
use saas_boost_config::FsxOntapFilesystemTierConfig;
use saas_boost_config::FsxOntapFilesystemTierConfigBuilder;
use saas_boost_config::FsxWindowsFilesystemTierConfig;
use saas_boost_config::FsxWindowsFilesystemTierConfigBuilder;
use saas_boost_config::SaasBoostConfig;

/// Result type for tests that report failures as strings.
pub type TestResult = Result<(), String>;

/// Parses a TOML string into a `SaasBoostConfig` without validating it.
pub fn config_from_toml(toml_str: &str) -> Result<SaasBoostConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<SaasBoostConfig, toml::de::Error> {
    config_from_toml("")
}

/// Asserts that a result is an error whose message contains `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

/// Returns a Windows builder with the smallest valid capacity.
pub fn windows_builder() -> FsxWindowsFilesystemTierConfigBuilder {
    FsxWindowsFilesystemTierConfig::builder().storage_gb(32).throughput_mbs(8)
}

/// Returns an ONTAP builder with the smallest valid capacity.
pub fn ontap_builder() -> FsxOntapFilesystemTierConfigBuilder {
    FsxOntapFilesystemTierConfig::builder().storage_gb(1024).throughput_mbs(128).volume_size(20)
}
