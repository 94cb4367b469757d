// crates/saas-boost-cli/src/main.rs
// ============================================================================
// Module: SaaS Boost CLI Entry Point
// Description: Command dispatcher for quota checks and tier/config validation.
// Purpose: Provide a safe CLI over the quota evaluator and tier configs.
// Dependencies: clap, saas-boost-config, saas-boost-core, serde_json, thiserror.
// ============================================================================

//! ## Overview
//! The SaaS Boost CLI runs onboarding quota checks against the quota sources
//! declared in `saas-boost.toml`, and validates tier configuration documents
//! and settings files. All user-facing strings are routed through the message
//! catalog. File inputs are untrusted and read with hard size limits.
//!
//! Exit codes: `0` on success, `2` when a quota check ran but did not pass,
//! `1` on any error.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use saas_boost_cli::t;
use saas_boost_config::FilesystemTierConfig;
use saas_boost_config::SaasBoostConfig;
use saas_boost_config::TierCatalog;
use saas_boost_core::QuotaCheckHandler;
use saas_boost_core::QuotaCheckRequest;
use saas_boost_core::QuotaEvaluator;
use saas_boost_core::TenantId;
use saas_boost_core::decode_response;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a tier config or tier catalog input.
const MAX_TIER_INPUT_BYTES: usize = 1024 * 1024;
/// Exit code for a quota check that ran but did not pass.
const EXIT_NOT_PASSED: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "saas-boost", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Service quota checks.
    Quotas {
        /// Selected quotas subcommand.
        #[command(subcommand)]
        command: QuotasCommand,
    },
    /// Filesystem tier configuration utilities.
    Tier {
        /// Selected tier subcommand.
        #[command(subcommand)]
        command: TierCommand,
    },
    /// Settings file utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Quotas subcommands.
#[derive(Subcommand, Debug)]
enum QuotasCommand {
    /// Check whether onboarding fits inside the service quotas.
    Check(QuotasCheckCommand),
}

/// Tier subcommands.
#[derive(Subcommand, Debug)]
enum TierCommand {
    /// Validate a tier config document or a tier catalog.
    Validate(TierValidateCommand),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a SaaS Boost settings file.
    Validate(ConfigValidateCommand),
}

/// Arguments for the quota check.
#[derive(Args, Debug)]
struct QuotasCheckCommand {
    /// Optional config file path (defaults to saas-boost.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Tenant being onboarded.
    #[arg(long, value_name = "ID")]
    tenant_id: Option<String>,
    /// Number of tenants to make room for (overrides quotas.tenants_to_add).
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1 ..= 1000))]
    tenants: Option<u32>,
    /// Print the raw response body instead of a summary line.
    #[arg(long, action = ArgAction::SetTrue)]
    raw: bool,
}

/// Arguments for tier validation.
#[derive(Args, Debug)]
struct TierValidateCommand {
    /// Tier config or tier catalog JSON file (defaults to tiers.catalog).
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
    /// Config file naming the default catalog when --file is absent.
    #[arg(long, value_name = "PATH", conflicts_with = "file")]
    config: Option<PathBuf>,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to saas-boost.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog-rendered error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a rendered message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Quotas {
            command,
        } => command_quotas(command),
        Commands::Tier {
            command,
        } => command_tier(command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Quotas Commands
// ============================================================================

/// Dispatches quotas subcommands.
fn command_quotas(command: QuotasCommand) -> CliResult<ExitCode> {
    match command {
        QuotasCommand::Check(command) => command_quotas_check(&command),
    }
}

/// Executes the quota check command.
fn command_quotas_check(command: &QuotasCheckCommand) -> CliResult<ExitCode> {
    let config = SaasBoostConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let registry = config
        .quotas
        .build_registry()
        .map_err(|err| CliError::new(t!("quotas.sources_failed", error = err)))?;
    let audit = config
        .audit
        .build_sink()
        .map_err(|err| CliError::new(t!("quotas.audit_failed", error = err)))?;
    let handler = QuotaCheckHandler::new(QuotaEvaluator::with_audit(registry, audit));

    let request = build_request(
        command.tenant_id.as_deref(),
        command.tenants.unwrap_or(config.quotas.tenants_to_add),
    );
    let response = handler.check_quotas(&request);
    let result = decode_response(&response)
        .map_err(|err| CliError::new(t!("quotas.check.failed", error = err)))?;

    let line = if command.raw {
        response.body
    } else if result.passed {
        t!("quotas.check.passed", message = result.message)
    } else {
        t!("quotas.check.not_passed", message = result.message)
    };
    write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(if result.passed { ExitCode::SUCCESS } else { ExitCode::from(EXIT_NOT_PASSED) })
}

/// Builds the handler request for the CLI arguments.
fn build_request(tenant_id: Option<&str>, tenants_to_add: u32) -> QuotaCheckRequest {
    let request = QuotaCheckRequest::new().with_tenants_to_add(tenants_to_add);
    match tenant_id {
        Some(id) => request.with_tenant_id(&TenantId::new(id)),
        None => request,
    }
}

// ============================================================================
// SECTION: Tier Commands
// ============================================================================

/// Dispatches tier subcommands.
fn command_tier(command: TierCommand) -> CliResult<ExitCode> {
    match command {
        TierCommand::Validate(command) => command_tier_validate(&command),
    }
}

/// Executes the tier validation command.
///
/// Without `--file`, validates the catalog named by `tiers.catalog`.
fn command_tier_validate(command: &TierValidateCommand) -> CliResult<ExitCode> {
    let summary = if let Some(path) = command.file.as_deref() {
        let content = read_tier_input(path)?;
        validate_tier_document(&content).map_err(|error| {
            CliError::new(t!("tier.parse_failed", path = path.display(), error = error))
        })?
    } else {
        let config = SaasBoostConfig::load(command.config.as_deref())
            .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
        let catalog = load_configured_catalog(&config)?
            .ok_or_else(|| CliError::new(t!("tier.catalog.not_configured")))?;
        catalog_summary(&catalog)
    };
    write_stdout_line(&summary).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads the catalog named by `tiers.catalog`, if any.
fn load_configured_catalog(config: &SaasBoostConfig) -> CliResult<Option<TierCatalog>> {
    config
        .tiers
        .load_catalog()
        .map_err(|err| CliError::new(t!("tier.catalog.load_failed", error = err)))
}

/// Renders the success summary for a catalog.
fn catalog_summary(catalog: &TierCatalog) -> String {
    if catalog.is_empty() {
        return t!("tier.catalog.empty");
    }
    t!("tier.catalog.ok", count = catalog.len(), names = catalog.names().join(", "))
}

/// Validates a tier document and renders the success summary.
///
/// Documents with a top-level `tiers` key are catalogs; anything else is a
/// single tagged tier config.
fn validate_tier_document(content: &str) -> Result<String, String> {
    let is_catalog = matches!(
        serde_json::from_str::<Value>(content),
        Ok(Value::Object(map)) if map.contains_key("tiers")
    );
    if is_catalog {
        let catalog = TierCatalog::from_json(content).map_err(|err| err.to_string())?;
        return Ok(catalog_summary(&catalog));
    }
    let tier = FilesystemTierConfig::from_json(content).map_err(|err| err.to_string())?;
    Ok(t!("tier.validate.ok", kind = tier.kind()))
}

/// Reads a tier input file as UTF-8 with the tier size limit.
fn read_tier_input(path: &Path) -> CliResult<String> {
    let kind = t!("tier.kind.file");
    let bytes = read_bytes_with_limit(path, MAX_TIER_INPUT_BYTES).map_err(|err| match err {
        ReadLimitError::Io(error) => CliError::new(t!(
            "input.read_failed",
            kind = kind,
            path = path.display(),
            error = error
        )),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    String::from_utf8(bytes)
        .map_err(|_| CliError::new(t!("input.not_utf8", kind = kind, path = path.display())))
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
///
/// A configured tier catalog must also load.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = SaasBoostConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    load_configured_catalog(&config)?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let read_limit = limit.saturating_add(1);
    let mut limited = file.take(read_limit);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
