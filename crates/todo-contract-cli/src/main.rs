// crates/todo-contract-cli/src/main.rs
// ============================================================================
// Module: Todo Contract CLI Entry Point
// Description: Command dispatcher for contract runs and offline checks.
// Purpose: Run the scenario catalog against a live service and expose the
//          validation and negotiation rules offline.
// Dependencies: clap, thiserror, todo-contract-core, todo-contract-config,
//               todo-contract-http
// ============================================================================

//! ## Overview
//! `todo-contract run` acquires a session, runs the selected scenarios, and
//! prints a report. Exit status is 0 when every scenario passed, 1 when any
//! failed, and 2 when the run could not start (configuration, executor setup,
//! or session errors). The offline commands evaluate payloads and `Accept`
//! headers with the same rules the scenarios use.

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
use clap::ValueEnum;
use thiserror::Error;
use todo_contract_cli::log::open_sink;
use todo_contract_cli::report::render_json;
use todo_contract_cli::report::render_text;
use todo_contract_cli::t;
use todo_contract_config::TodoContractConfig;
use todo_contract_core::MutationKind;
use todo_contract_core::MutationTarget;
use todo_contract_core::Negotiation;
use todo_contract_core::ScenarioId;
use todo_contract_core::ScenarioRunner;
use todo_contract_core::TodoId;
use todo_contract_core::ValidationResult;
use todo_contract_core::negotiate;
use todo_contract_core::validate_mutation;
use todo_contract_http::HttpExecutor;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a payload file read by `validate`.
const MAX_PAYLOAD_FILE_BYTES: usize = 1024 * 1024;
/// Exit status when at least one scenario failed.
const EXIT_SCENARIOS_FAILED: u8 = 1;
/// Exit status when the run could not start.
const EXIT_SETUP_FAILED: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "todo-contract", disable_help_subcommand = true, disable_version_flag = true)]
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
    /// Run contract scenarios against a live service.
    Run(RunCommand),
    /// Scenario catalog utilities.
    Scenarios {
        /// Selected scenarios subcommand.
        #[command(subcommand)]
        command: ScenariosCommand,
    },
    /// Evaluate a mutation payload offline.
    Validate(ValidateCommand),
    /// Print the representation selected for an Accept header.
    Negotiate(NegotiateCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for a contract run.
#[derive(Args, Debug)]
struct RunCommand {
    /// Optional config file path (defaults to todo-contract.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Base URL of the service under test (overrides config and environment).
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Scenario to run; repeat to run several (replaces `run.scenarios`).
    #[arg(long = "scenario", value_name = "NAME")]
    scenarios: Vec<ScenarioId>,
    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

/// Report output formats.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum ReportFormat {
    /// One line per scenario plus a summary.
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// Scenario catalog subcommands.
#[derive(Subcommand, Debug)]
enum ScenariosCommand {
    /// List every scenario name and title in run order.
    List,
}

/// Arguments for offline payload validation.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Mutation kind to evaluate.
    #[arg(long, value_enum)]
    kind: MutationKindArg,
    /// Id of the addressed todo (replace and partial-update).
    #[arg(long, value_name = "N")]
    target_id: Option<u64>,
    /// Treat the addressed todo as nonexistent.
    #[arg(long, action = ArgAction::SetTrue)]
    missing: bool,
    /// Path to the JSON payload file.
    #[arg(value_name = "PATH")]
    path: PathBuf,
}

/// Mutation kinds accepted on the command line.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum MutationKindArg {
    /// `POST /todos`.
    Create,
    /// `PUT /todos/{id}`.
    Replace,
    /// `POST /todos/{id}`.
    PartialUpdate,
}

impl From<MutationKindArg> for MutationKind {
    fn from(value: MutationKindArg) -> Self {
        match value {
            MutationKindArg::Create => Self::Create,
            MutationKindArg::Replace => Self::Replace,
            MutationKindArg::PartialUpdate => Self::PartialUpdate,
        }
    }
}

/// Arguments for offline negotiation.
#[derive(Args, Debug)]
struct NegotiateCommand {
    /// Raw Accept header value.
    #[arg(value_name = "ACCEPT")]
    accept: String,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a config file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to todo-contract.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
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
        Commands::Run(command) => command_run(command),
        Commands::Scenarios {
            command: ScenariosCommand::List,
        } => command_scenarios_list(),
        Commands::Validate(command) => command_validate(&command),
        Commands::Negotiate(command) => command_negotiate(&command),
        Commands::Config {
            command: ConfigCommand::Validate(command),
        } => command_config_validate(&command),
    }
}

/// Prints the top-level help text.
fn show_help() -> CliResult<()> {
    let help = Cli::command().render_help().to_string();
    write_stdout_bytes(help.as_bytes()).map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command.
fn command_run(command: RunCommand) -> CliResult<ExitCode> {
    let mut config = TodoContractConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    if let Some(base_url) = command.base_url {
        config.target.base_url = Some(base_url);
    }
    if !command.scenarios.is_empty() {
        config.run.scenarios = command.scenarios;
    }
    config.validate().map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;

    let executor_config = config
        .executor_config()
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let executor = HttpExecutor::new(executor_config)
        .map_err(|err| CliError::new(t!("run.executor_failed", error = err)))?;
    let sink = open_sink(&config.log).map_err(|err| {
        CliError::new(t!(
            "run.log_open_failed",
            path = config.log.path.as_deref().unwrap_or_default(),
            error = err
        ))
    })?;

    let runner = ScenarioRunner::start(&executor, config.runner_config(), sink.as_ref())
        .map_err(|err| CliError::new(t!("run.session_failed", error = err)))?;
    let report = runner.run(&config.scenario_plan());

    let rendered = match command.format {
        ReportFormat::Text => render_text(&report),
        ReportFormat::Json => {
            let mut json = render_json(&report)
                .map_err(|err| CliError::new(t!("run.json_failed", error = err)))?;
            json.push('\n');
            json
        }
    };
    write_stdout_bytes(rendered.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    if report.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_SCENARIOS_FAILED))
    }
}

// ============================================================================
// SECTION: Offline Commands
// ============================================================================

/// Prints every scenario name and title in catalog order.
fn command_scenarios_list() -> CliResult<ExitCode> {
    let mut output = String::new();
    for scenario in ScenarioId::ALL {
        output.push_str(&t!("scenarios.entry", scenario = scenario, title = scenario.title()));
        output.push('\n');
    }
    write_stdout_bytes(output.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Evaluates a payload file with the validation engine.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let kind = MutationKind::from(command.kind);
    let target = mutation_target(kind, command.target_id, command.missing)?;
    let body = read_bytes_with_limit(&command.path, MAX_PAYLOAD_FILE_BYTES).map_err(|err| {
        CliError::new(match err {
            ReadLimitError::Io(err) => {
                t!("input.read_failed", kind = "payload", path = command.path.display(), error = err)
            }
            ReadLimitError::TooLarge {
                size,
                limit,
            } => t!(
                "input.read_too_large",
                kind = "payload",
                path = command.path.display(),
                size = size,
                limit = limit
            ),
        })
    })?;

    let result = validate_mutation(kind, target, &body);
    let status = result.expected_status(kind);
    let mut output = String::new();
    match &result {
        ValidationResult::Accepted {
            ..
        } => output.push_str(&t!("validate.accepted", status = status)),
        ValidationResult::Rejected {
            rejection,
        } => {
            output.push_str(&t!("validate.rejected", status = status, kind = rejection.kind.as_str()));
            for message in &rejection.messages {
                output.push('\n');
                output.push_str(&t!("validate.message", message = message));
            }
        }
    }
    output.push('\n');
    write_stdout_bytes(output.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    if result.is_accepted() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_SCENARIOS_FAILED))
    }
}

/// Resolves the mutation target from the command-line flags.
fn mutation_target(
    kind: MutationKind,
    target_id: Option<u64>,
    missing: bool,
) -> CliResult<MutationTarget> {
    match (kind, target_id) {
        (MutationKind::Create, None) if !missing => Ok(MutationTarget::Collection),
        (MutationKind::Create, _) => Err(CliError::new(t!("validate.target_unused"))),
        (_, None) => Err(CliError::new(t!("validate.target_required", kind = kind.as_str()))),
        (_, Some(id)) if missing => Ok(MutationTarget::Missing(TodoId::new(id))),
        (_, Some(id)) => Ok(MutationTarget::Existing(TodoId::new(id))),
    }
}

/// Prints the negotiation outcome for an Accept header.
fn command_negotiate(command: &NegotiateCommand) -> CliResult<ExitCode> {
    let negotiation = negotiate(Some(&command.accept));
    let status = negotiation.status();
    let line = match &negotiation {
        Negotiation::Selected {
            representation,
        } => t!("negotiate.selected", content_type = representation.content_type(), status = status),
        Negotiation::NotAcceptable {
            ..
        } => t!("negotiate.not_acceptable", status = status),
    };
    write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = TodoContractConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
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

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
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

/// Emits an error message to stderr and returns the setup failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(EXIT_SETUP_FAILED)
}
