//! CLI command implementations

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::context::QueryContext;
use crate::executor::Options;
use crate::functions::TAG_WHERE;
use crate::observability::{Logger, Severity};

use super::args::{Command, ExecuteArgs, OutputFormat};
use super::errors::{CliError, CliResult};
use super::io::{write_functions, write_rows};

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Traversal defaults
    #[serde(default)]
    pub options: Options,

    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Default minimum log severity
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.severity().map(|_| ())
    }

    /// Configured log severity, if any
    pub fn severity(&self) -> CliResult<Option<Severity>> {
        self.log_level
            .as_deref()
            .map(|level| level.parse::<Severity>().map_err(CliError::config_error))
            .transpose()
    }
}

/// Run the CLI
pub fn run() -> CliResult<()> {
    Logger::init_from_env();
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cmd {
        Command::Execute(args) => execute(&args, &mut out),
        Command::WhereFunctions { sorted } => where_functions(sorted, &mut out),
    }
}

/// Runs one query and writes its rows.
///
/// Flags override the configuration file.
pub fn execute<W: Write>(args: &ExecuteArgs, out: &mut W) -> CliResult<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(severity) = args.log_level.or(config.severity()?) {
        Logger::set_min_severity(severity);
    }

    let mut options = config.options.clone();
    if args.no_nested {
        options = options.disable_nested_traversal();
    }
    options = options.ignore_directories(args.skip.iter().cloned());

    let format = args.format.unwrap_or(config.format);
    let context = QueryContext::new();
    let rows = crate::execute_query(&args.query, &context, &options)?;

    write_rows(out, &rows, format)
}

/// Lists where-clause functions with their aliases
pub fn where_functions<W: Write>(sorted: bool, out: &mut W) -> CliResult<()> {
    let context = QueryContext::new();
    let functions = context
        .functions()
        .functions_with_aliases_having_tag(TAG_WHERE, sorted);
    write_functions(out, &functions)
}
