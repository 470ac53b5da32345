//! CLI argument definitions using clap
//!
//! Commands:
//! - fsquery execute -q <query> [--no-nested] [--skip <dir>]... [--format json|table]
//! - fsquery where-functions [--sorted]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::observability::Severity;

/// fsquery - SQL-like queries over the filesystem
#[derive(Parser, Debug)]
#[command(name = "fsquery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a query and print the result
    Execute(ExecuteArgs),

    /// List the functions usable in a where clause, with their aliases
    WhereFunctions {
        /// Sort functions and aliases by name
        #[arg(long)]
        sorted: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ExecuteArgs {
    /// Query text, e.g. "select name, size from . order by 2 desc limit 5"
    #[arg(short, long)]
    pub query: String,

    /// Do not descend into subdirectories
    #[arg(long)]
    pub no_nested: bool,

    /// Directory name to skip while descending; repeatable
    #[arg(long = "skip", value_name = "DIR")]
    pub skip: Vec<String>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum log severity written to stderr
    #[arg(long)]
    pub log_level: Option<Severity>,
}

/// How rows are written to stdout
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
