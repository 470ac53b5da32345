//! CLI module for fsquery
//!
//! Provides command-line interface for:
//! - execute: run one query and print its rows
//! - where-functions: list functions usable in a where clause

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ExecuteArgs, OutputFormat};
pub use commands::{execute, run, run_command, where_functions, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{json_keys, rows_to_json, rows_to_table, write_functions, write_rows};
