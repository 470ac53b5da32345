//! CLI failures
//!
//! Query failures keep the underlying error's own code and message; the
//! CLI only adds codes for configuration and output problems.

use std::fmt;
use std::io;

use crate::error::{ErrorKind, QueryError};

/// What went wrong at the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Unreadable or invalid `--config` file
    ConfigError,
    /// Writing to stdout failed
    IoError,
    /// Parse or execution failure of the query itself
    QueryFailed(ErrorKind),
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            CliErrorCode::ConfigError => "FSQ_CLI_CONFIG_ERROR",
            CliErrorCode::IoError => "FSQ_CLI_IO_ERROR",
            CliErrorCode::QueryFailed(_) => "FSQ_CLI_QUERY_FAILED",
        }
    }
}

/// Error returned by every CLI command
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, message)
    }

    pub fn io_error(message: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, message)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Failure category when the query itself failed
    pub fn query_kind(&self) -> Option<ErrorKind> {
        match self.code {
            CliErrorCode::QueryFailed(kind) => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query_kind().is_some() {
            // Already "<CODE>: <message>" from the query error.
            return f.write_str(&self.message);
        }
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::io_error(format!("failed to write output: {}", err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::io_error(format!("failed to render JSON output: {}", err))
    }
}

impl From<QueryError> for CliError {
    fn from(err: QueryError) -> Self {
        CliError::new(CliErrorCode::QueryFailed(err.kind()), err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParserError;

    #[test]
    fn test_query_error_keeps_kind_and_message() {
        let err = CliError::from(QueryError::from(ParserError::unknown_function("nope")));
        assert_eq!(err.code(), &CliErrorCode::QueryFailed(ErrorKind::UnknownFunction));
        assert_eq!(err.query_kind(), Some(ErrorKind::UnknownFunction));
        assert_eq!(err.to_string(), "FSQ_UNKNOWN_FUNCTION: unknown function nope");
    }

    #[test]
    fn test_config_error_display() {
        let err = CliError::config_error("missing file");
        assert_eq!(err.query_kind(), None);
        assert_eq!(err.to_string(), "FSQ_CLI_CONFIG_ERROR: missing file");
    }

    #[test]
    fn test_io_error_conversion() {
        let err = CliError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(err.code(), &CliErrorCode::IoError);
        assert!(err.message().contains("closed"));
    }
}
