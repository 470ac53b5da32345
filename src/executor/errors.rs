//! Executor error types
//!
//! Error codes:
//! - FSQ_IO_FAILED
//! - FSQ_EVALUATION_FAILED

use std::fmt;
use std::io;

use crate::functions::FunctionError;

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorErrorCode {
    /// Directory listing or metadata read failed
    FsqIoFailed,
    /// A filter or projection failed to evaluate
    FsqEvaluationFailed,
}

impl ExecutorErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorErrorCode::FsqIoFailed => "FSQ_IO_FAILED",
            ExecutorErrorCode::FsqEvaluationFailed => "FSQ_EVALUATION_FAILED",
        }
    }
}

impl fmt::Display for ExecutorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug)]
enum Cause {
    Io(io::Error),
    Function(FunctionError),
}

/// Executor error type with full context
#[derive(Debug)]
pub struct ExecutorError {
    /// Error code
    code: ExecutorErrorCode,
    /// Human-readable message
    message: String,
    /// Path being read, if applicable
    path: Option<String>,
    cause: Cause,
}

impl ExecutorError {
    /// Create an I/O failure for `path`
    pub fn io(path: impl Into<String>, err: io::Error) -> Self {
        let path = path.into();
        Self {
            code: ExecutorErrorCode::FsqIoFailed,
            message: format!("failed to read {}: {}", path, err),
            path: Some(path),
            cause: Cause::Io(err),
        }
    }

    /// Create an evaluation failure
    pub fn evaluation(err: FunctionError) -> Self {
        Self {
            code: ExecutorErrorCode::FsqEvaluationFailed,
            message: err.to_string(),
            path: None,
            cause: Cause::Function(err),
        }
    }

    /// Create an evaluation failure while processing `path`
    pub fn evaluation_at(path: impl Into<String>, err: FunctionError) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::evaluation(err)
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ExecutorErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the path being processed, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Underlying function error for evaluation failures
    pub fn function_error(&self) -> Option<&FunctionError> {
        match &self.cause {
            Cause::Function(err) => Some(err),
            Cause::Io(_) => None,
        }
    }

    /// Underlying I/O error for read failures
    pub fn io_error(&self) -> Option<&io::Error> {
        match &self.cause {
            Cause::Io(err) => Some(err),
            Cause::Function(_) => None,
        }
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for ExecutorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.cause {
            Cause::Io(err) => Some(err),
            Cause::Function(err) => Some(err),
        }
    }
}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;
