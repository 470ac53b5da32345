//! Unified query error
//!
//! Every failure from parsing through execution, with a coarse kind for
//! callers that branch on the category of failure.

use thiserror::Error;

use crate::executor::{ExecutorError, ExecutorErrorCode};
use crate::functions::FunctionError;
use crate::parser::{ParserError, ParserErrorCode};

/// Failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed query, bad order by / limit value, inaccessible source
    Syntax,
    /// Call to a function that is not registered
    UnknownFunction,
    /// Wrong number of function arguments
    Arity,
    /// Argument not coercible to the required type
    Type,
    /// Division by zero
    Arithmetic,
    /// Substring bounds
    Range,
    /// Filesystem read failure during traversal
    Io,
}

/// Any error raised while running a query
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error(transparent)]
    Function(#[from] FunctionError),

    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

fn function_kind(err: &FunctionError) -> ErrorKind {
    match err.root() {
        FunctionError::UnknownFunction(_) => ErrorKind::UnknownFunction,
        FunctionError::MissingParameters { .. } | FunctionError::TooManyParameters { .. } => {
            ErrorKind::Arity
        }
        FunctionError::DivisionByZero => ErrorKind::Arithmetic,
        FunctionError::Range(_) => ErrorKind::Range,
        FunctionError::IncorrectType { .. }
        | FunctionError::NonNumeric
        | FunctionError::AlreadyRegistered(_)
        | FunctionError::InFunction { .. } => ErrorKind::Type,
    }
}

impl QueryError {
    /// Category of this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::Parser(err) => match err.code() {
                ParserErrorCode::FsqUnknownFunction => ErrorKind::UnknownFunction,
                ParserErrorCode::FsqQuerySyntax | ParserErrorCode::FsqSourceInaccessible => {
                    ErrorKind::Syntax
                }
            },
            QueryError::Function(err) => function_kind(err),
            QueryError::Executor(err) => match (err.code(), err.function_error()) {
                (ExecutorErrorCode::FsqEvaluationFailed, Some(function)) => function_kind(function),
                _ => ErrorKind::Io,
            },
        }
    }
}

/// Result type for end-to-end query operations
pub type QueryResult<T> = Result<T, QueryError>;
