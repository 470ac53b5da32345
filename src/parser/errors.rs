//! Parser error types
//!
//! Error codes:
//! - FSQ_QUERY_SYNTAX
//! - FSQ_SOURCE_INACCESSIBLE
//! - FSQ_UNKNOWN_FUNCTION

use std::fmt;

/// Parser-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErrorCode {
    /// Malformed query structure
    FsqQuerySyntax,
    /// Source path missing or not a directory
    FsqSourceInaccessible,
    /// Call to a function that is not registered
    FsqUnknownFunction,
}

impl ParserErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ParserErrorCode::FsqQuerySyntax => "FSQ_QUERY_SYNTAX",
            ParserErrorCode::FsqSourceInaccessible => "FSQ_SOURCE_INACCESSIBLE",
            ParserErrorCode::FsqUnknownFunction => "FSQ_UNKNOWN_FUNCTION",
        }
    }
}

impl fmt::Display for ParserErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Parser error type with full context
#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    /// Error code
    code: ParserErrorCode,
    /// Human-readable message
    message: String,
}

impl ParserError {
    /// Create a syntax error
    pub fn syntax(reason: impl Into<String>) -> Self {
        Self {
            code: ParserErrorCode::FsqQuerySyntax,
            message: reason.into(),
        }
    }

    /// Create an inaccessible source error
    pub fn inaccessible_source(path: impl Into<String>) -> Self {
        Self {
            code: ParserErrorCode::FsqSourceInaccessible,
            message: format!(
                "expected directory path {} to exist and be accessible",
                path.into()
            ),
        }
    }

    /// Create an unknown function error
    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self {
            code: ParserErrorCode::FsqUnknownFunction,
            message: format!("unknown function {}", name.into()),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ParserErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for ParserError {}

/// Result type for parser operations
pub type ParserResult<T> = Result<T, ParserError>;
