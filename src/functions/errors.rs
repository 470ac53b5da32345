//! # Function Errors

use thiserror::Error;

/// Result type for function operations
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Function errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FunctionError {
    #[error("unknown function {0}")]
    UnknownFunction(String),

    #[error("function already registered: {0}")]
    AlreadyRegistered(String),

    #[error("expected {expected} parameters in the function {function} but did not receive all")]
    MissingParameters { function: String, expected: usize },

    #[error("expected at most {expected} parameters in the function {function} but received {received}")]
    TooManyParameters {
        function: String,
        expected: usize,
        received: usize,
    },

    #[error("expected a {expected} value type but received {actual}")]
    IncorrectType { expected: String, actual: String },

    #[error("expected numeric type argument value")]
    NonNumeric,

    #[error("expected a non zero denominator in divide operation")]
    DivisionByZero,

    #[error("{0}")]
    Range(String),

    #[error("[Function {function}], {source}")]
    InFunction {
        function: String,
        source: Box<FunctionError>,
    },
}

impl FunctionError {
    /// Type mismatch helper
    pub fn incorrect_type(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        FunctionError::IncorrectType {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Substring / index bound violation
    pub fn range(reason: impl Into<String>) -> Self {
        FunctionError::Range(reason.into())
    }

    /// Prefixes this error with the name of the function that raised it
    pub fn in_function(self, function: impl Into<String>) -> Self {
        FunctionError::InFunction {
            function: function.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping function-name prefixes
    pub fn root(&self) -> &FunctionError {
        match self {
            FunctionError::InFunction { source, .. } => source.root(),
            other => other,
        }
    }
}
