//! Typed values produced by attributes, literals and functions
//!
//! Every value participates in a single total order (`compare_to`) that is
//! shared by equality checks in functions and by result ordering.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;

use super::errors::{FunctionError, FunctionResult};

/// A value flowing through expression evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text
    String(String),
    /// Signed integer
    Int(i64),
    /// Floating point
    Float(f64),
    /// Boolean
    Boolean(bool),
    /// Local timestamp (file times, `now()`)
    DateTime(NaiveDateTime),
    /// Missing or not applicable
    Empty,
}

impl Value {
    /// Creates a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Returns true for the empty value
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Returns the variant name, used in type errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::DateTime(_) => "datetime",
            Value::Empty => "empty",
        }
    }

    /// Coerces to a float.
    ///
    /// Strings are parsed (surrounding whitespace ignored). Booleans,
    /// timestamps and Empty are not numeric.
    pub fn as_float(&self) -> FunctionResult<f64> {
        match self {
            Value::Int(i) => Ok(*i as f64),
            Value::Float(f) => Ok(*f),
            Value::String(s) => s.trim().parse::<f64>().map_err(|_| FunctionError::NonNumeric),
            _ => Err(FunctionError::NonNumeric),
        }
    }

    /// Returns the boolean payload, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the timestamp payload, if this is a timestamp
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(t) => Some(*t),
            _ => None,
        }
    }

    /// Renders the value as text, the way string functions see it
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Empty => 0,
            Value::Boolean(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::DateTime(_) => 3,
            Value::String(_) => 4,
        }
    }

    /// Total order across all variants.
    ///
    /// Empty < Boolean < numbers < DateTime < String. Int and Float compare
    /// numerically with each other.
    pub fn compare_to(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)),
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Empty, Value::Empty) => Ordering::Equal,
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::DateTime(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
            Value::Empty => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
