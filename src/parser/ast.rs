//! Query AST structures
//!
//! Defines the parsed query representation consumed by the executor.

use std::fmt;

use super::source::Source;
use crate::functions::FunctionRegistry;

/// A node of a projection or filter expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal text, evaluated as a string value
    Literal(String),
    /// Reference to a file attribute by canonical name
    AttributeRef(String),
    /// Function call with ordered arguments
    FunctionCall { name: String, args: Vec<Expression> },
}

impl Expression {
    pub fn literal(text: impl Into<String>) -> Self {
        Expression::Literal(text.into())
    }

    pub fn attribute(name: impl Into<String>) -> Self {
        Expression::AttributeRef(name.into())
    }

    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            args,
        }
    }

    /// Returns true if this node is a function call
    pub fn is_function_call(&self) -> bool {
        matches!(self, Expression::FunctionCall { .. })
    }

    /// Returns true if this node or any descendant calls an aggregate
    pub fn contains_aggregate(&self, functions: &FunctionRegistry) -> bool {
        self.first_aggregate(functions).is_some()
    }

    /// Name of the first aggregate call found depth-first, if any
    pub fn first_aggregate(&self, functions: &FunctionRegistry) -> Option<&str> {
        match self {
            Expression::FunctionCall { name, args } => {
                if functions.is_aggregate(name) {
                    Some(name.as_str())
                } else {
                    args.iter().find_map(|arg| arg.first_aggregate(functions))
                }
            }
            _ => None,
        }
    }

    /// Column header text: `name`, literal text, or `fn(arg1,arg2)`
    pub fn display(&self) -> String {
        match self {
            Expression::Literal(text) => text.clone(),
            Expression::AttributeRef(name) => name.clone(),
            Expression::FunctionCall { name, args } => {
                let rendered: Vec<String> = args.iter().map(Expression::display).collect();
                format!("{}({})", name, rendered.join(","))
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One `order by` key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderKey {
    /// 1-based projection position
    pub position: usize,
    /// Sort direction
    pub direction: SortDirection,
}

impl OrderKey {
    pub fn asc(position: usize) -> Self {
        Self {
            position,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(position: usize) -> Self {
        Self {
            position,
            direction: SortDirection::Desc,
        }
    }

    /// Returns true for ascending keys
    pub fn is_ascending(&self) -> bool {
        self.direction == SortDirection::Asc
    }
}

/// Parsed `select` query
#[derive(Debug, Clone)]
pub struct SelectQuery {
    /// Directory the query scans
    pub source: Source,
    /// Select list, one column each
    pub projections: Vec<Expression>,
    /// Optional function-rooted filter without aggregates
    pub filter: Option<Expression>,
    /// Ordering keys in declaration order
    pub order_keys: Vec<OrderKey>,
    /// Explicit row limit
    pub limit: Option<u32>,
}

impl SelectQuery {
    /// Creates a query selecting `projections` from `source`
    pub fn new(source: Source, projections: Vec<Expression>) -> Self {
        Self {
            source,
            projections,
            filter: None,
            order_keys: Vec::new(),
            limit: None,
        }
    }

    /// Sets the filter
    pub fn with_filter(mut self, filter: Expression) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Adds an ordering key
    pub fn with_order_key(mut self, key: OrderKey) -> Self {
        self.order_keys.push(key);
        self
    }

    /// Sets the limit
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if any projection calls an aggregate
    pub fn has_aggregates(&self, functions: &FunctionRegistry) -> bool {
        self.projections
            .iter()
            .any(|projection| projection.contains_aggregate(functions))
    }

    /// Returns true if there is at least one projection and every one calls an aggregate
    pub fn all_aggregates(&self, functions: &FunctionRegistry) -> bool {
        !self.projections.is_empty()
            && self
                .projections
                .iter()
                .all(|projection| projection.contains_aggregate(functions))
    }

    /// Column headers for the projections
    pub fn headers(&self) -> Vec<String> {
        self.projections.iter().map(Expression::display).collect()
    }
}
