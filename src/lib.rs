//! fsquery - SQL-like queries over the filesystem
//!
//! ```ignore
//! use fsquery::{execute_query, executor::Options, QueryContext};
//!
//! let context = QueryContext::new();
//! let rows = execute_query(
//!     "select name, size from . where like(name, *.log) order by 2 desc limit 5",
//!     &context,
//!     &Options::default(),
//! )?;
//! ```

pub mod attributes;
pub mod cli;
pub mod context;
pub mod error;
pub mod executor;
pub mod functions;
pub mod observability;
pub mod parser;

pub use context::QueryContext;
pub use error::{ErrorKind, QueryError, QueryResult};

use executor::{Options, QueryExecutor, RowSet};

/// Parses and executes `query` in one step
pub fn execute_query(query: &str, context: &QueryContext, options: &Options) -> QueryResult<RowSet> {
    let parsed = parser::parse_query(query, context)?;
    let rows = QueryExecutor::new(context, options).execute(&parsed)?;
    Ok(rows)
}
