//! Query Executor subsystem
//!
//! Consumes a parsed [`SelectQuery`](crate::parser::SelectQuery) and walks
//! its source directory.
//!
//! # Execution Flow (strict order)
//!
//! 1. List each directory in entry-name order, recursing into
//!    subdirectories before reporting them
//! 2. Evaluate the filter against each entry's attributes
//! 3. Evaluate projections; aggregate projections stay pending
//! 4. Resolve pending aggregates over all matched rows
//! 5. Apply ordering
//! 6. Apply limit
//!
//! Any read or evaluation failure aborts the query; there are no partial
//! results.

mod errors;
mod evaluator;
mod executor;
mod options;
mod result;
mod sorter;

pub use errors::{ExecutorError, ExecutorErrorCode, ExecutorResult};
pub use evaluator::{Evaluated, Evaluator};
pub use executor::QueryExecutor;
pub use options::Options;
pub use result::{Row, RowSet};
pub use sorter::RowSorter;
