//! Directory-walking query executor
//!
//! Execution flow:
//! 1. Walk the source tree, each directory's entries in name order,
//!    descending into a subdirectory before reporting the subdirectory itself
//! 2. Filter each entry and evaluate its projections
//! 3. Resolve aggregate projections over every matched row
//! 4. Apply ordering
//! 5. Apply the effective limit
//!
//! With no ordering and no aggregates, the walk stops listing a directory
//! once the limit is reached.

use std::fs;

use crate::attributes::{join_path, FileAttributes};
use crate::context::QueryContext;
use crate::functions::{FunctionResult, Value};
use crate::observability::{Logger, ObservationScope};
use crate::parser::SelectQuery;

use super::errors::{ExecutorError, ExecutorResult};
use super::evaluator::{Evaluated, Evaluator};
use super::options::Options;
use super::result::{Row, RowSet};
use super::sorter::RowSorter;

/// Rows collected during one walk
struct Scan<'q> {
    query: &'q SelectQuery,
    evaluator: Evaluator<'q>,
    rows: Vec<Vec<Evaluated>>,
    short_circuit_at: Option<usize>,
    scanned: usize,
}

impl<'q> Scan<'q> {
    fn limit_reached(&self) -> bool {
        self.short_circuit_at
            .map_or(false, |limit| self.rows.len() >= limit)
    }

    /// Filters one entry and records its row if it matches
    fn visit(&mut self, attributes: &FileAttributes) -> FunctionResult<()> {
        if let Some(filter) = &self.query.filter {
            if !self.evaluator.matches(filter, attributes)? {
                return Ok(());
            }
        }
        let row = self
            .query
            .projections
            .iter()
            .map(|projection| self.evaluator.evaluate_projection(projection, attributes))
            .collect::<FunctionResult<Vec<Evaluated>>>()?;
        self.rows.push(row);
        Ok(())
    }
}

/// Query executor over the local filesystem
pub struct QueryExecutor<'a> {
    context: &'a QueryContext,
    options: &'a Options,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new executor
    pub fn new(context: &'a QueryContext, options: &'a Options) -> Self {
        Self { context, options }
    }

    /// Executes a query and returns its ordered, limited rows.
    ///
    /// Any read or evaluation failure aborts the whole query.
    pub fn execute(&self, query: &SelectQuery) -> ExecutorResult<RowSet> {
        let scope = ObservationScope::with_fields(
            "QUERY",
            vec![("source", query.source.root().to_string())],
        );
        match self.run(query) {
            Ok(rows) => {
                let returned = rows.len().to_string();
                let scanned = rows.scanned_count().to_string();
                scope.complete_with_fields(&[
                    ("rows", returned.as_str()),
                    ("scanned", scanned.as_str()),
                ]);
                Ok(rows)
            }
            Err(err) => {
                scope.fail(&err.to_string());
                Err(err)
            }
        }
    }

    fn run(&self, query: &SelectQuery) -> ExecutorResult<RowSet> {
        let functions = self.context.functions();
        let all_aggregates = query.all_aggregates(functions);
        let has_aggregates = query.has_aggregates(functions);

        let limit = if all_aggregates {
            Some(1)
        } else {
            query.limit.map(|limit| limit as usize)
        };
        let short_circuit_at = if query.order_keys.is_empty() && !has_aggregates {
            limit
        } else {
            None
        };

        let mut scan = Scan {
            query,
            evaluator: Evaluator::new(functions),
            rows: Vec::new(),
            short_circuit_at,
            scanned: 0,
        };
        self.walk(query.source.root(), &mut scan)?;

        let scanned = scan.scanned;
        let mut rows = self.finalize(query, scan.rows, all_aggregates)?;
        RowSorter::sort(&mut rows, &query.order_keys);
        if let Some(limit) = limit {
            rows.truncate(limit);
        }

        Ok(RowSet::new(query.projections.clone(), rows, scanned))
    }

    fn walk(&self, directory: &str, scan: &mut Scan<'_>) -> ExecutorResult<()> {
        let mut entries = fs::read_dir(directory)
            .map_err(|e| ExecutorError::io(directory, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ExecutorError::io(directory, e))?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = join_path(directory, &name);
            let metadata = entry
                .metadata()
                .map_err(|e| ExecutorError::io(path.as_str(), e))?;

            if metadata.is_dir() {
                if self.options.should_traverse(&name) {
                    self.walk(&path, scan)?;
                } else if self.options.traverse_nested {
                    Logger::trace("DIRECTORY_SKIPPED", &[("path", path.as_str())]);
                }
            }

            if scan.limit_reached() {
                Logger::trace(
                    "LIMIT_SHORT_CIRCUIT",
                    &[
                        ("directory", directory),
                        ("rows", scan.rows.len().to_string().as_str()),
                    ],
                );
                return Ok(());
            }

            scan.scanned += 1;
            let attributes = FileAttributes::from_entry(directory, name, metadata);
            scan.visit(&attributes)
                .map_err(|e| ExecutorError::evaluation_at(path.as_str(), e))?;
        }
        Ok(())
    }

    /// Replaces aggregate placeholders with values computed over all rows
    fn finalize(
        &self,
        query: &SelectQuery,
        pending: Vec<Vec<Evaluated>>,
        all_aggregates: bool,
    ) -> ExecutorResult<Vec<Row>> {
        let functions = self.context.functions();
        let evaluator = Evaluator::new(functions);

        let mut finalized: Vec<Option<Value>> = vec![None; query.projections.len()];
        for (column, projection) in query.projections.iter().enumerate() {
            if !projection.contains_aggregate(functions) {
                continue;
            }
            let arguments: Vec<&[Vec<Value>]> = pending
                .iter()
                .filter_map(|row| match row.get(column) {
                    Some(Evaluated::PendingAggregate(args)) => Some(args.as_slice()),
                    _ => None,
                })
                .collect();
            let value = evaluator
                .finalize(projection, &arguments)
                .map_err(ExecutorError::evaluation)?;
            finalized[column] = Some(value);
        }

        if pending.is_empty() && all_aggregates {
            let values = finalized
                .into_iter()
                .map(|value| value.unwrap_or(Value::Empty))
                .collect();
            return Ok(vec![Row::new(values)]);
        }

        let rows = pending
            .into_iter()
            .map(|cells| {
                let values = cells
                    .into_iter()
                    .zip(&finalized)
                    .map(|(cell, value)| match cell {
                        Evaluated::Resolved(resolved) => resolved,
                        Evaluated::PendingAggregate(_) => value.clone().unwrap_or(Value::Empty),
                    })
                    .collect();
                Row::new(values)
            })
            .collect();
        Ok(rows)
    }
}
