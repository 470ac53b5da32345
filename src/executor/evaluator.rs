//! Expression evaluation
//!
//! Per-row evaluation is eager for scalar expressions. An expression that
//! calls an aggregate cannot be resolved from a single row, so per-row
//! evaluation only collects the aggregate calls' arguments; the value is
//! computed by [`Evaluator::finalize`] once every row has been seen.

use crate::attributes::FileAttributes;
use crate::functions::{FunctionRegistry, FunctionResult, Value};
use crate::parser::Expression;

/// Outcome of evaluating one projection for one row
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluated {
    /// Final value
    Resolved(Value),
    /// Argument values of each aggregate call, in depth-first order
    PendingAggregate(Vec<Vec<Value>>),
}

impl Evaluated {
    /// Resolved value, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            Evaluated::Resolved(value) => Some(value),
            Evaluated::PendingAggregate(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Evaluated::PendingAggregate(_))
    }
}

/// Evaluates expressions against file attributes
pub struct Evaluator<'a> {
    functions: &'a FunctionRegistry,
}

impl<'a> Evaluator<'a> {
    pub fn new(functions: &'a FunctionRegistry) -> Self {
        Self { functions }
    }

    /// Evaluates an expression to a value.
    ///
    /// Arguments are evaluated depth-first, left to right; the first error
    /// stops evaluation. An aggregate reached here aggregates its own row.
    pub fn evaluate(&self, expression: &Expression, attributes: &FileAttributes) -> FunctionResult<Value> {
        match expression {
            Expression::Literal(text) => Ok(Value::String(text.clone())),
            Expression::AttributeRef(name) => Ok(attributes.get(name)),
            Expression::FunctionCall { name, args } => {
                let values = args
                    .iter()
                    .map(|arg| self.evaluate(arg, attributes))
                    .collect::<FunctionResult<Vec<Value>>>()?;
                self.functions.execute(name, &values)
            }
        }
    }

    /// Evaluates a filter; anything other than boolean true rejects the row
    pub fn matches(&self, filter: &Expression, attributes: &FileAttributes) -> FunctionResult<bool> {
        Ok(self.evaluate(filter, attributes)?.as_bool().unwrap_or(false))
    }

    /// Evaluates a projection for one row
    pub fn evaluate_projection(
        &self,
        expression: &Expression,
        attributes: &FileAttributes,
    ) -> FunctionResult<Evaluated> {
        if !expression.contains_aggregate(self.functions) {
            return self.evaluate(expression, attributes).map(Evaluated::Resolved);
        }
        let mut collected = Vec::new();
        self.collect_aggregate_arguments(expression, attributes, &mut collected)?;
        Ok(Evaluated::PendingAggregate(collected))
    }

    fn collect_aggregate_arguments(
        &self,
        expression: &Expression,
        attributes: &FileAttributes,
        collected: &mut Vec<Vec<Value>>,
    ) -> FunctionResult<()> {
        if let Expression::FunctionCall { name, args } = expression {
            if self.functions.is_aggregate(name) {
                let values = args
                    .iter()
                    .map(|arg| self.evaluate(arg, attributes))
                    .collect::<FunctionResult<Vec<Value>>>()?;
                collected.push(values);
            } else {
                for arg in args {
                    self.collect_aggregate_arguments(arg, attributes, collected)?;
                }
            }
        }
        Ok(())
    }

    /// Resolves an aggregate-bearing projection over all matched rows.
    ///
    /// `rows` holds each matched row's pending arguments for this projection.
    /// Attribute references outside aggregate calls resolve to Empty.
    pub fn finalize(&self, expression: &Expression, rows: &[&[Vec<Value>]]) -> FunctionResult<Value> {
        let calls = aggregate_calls(expression, self.functions);
        let mut results = Vec::with_capacity(calls.len());
        for (index, name) in calls.iter().enumerate() {
            let arguments: Vec<Vec<Value>> = rows
                .iter()
                .map(|row| row.get(index).cloned().unwrap_or_default())
                .collect();
            results.push(self.functions.execute_aggregate(name, &arguments)?);
        }

        let mut next = results.into_iter();
        self.substitute(expression, &mut next)
    }

    fn substitute(
        &self,
        expression: &Expression,
        results: &mut std::vec::IntoIter<Value>,
    ) -> FunctionResult<Value> {
        match expression {
            Expression::Literal(text) => Ok(Value::String(text.clone())),
            Expression::AttributeRef(_) => Ok(Value::Empty),
            Expression::FunctionCall { name, args } => {
                if self.functions.is_aggregate(name) {
                    return Ok(results.next().unwrap_or(Value::Empty));
                }
                let values = args
                    .iter()
                    .map(|arg| self.substitute(arg, results))
                    .collect::<FunctionResult<Vec<Value>>>()?;
                self.functions.execute(name, &values)
            }
        }
    }
}

/// Names of the aggregate calls in `expression`, depth-first
fn aggregate_calls<'e>(expression: &'e Expression, functions: &FunctionRegistry) -> Vec<&'e str> {
    let mut calls = Vec::new();
    let mut stack = vec![expression];
    while let Some(node) = stack.pop() {
        if let Expression::FunctionCall { name, args } = node {
            if functions.is_aggregate(name) {
                calls.push(name.as_str());
            } else {
                stack.extend(args.iter().rev());
            }
        }
    }
    calls
}
