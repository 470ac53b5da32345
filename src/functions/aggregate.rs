//! Built-in aggregate functions
//!
//! Each body receives one argument list per matched row. Empty values are
//! skipped, so aggregating a missing attribute behaves like SQL NULL.

use std::cmp::Ordering;

use super::errors::FunctionResult;
use super::registry::{Arity, FunctionSpec};
use super::value::Value;

/// The built-in aggregate catalog, in registration order
pub fn catalog() -> Vec<FunctionSpec> {
    vec![
        FunctionSpec::aggregate("count", Arity::Between(0, 1), count),
        FunctionSpec::aggregate("sum", Arity::Exactly(1), sum),
        FunctionSpec::aggregate("avg", Arity::Exactly(1), avg).aliases(&["average"]),
        FunctionSpec::aggregate("min", Arity::Exactly(1), min),
        FunctionSpec::aggregate("max", Arity::Exactly(1), max),
    ]
}

/// First argument of every row, skipping Empty
fn present(rows: &[Vec<Value>]) -> impl Iterator<Item = &Value> {
    rows.iter()
        .filter_map(|args| args.first())
        .filter(|value| !value.is_empty())
}

/// `count()` counts rows; `count(x)` counts rows where `x` is present
fn count(rows: &[Vec<Value>]) -> FunctionResult<Value> {
    let counted = rows
        .iter()
        .filter(|args| args.first().map_or(true, |value| !value.is_empty()))
        .count();
    Ok(Value::Int(counted as i64))
}

fn sum(rows: &[Vec<Value>]) -> FunctionResult<Value> {
    let mut total = 0.0;
    for value in present(rows) {
        total += value.as_float()?;
    }
    Ok(Value::Float(total))
}

fn avg(rows: &[Vec<Value>]) -> FunctionResult<Value> {
    let mut total = 0.0;
    let mut n = 0usize;
    for value in present(rows) {
        total += value.as_float()?;
        n += 1;
    }
    if n == 0 {
        return Ok(Value::Empty);
    }
    Ok(Value::Float(total / n as f64))
}

fn extreme(rows: &[Vec<Value>], keep: Ordering) -> Value {
    present(rows)
        .fold(None::<&Value>, |best, value| match best {
            Some(current) if value.compare_to(current) != keep => Some(current),
            _ => Some(value),
        })
        .cloned()
        .unwrap_or(Value::Empty)
}

fn min(rows: &[Vec<Value>]) -> FunctionResult<Value> {
    Ok(extreme(rows, Ordering::Less))
}

fn max(rows: &[Vec<Value>]) -> FunctionResult<Value> {
    Ok(extreme(rows, Ordering::Greater))
}
