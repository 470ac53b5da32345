//! Result types for query execution

use crate::functions::Value;
use crate::parser::Expression;

/// One output row, a value per projection
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Values in projection order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value at a 1-based projection position
    pub fn at(&self, position: usize) -> Option<&Value> {
        position.checked_sub(1).and_then(|index| self.values.get(index))
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Ordered, limited result of a query
#[derive(Debug, Clone)]
pub struct RowSet {
    /// Projections that produced the columns
    projections: Vec<Expression>,
    /// Rows in result order
    rows: Vec<Row>,
    /// Number of directory entries examined
    scanned_count: usize,
}

impl RowSet {
    pub fn new(projections: Vec<Expression>, rows: Vec<Row>, scanned_count: usize) -> Self {
        Self {
            projections,
            rows,
            scanned_count,
        }
    }

    pub fn projections(&self) -> &[Expression] {
        &self.projections
    }

    /// Column headers, one per projection
    pub fn headers(&self) -> Vec<String> {
        self.projections.iter().map(Expression::display).collect()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn scanned_count(&self) -> usize {
        self.scanned_count
    }

    /// Returns true if no rows matched
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Row values as plain strings, for assertions and simple output
    pub fn to_strings(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.values().iter().map(Value::as_text).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_positions_are_one_based() {
        let row = Row::new(vec![Value::string("a.txt"), Value::Int(3)]);
        assert_eq!(row.at(1), Some(&Value::string("a.txt")));
        assert_eq!(row.at(2), Some(&Value::Int(3)));
        assert_eq!(row.at(0), None);
        assert_eq!(row.at(3), None);
    }

    #[test]
    fn test_row_set_headers_and_strings() {
        let rows = RowSet::new(
            vec![
                Expression::call("lower", vec![Expression::attribute("name")]),
                Expression::attribute("size"),
            ],
            vec![Row::new(vec![Value::string("a.txt"), Value::Int(3)])],
            4,
        );
        assert_eq!(rows.headers(), vec!["lower(name)", "size"]);
        assert_eq!(rows.to_strings(), vec![vec!["a.txt".to_string(), "3".to_string()]]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.scanned_count(), 4);
        assert!(!rows.is_empty());
    }
}
