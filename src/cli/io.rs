//! Output rendering for the CLI
//!
//! - json: one array of objects keyed by column header, in projection order
//! - table: tab-separated header and rows, then `Total Rows: n`

use std::collections::HashSet;
use std::io::Write;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Number;

use super::args::OutputFormat;
use super::errors::CliResult;
use crate::executor::{Row, RowSet};
use crate::functions::Value;

fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Int(i) => serde_json::Value::from(*i),
        Value::Float(f) => Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::DateTime(_) => serde_json::Value::String(value.to_string()),
        Value::Empty => serde_json::Value::Null,
    }
}

/// Column keys for JSON objects, in projection order.
///
/// A header repeated by a later projection is suffixed with that
/// projection's 1-based position (`name`, `name#2`).
pub fn json_keys(headers: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            if seen.insert(header.as_str()) {
                header.clone()
            } else {
                format!("{}#{}", header, index + 1)
            }
        })
        .collect()
}

/// Serializes rows as objects whose keys follow projection order
struct JsonRows<'r> {
    keys: Vec<String>,
    rows: &'r RowSet,
}

struct JsonRow<'r> {
    keys: &'r [String],
    row: &'r Row,
}

impl<'r> JsonRows<'r> {
    fn new(rows: &'r RowSet) -> Self {
        Self {
            keys: json_keys(&rows.headers()),
            rows,
        }
    }
}

impl Serialize for JsonRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows.iter() {
            seq.serialize_element(&JsonRow {
                keys: &self.keys,
                row,
            })?;
        }
        seq.end()
    }
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.keys.len()))?;
        for (key, value) in self.keys.iter().zip(self.row.values()) {
            map.serialize_entry(key, &to_json(value))?;
        }
        map.end()
    }
}

/// Rows as a JSON array of objects
pub fn rows_to_json(rows: &RowSet) -> CliResult<serde_json::Value> {
    Ok(serde_json::to_value(JsonRows::new(rows))?)
}

/// Rows as tab-separated text with a row-count footer
pub fn rows_to_table(rows: &RowSet) -> String {
    let mut table = rows.headers().join("\t");
    table.push('\n');
    for row in rows.iter() {
        let cells: Vec<String> = row.values().iter().map(Value::as_text).collect();
        table.push_str(&cells.join("\t"));
        table.push('\n');
    }
    table.push_str(&format!("Total Rows: {}\n", rows.len()));
    table
}

/// Writes rows in the requested format
pub fn write_rows<W: Write>(out: &mut W, rows: &RowSet, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &JsonRows::new(rows))?;
            writeln!(out)?;
        }
        OutputFormat::Table => out.write_all(rows_to_table(rows).as_bytes())?,
    }
    out.flush()?;
    Ok(())
}

/// Writes `name<TAB>alias, alias` lines
pub fn write_functions<W: Write>(out: &mut W, functions: &[(String, Vec<String>)]) -> CliResult<()> {
    for (name, aliases) in functions {
        writeln!(out, "{}\t{}", name, aliases.join(", "))?;
    }
    out.flush()?;
    Ok(())
}
