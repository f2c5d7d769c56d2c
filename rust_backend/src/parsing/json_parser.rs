use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::parsing::table::{CellValue, RawTable};

/// Parse a JSON schedule export into a raw table.
///
/// The file must hold an array of flat objects, one per schedule row.
/// The keys of the first object define the header set; later objects may
/// omit keys (missing cells stay empty).
pub fn parse_schedule_json(json_path: &Path) -> Result<RawTable> {
    let json_content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;

    parse_schedule_json_str(&json_content)
}

/// Parse schedule JSON from a string.
pub fn parse_schedule_json_str(json_str: &str) -> Result<RawTable> {
    // First validate that it's valid JSON
    let json_value: Value = serde_json::from_str(json_str).with_context(|| {
        let preview = if json_str.len() > 500 {
            format!("{}...", &json_str[..500])
        } else {
            json_str.to_string()
        };
        format!("Invalid JSON syntax. First 500 chars: {}", preview)
    })?;

    let rows_json = match json_value.as_array() {
        Some(rows) => rows,
        None => anyhow::bail!(
            "JSON must contain an array of objects, found {}",
            value_kind(&json_value)
        ),
    };

    let headers: Vec<String> = match rows_json.first() {
        Some(first) => first
            .as_object()
            .with_context(|| {
                format!("Row 0 is not an object, found {}", value_kind(first))
            })?
            .keys()
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::with_capacity(rows_json.len());
    for (idx, row_json) in rows_json.iter().enumerate() {
        let object = row_json.as_object().with_context(|| {
            format!("Row {} is not an object, found {}", idx, value_kind(row_json))
        })?;

        let mut cells = Vec::with_capacity(headers.len());
        for header in &headers {
            let cell = match object.get(header) {
                Some(value) => cell_from_value(value).with_context(|| {
                    format!("Unsupported value for '{}' in row {}", header, idx)
                })?,
                None => CellValue::Empty,
            };
            cells.push(cell);
        }
        rows.push(cells);
    }

    Ok(RawTable::new(headers, rows))
}

fn cell_from_value(value: &Value) -> Result<CellValue> {
    let cell = match value {
        Value::Null => CellValue::Empty,
        Value::String(s) => {
            if s.trim().is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Value::Number(n) => match n.as_f64() {
            Some(f) => CellValue::Number(f),
            None => CellValue::Text(n.to_string()),
        },
        Value::Bool(b) => CellValue::Text(b.to_string()),
        Value::Array(_) | Value::Object(_) => {
            anyhow::bail!("nested values are not supported, found {}", value_kind(value))
        }
    };
    Ok(cell)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
