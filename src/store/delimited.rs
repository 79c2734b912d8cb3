use csv::{ReaderBuilder, Writer};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::StoreError;
use crate::record::{Record, RecordSet};

/// Read a headed CSV file; each row is keyed by its zero-based ordinal
pub fn read(path: &Path) -> Result<RecordSet, StoreError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    let mut records = Vec::new();

    for (idx, row) in reader.records().enumerate() {
        let row = row.map_err(|e| csv_error(path, e))?;
        let mut fields = Map::new();
        for (column, cell) in headers.iter().zip(row.iter()) {
            fields.insert(column.to_string(), decode_cell(cell));
        }
        records.push(Record::from_fields(idx.to_string(), fields));
    }

    Ok(RecordSet::new(records))
}

pub fn write(records: &RecordSet, path: &Path) -> Result<(), StoreError> {
    let columns = records.columns();
    let mut writer = Writer::from_path(path).map_err(|e| csv_error(path, e))?;

    writer
        .write_record(&columns)
        .map_err(|e| csv_error(path, e))?;

    for record in records.iter() {
        let row: Vec<String> = columns
            .iter()
            .map(|c| encode_cell(record.get(c)))
            .collect();
        writer.write_record(&row).map_err(|e| csv_error(path, e))?;
    }

    writer.flush().map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

/// Empty → null, JSON list/map text → structure, anything else stays text
fn decode_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    let trimmed = cell.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        if let Ok(value @ (Value::Array(_) | Value::Object(_))) = serde_json::from_str::<Value>(cell) {
            return value;
        }
    }
    Value::String(cell.to_string())
}

fn encode_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

fn csv_error(path: &Path, err: csv::Error) -> StoreError {
    if err.is_io_error() {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => StoreError::io(path, io),
            other => StoreError::malformed(path, format!("{:?}", other)),
        }
    } else {
        StoreError::malformed(path, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_cell() {
        assert_eq!(decode_cell(""), Value::Null);
        assert_eq!(decode_cell("Portal"), json!("Portal"));
        assert_eq!(decode_cell("[]"), json!([]));
        assert_eq!(decode_cell(r#"["Action","RPG"]"#), json!(["Action", "RPG"]));
        assert_eq!(decode_cell(r#"{"Indie": 3}"#), json!({"Indie": 3}));
        // python-style reprs are not JSON and stay text
        assert_eq!(decode_cell("['Action']"), json!("['Action']"));
        assert_eq!(decode_cell("[broken"), json!("[broken"));
        // numbers are left for the coercion stages
        assert_eq!(decode_cell("12345"), json!("12345"));
    }

    #[test]
    fn test_encode_cell() {
        assert_eq!(encode_cell(None), "");
        assert_eq!(encode_cell(Some(&Value::Null)), "");
        assert_eq!(encode_cell(Some(&json!(false))), "false");
        assert_eq!(encode_cell(Some(&json!(20000))), "20000");
        assert_eq!(encode_cell(Some(&json!(["a", "b"]))), r#"["a","b"]"#);
    }
}
