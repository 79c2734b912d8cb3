use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::StoreError;
use crate::record::{Record, RecordSet};

/// Read `{key: {column: value}}` into one record per key, in file order
pub fn read(path: &Path) -> Result<RecordSet, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let document: Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| StoreError::malformed(path, e))?;

    let Value::Object(entries) = document else {
        return Err(StoreError::malformed(
            path,
            "expected a JSON object keyed by record id",
        ));
    };

    entries
        .into_iter()
        .map(|(key, value)| match value {
            Value::Object(fields) => Ok(Record::from_fields(key, fields)),
            other => Err(StoreError::malformed(
                path,
                format!("record {} is {}, expected an object", key, kind(&other)),
            )),
        })
        .collect()
}

pub fn write(records: &RecordSet, path: &Path) -> Result<(), StoreError> {
    let mut document = Map::new();
    for record in records.iter() {
        document.insert(
            record.key().to_string(),
            Value::Object(record.fields().clone()),
        );
    }

    let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &document).map_err(|e| StoreError::malformed(path, e))?;
    writer.flush().map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_rejects_non_object_rows() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"10": {"name": "ok"}, "20": [1, 2]}"#).unwrap();

        let err = read(file.path()).unwrap_err();
        assert!(err.to_string().contains("record 20 is an array"));
    }

    #[test]
    fn test_rejects_top_level_array() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"[{"name": "ok"}]"#).unwrap();
        assert!(matches!(
            read(file.path()).unwrap_err(),
            StoreError::Malformed { .. }
        ));
    }

    #[test]
    fn test_file_order_is_record_order() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{"300": {"name": "c"}, "1000": {"name": "a"}, "20": {"name": "b"}}"#,
        )
        .unwrap();

        let records = read(file.path()).unwrap();
        let keys: Vec<_> = records.iter().map(|r| r.key()).collect();
        assert_eq!(keys, vec!["300", "1000", "20"]);
    }
}
