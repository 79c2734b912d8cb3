//! RecordStore: load and save a record set in one of two serialized forms.
//!
//! - `.json` holds an object of objects, one inner object per record, keyed by app id
//! - `.csv` / `.txt` holds a header row plus one delimited row per record

mod delimited;
mod json;

use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::StoreError;
use crate::record::RecordSet;

/// Serialized form, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("csv") | Some("txt") => Ok(Format::Csv),
            _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Load a record set from disk
pub fn load(path: &Path) -> Result<RecordSet, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let format = Format::from_path(path)?;

    let records = match format {
        Format::Json => json::read(path)?,
        Format::Csv => delimited::read(path)?,
    };

    info!(path = %path.display(), shape = %records.shape(), "loaded records");
    Ok(records)
}

/// Persist a record set, replacing any existing file
pub fn save(records: &RecordSet, path: &Path) -> Result<(), StoreError> {
    let format = Format::from_path(path)?;
    ensure_parent(path)?;

    match format {
        Format::Json => json::write(records, path)?,
        Format::Csv => delimited::write(records, path)?,
    }

    info!(path = %path.display(), shape = %records.shape(), "saved records");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            std::fs::create_dir_all(dir).map_err(|e| StoreError::io(PathBuf::from(dir), e))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample() -> RecordSet {
        RecordSet::new(vec![
            Record::new("20")
                .with("name", "Team Fortress")
                .with("categories", json!(["Multi-player", "PvP"]))
                .with("tags", json!({"Action": 120, "FPS": 80}))
                .with("windows", true)
                .with("estimated_owners", 20000)
                .with("developers", serde_json::Value::Null),
            Record::new("10")
                .with("name", "Counter Strike")
                .with("categories", json!([]))
                .with("windows", "false")
                .with("estimated_owners", "0 - 20000"),
        ])
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.JSON")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.csv")).unwrap(), Format::Csv);
        assert_eq!(Format::from_path(Path::new("a.txt")).unwrap(), Format::Csv);
        assert!(matches!(
            Format::from_path(Path::new("a.parquet")),
            Err(StoreError::UnsupportedFormat(_))
        ));
        assert!(Format::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games.xml");
        std::fs::write(&path, "<games/>").unwrap();
        assert!(matches!(
            load(&path).unwrap_err(),
            StoreError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn test_save_unsupported_extension_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games.yaml");
        assert!(matches!(
            save(&sample(), &path).unwrap_err(),
            StoreError::UnsupportedFormat(_)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_json_keeps_keys_and_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("games.json");
        let records = sample();

        save(&records, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, records);
        let keys: Vec<_> = loaded.iter().map(|r| r.key()).collect();
        assert_eq!(keys, vec!["20", "10"]);
    }

    #[test]
    fn test_csv_decodes_structured_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games.csv");

        save(&sample(), &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        let first = &loaded.records()[0];
        assert_eq!(first.key(), "0");
        assert_eq!(first.get("categories"), Some(&json!(["Multi-player", "PvP"])));
        assert_eq!(first.get("tags"), Some(&json!({"Action": 120, "FPS": 80})));
        // scalars come back as text for the coercion stages to interpret
        assert_eq!(first.text("windows"), Some("true"));
        assert_eq!(first.text("estimated_owners"), Some("20000"));
        assert_eq!(first.get("developers"), Some(&serde_json::Value::Null));

        let second = &loaded.records()[1];
        assert_eq!(second.get("categories"), Some(&json!([])));
        assert_eq!(second.text("estimated_owners"), Some("0 - 20000"));
    }
}
