//! In-memory tabular model: a record set is an ordered list of keyed rows,
//! each row an ordered map of column name to JSON cell.

pub mod columns;
mod game;

pub use game::GameRecord;

use serde_json::{Map, Value};
use std::fmt;

/// A single catalog row
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    key: String,
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: Map::new(),
        }
    }

    pub fn from_fields(key: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            key: key.into(),
            fields,
        }
    }

    /// Builder-style setter
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Text value of a column; `None` for absent or non-text cells
    pub fn text(&self, column: &str) -> Option<&str> {
        self.fields.get(column).and_then(Value::as_str)
    }

    /// True when the column is absent, null or an empty string
    pub fn is_blank(&self, column: &str) -> bool {
        match self.fields.get(column) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        }
    }

    pub fn set(&mut self, column: &str, value: impl Into<Value>) {
        self.fields.insert(column.to_string(), value.into());
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.fields.shift_remove(column)
    }

    pub fn into_parts(self) -> (String, Map<String, Value>) {
        (self.key, self.fields)
    }
}

/// Rows × columns, reported before and after every stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub rows: usize,
    pub columns: usize,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.columns)
    }
}

/// The collection every stage transforms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Union of column names in first-seen order
    pub fn columns(&self) -> Vec<String> {
        let mut seen = Map::new();
        for record in &self.records {
            for column in record.fields.keys() {
                if !seen.contains_key(column) {
                    seen.insert(column.clone(), Value::Null);
                }
            }
        }
        seen.into_iter().map(|(column, _)| column).collect()
    }

    pub fn shape(&self) -> Shape {
        Shape {
            rows: self.records.len(),
            columns: self.columns().len(),
        }
    }

    /// Keep rows matching the predicate, preserving order
    pub fn retain(mut self, mut keep: impl FnMut(&Record) -> bool) -> Self {
        self.records.retain(|r| keep(r));
        self
    }

    /// Rewrite every row in place
    pub fn map_records(mut self, mut f: impl FnMut(&mut Record)) -> Self {
        for record in &mut self.records {
            f(record);
        }
        self
    }

    pub fn find(&self, key: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.key == key)
    }

    /// Deserialize every row into the typed downstream view
    pub fn to_games(&self) -> Result<Vec<GameRecord>, serde_json::Error> {
        self.records.iter().map(GameRecord::from_record).collect()
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
