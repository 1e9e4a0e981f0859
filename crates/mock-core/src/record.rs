//! Records and table snapshots.

use crate::value::Value;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

static NULL: Value = Value::Null;

/// One row of synthetic data: an ordered field name -> value map.
///
/// Lookups of missing fields yield [`Value::Null`] rather than failing, so
/// filters can operate structurally across heterogeneous tables.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to the record, builder style.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Get a field value, or `Value::Null` if the field is missing.
    pub fn get(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&NULL)
    }

    /// Get a field value only if it is present.
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).as_i64()
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).as_f64()
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).as_str()
    }

    pub fn get_date(&self, name: &str) -> Option<NaiveDate> {
        self.get(name).as_date()
    }

    /// Check whether the field is present (even if null).
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate over all fields.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Get the number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Name of the first field holding a NaN or infinite float, if any.
    pub fn first_non_finite(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|(_, v)| v.has_non_finite())
            .map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The full, immutable record sequence of one table.
///
/// Shared by reference from the generation cache; queries clone the rows
/// they return.
pub type Snapshot = Arc<[Record]>;

/// A typed row of one logical table.
///
/// Each table defines its row struct once and generators build those rows
/// before handing them to the cache as generic [`Record`]s.
pub trait TableRow {
    /// Name of the table this row belongs to.
    const TABLE: &'static str;

    /// Convert this row into a generic record.
    fn into_record(self) -> Record;
}

/// Convert a batch of typed rows into records.
pub fn into_records<T: TableRow>(rows: impl IntoIterator<Item = T>) -> Vec<Record> {
    rows.into_iter().map(TableRow::into_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = Record::new()
            .field("name", "Alice")
            .field("age", 30)
            .field("score", 9.5);

        assert_eq!(record.field_count(), 3);
        assert_eq!(record.get_str("name"), Some("Alice"));
        assert_eq!(record.get_i64("age"), Some(30));
        assert_eq!(record.get_f64("score"), Some(9.5));
    }

    #[test]
    fn test_missing_field_reads_as_null() {
        let record = Record::new().field("a", 1);
        assert!(record.get("b").is_null());
        assert!(record.get_field("b").is_none());
        assert!(!record.contains("b"));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let record: Record = [("b", Value::Int(2)), ("a", Value::Int(1))]
            .into_iter()
            .collect();
        assert_eq!(serde_json::to_string(&record).unwrap(), "{\"a\":1,\"b\":2}");
    }

    #[test]
    fn test_first_non_finite() {
        let record = Record::new().field("ok", 1.0).field("rate", f64::NAN);
        assert_eq!(record.first_non_finite(), Some("rate"));
    }
}
