//! Loosely-typed records from the tabular data store
//!
//! A row carries an opaque id and an open-ended `fields` bag. Field values
//! stay as [`serde_json::Value`] so every shape the store can return (string,
//! list, number, attachment object) survives the trip into the output
//! untouched; shape checks happen where a field is actually interpreted.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One row of a table: upstream id plus raw field map.
///
/// Extra envelope keys such as `createdTime` are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Look up a raw field value by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// One page of a list-records response.
///
/// `offset` is the cursor for the next page; the aggregator reads the first
/// page only and never follows it.
#[derive(Debug, Deserialize)]
pub struct RecordsPage {
    pub records: Vec<Record>,
    #[serde(default)]
    pub offset: Option<String>,
}
