// src/source.rs

use crate::domain::RawRecord;
use crate::errors::{AnalyticsError, AnalyticsResult};
use serde_json::Value;

/// Supplies raw rows to the pipeline. File access, HTTP, or anything else
/// stateful lives behind this trait; the analytics core only sees the rows.
pub trait RecordSource {
    /// Short label for logs.
    fn name(&self) -> &str;

    fn load(&self) -> AnalyticsResult<Vec<RawRecord>>;
}

/// Rows already held in memory (typically handed over by an external CSV loader).
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    name: String,
    rows: Vec<RawRecord>,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, rows: Vec<RawRecord>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

impl RecordSource for InMemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> AnalyticsResult<Vec<RawRecord>> {
        Ok(self.rows.clone())
    }
}

/// A JSON array of row objects, e.g. `[{"address": "...", "price": 1250000}, ...]`.
#[derive(Debug, Clone)]
pub struct JsonSource {
    name: String,
    text: String,
}

impl JsonSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl RecordSource for JsonSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> AnalyticsResult<Vec<RawRecord>> {
        let value: Value = serde_json::from_str(&self.text)?;
        let Value::Array(items) = value else {
            return Err(AnalyticsError::Source(format!(
                "{}: expected a JSON array of rows",
                self.name
            )));
        };

        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(RawRecord::from_map(map)),
                other => Err(AnalyticsError::Source(format!(
                    "{}: row {i} is not an object: {other}",
                    self.name
                ))),
            })
            .collect()
    }
}
