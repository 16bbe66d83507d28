// src/domain/record.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw field as handed over by a tabular loader, classified before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawField<T> {
    /// Present and well-formed.
    Present(T),
    /// Present, but not usable as `T`. Carries the original text for diagnostics.
    Malformed(String),
    Absent,
}

impl<T> RawField<T> {
    pub fn is_malformed(&self) -> bool {
        matches!(self, RawField::Malformed(_))
    }

    /// Returns the value when present, otherwise `fallback`.
    pub fn or(self, fallback: T) -> T {
        match self {
            RawField::Present(v) => v,
            RawField::Malformed(_) | RawField::Absent => fallback,
        }
    }
}

/// A loosely-typed input row: field name → JSON value.
///
/// Numbers may arrive as JSON numbers or as numeric strings (loaders with
/// dynamic typing do both), so every accessor classifies instead of casting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: Map<String, Value>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Builds a row from header/value pairs of a text table (e.g. a CSV line).
    pub fn from_text_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        Self { fields }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Classifies a numeric field. Only finite numbers count as present.
    pub fn number(&self, key: &str) -> RawField<f64> {
        match self.fields.get(key) {
            None | Some(Value::Null) => RawField::Absent,
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) if v.is_finite() => RawField::Present(v),
                _ => RawField::Malformed(n.to_string()),
            },
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return RawField::Absent;
                }
                match trimmed.parse::<f64>() {
                    Ok(v) if v.is_finite() => RawField::Present(v),
                    _ => RawField::Malformed(s.clone()),
                }
            }
            Some(other) => RawField::Malformed(other.to_string()),
        }
    }

    /// Classifies a text field. Numbers are accepted and rendered as text.
    pub fn text(&self, key: &str) -> RawField<String> {
        match self.fields.get(key) {
            None | Some(Value::Null) => RawField::Absent,
            Some(Value::String(s)) => RawField::Present(s.clone()),
            Some(Value::Number(n)) => RawField::Present(n.to_string()),
            Some(other) => RawField::Malformed(other.to_string()),
        }
    }
}

/// A normalized property sale. Immutable once built by the normalizer.
///
/// `price_per_m2` comes straight from the input and is not guaranteed to equal
/// `price / size_m2`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRecord {
    pub property_type: String,
    /// Street part only; postcode and district are split out.
    pub address: String,
    /// Four-digit code, or empty.
    pub postcode: String,
    pub district: String,
    pub price: f64,
    /// Sale date as given in the input.
    pub date: String,
    /// `date` parsed once at normalization. `None` when unparsable.
    #[serde(skip)]
    pub sold_at: Option<NaiveDateTime>,
    pub sale_type: String,
    pub size_m2: f64,
    pub price_per_m2: f64,
    pub rooms: u32,
    pub year_built: i32,

    // Display strings, produced once by the normalizer's currency formatter.
    pub formatted_price: String,
    pub formatted_price_per_m2: String,
}
