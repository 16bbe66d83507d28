// src/domain/criteria.rs

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

pub const DEFAULT_WINDOW_MONTHS: u32 = 12;

/// How far back the date filter reaches.
///
/// On the wire this is either a month count (`6`, `"6"`) or `"all"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    All,
    Months(u32),
}

impl DateWindow {
    /// Parses the select-box values used by the dashboard (`"3"`, `"12"`, `"all"`).
    /// Anything that is not `"all"` or a positive month count falls back to 12 months.
    pub fn parse_lenient(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return DateWindow::All;
        }
        match s.parse::<u32>() {
            Ok(n) if n > 0 => DateWindow::Months(n),
            _ => DateWindow::Months(DEFAULT_WINDOW_MONTHS),
        }
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        DateWindow::Months(DEFAULT_WINDOW_MONTHS)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindow::All => write!(f, "all"),
            DateWindow::Months(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for DateWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DateWindow::All => serializer.serialize_str("all"),
            DateWindow::Months(n) => serializer.serialize_u32(*n),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WindowRepr {
    Months(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for DateWindow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WindowRepr::deserialize(deserializer)? {
            WindowRepr::Months(n) => match u32::try_from(n) {
                Ok(n) if n > 0 => DateWindow::Months(n),
                _ => DateWindow::default(),
            },
            WindowRepr::Text(s) => DateWindow::parse_lenient(&s),
        })
    }
}

/// Inclusive `[min, max]`. Not validated: `min > max` simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// The user-adjustable predicates narrowing the visible record set.
///
/// Empty `property_types` / `districts` mean "no restriction".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub search: String,
    pub postcode: String,
    pub property_types: BTreeSet<String>,
    pub price_range: ValueRange,
    pub room_range: ValueRange,
    pub size_range: ValueRange,
    pub year_built_range: ValueRange,
    pub districts: BTreeSet<String>,
    pub date_window: DateWindow,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            postcode: String::new(),
            property_types: BTreeSet::new(),
            price_range: ValueRange::new(0.0, 100_000_000.0),
            room_range: ValueRange::new(0.0, 10.0),
            size_range: ValueRange::new(0.0, 1000.0),
            year_built_range: ValueRange::new(1800.0, 2024.0),
            districts: BTreeSet::new(),
            date_window: DateWindow::default(),
        }
    }
}

impl FilterCriteria {
    /// Criteria that let every record with any date through.
    pub fn match_all() -> Self {
        Self {
            price_range: ValueRange::new(f64::NEG_INFINITY, f64::INFINITY),
            date_window: DateWindow::All,
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn toggle_property_type(&mut self, property_type: &str) {
        toggle(&mut self.property_types, property_type);
    }

    pub fn toggle_district(&mut self, district: &str) {
        toggle(&mut self.districts, district);
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_window_parsing() {
        assert_eq!(DateWindow::parse_lenient("all"), DateWindow::All);
        assert_eq!(DateWindow::parse_lenient("ALL"), DateWindow::All);
        assert_eq!(DateWindow::parse_lenient("6"), DateWindow::Months(6));
        assert_eq!(DateWindow::parse_lenient(" 24 "), DateWindow::Months(24));
        // Unparsable and zero both fall back to a year
        assert_eq!(DateWindow::parse_lenient("soon"), DateWindow::Months(12));
        assert_eq!(DateWindow::parse_lenient("0"), DateWindow::Months(12));
    }

    #[test]
    fn test_criteria_deserialize_with_defaults() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"search": "vej", "date_window": "all"}"#).unwrap();
        assert_eq!(criteria.search, "vej");
        assert_eq!(criteria.date_window, DateWindow::All);
        assert_eq!(criteria.price_range, ValueRange::new(0.0, 100_000_000.0));
        assert!(criteria.property_types.is_empty());

        let criteria: FilterCriteria = serde_json::from_str(r#"{"date_window": 6}"#).unwrap();
        assert_eq!(criteria.date_window, DateWindow::Months(6));
        let criteria: FilterCriteria = serde_json::from_str(r#"{"date_window": "3"}"#).unwrap();
        assert_eq!(criteria.date_window, DateWindow::Months(3));
        let criteria: FilterCriteria = serde_json::from_str(r#"{"date_window": 0}"#).unwrap();
        assert_eq!(criteria.date_window, DateWindow::Months(12));
    }

    #[test]
    fn test_date_window_serializes_as_number_or_all() {
        assert_eq!(serde_json::to_string(&DateWindow::Months(6)).unwrap(), "6");
        assert_eq!(serde_json::to_string(&DateWindow::All).unwrap(), r#""all""#);

        let criteria = FilterCriteria {
            date_window: DateWindow::Months(3),
            ..FilterCriteria::default()
        };
        let json = serde_json::to_string(&criteria).unwrap();
        let back: FilterCriteria = serde_json::from_str(&json).unwrap();
        assert_eq!(back, criteria);
    }

    #[test]
    fn test_toggles_and_reset() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_property_type("Villa");
        criteria.toggle_district("Valby");
        assert!(criteria.property_types.contains("Villa"));
        assert!(criteria.districts.contains("Valby"));

        criteria.toggle_property_type("Villa");
        assert!(criteria.property_types.is_empty());

        criteria.reset();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = ValueRange::new(100.0, 200.0);
        assert!(range.contains(100.0));
        assert!(range.contains(200.0));
        assert!(!range.contains(200.5));
        assert!(!ValueRange::new(5.0, 1.0).contains(3.0));
    }
}
