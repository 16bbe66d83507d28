//! Analytics configuration
//!
//! Loaded from environment variables or a JSON document, with defaults that
//! match the dashboard's out-of-the-box behaviour.

use crate::errors::{AnalyticsError, AnalyticsResult};
use serde::Deserialize;
use std::env;

pub const DEFAULT_MAX_ROWS: usize = 1000;
pub const DEFAULT_BUCKET_WIDTH: f64 = 500_000.0;
pub const DEFAULT_TRAILING_DAYS: i64 = 30;
/// Upper bound on the trailing-volume window, roughly a thousand years.
pub const MAX_TRAILING_DAYS: i64 = 365_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Number of raw rows ingested per load. `None` ingests everything.
    pub max_rows: Option<usize>,

    /// Width of each price histogram bucket.
    pub price_bucket_width: f64,

    /// Size of the trailing-volume window, in days.
    pub trailing_volume_days: i64,

    /// Apply the room, size and year-built ranges as filter predicates.
    /// Off by default: the dashboard exposes those ranges but never filtered on them.
    pub apply_extended_ranges: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            max_rows: Some(DEFAULT_MAX_ROWS),
            price_bucket_width: DEFAULT_BUCKET_WIDTH,
            trailing_volume_days: DEFAULT_TRAILING_DAYS,
            apply_extended_ranges: false,
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `ANALYTICS_MAX_ROWS` (default: 1000; `0` or `none` = unlimited)
    /// - `ANALYTICS_BUCKET_WIDTH` (default: 500000)
    /// - `ANALYTICS_TRAILING_DAYS` (default: 30)
    /// - `ANALYTICS_EXTENDED_RANGES` (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_rows: match env::var("ANALYTICS_MAX_ROWS") {
                Ok(s) => parse_max_rows(&s).unwrap_or(defaults.max_rows),
                Err(_) => defaults.max_rows,
            },

            price_bucket_width: env::var("ANALYTICS_BUCKET_WIDTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|w: &f64| w.is_finite() && *w > 0.0)
                .unwrap_or(defaults.price_bucket_width),

            trailing_volume_days: env::var("ANALYTICS_TRAILING_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|d: &i64| (0..=MAX_TRAILING_DAYS).contains(d))
                .unwrap_or(defaults.trailing_volume_days),

            apply_extended_ranges: env::var("ANALYTICS_EXTENDED_RANGES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.apply_extended_ranges),
        }
    }

    /// Parse a JSON config document. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> AnalyticsResult<Self> {
        let config: AnalyticsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        if !self.price_bucket_width.is_finite() || self.price_bucket_width <= 0.0 {
            return Err(AnalyticsError::Config(format!(
                "price_bucket_width must be a positive number, got {}",
                self.price_bucket_width
            )));
        }
        if !(0..=MAX_TRAILING_DAYS).contains(&self.trailing_volume_days) {
            return Err(AnalyticsError::Config(format!(
                "trailing_volume_days must be between 0 and {}, got {}",
                MAX_TRAILING_DAYS, self.trailing_volume_days
            )));
        }
        Ok(())
    }
}

/// `Some(None)` means "explicitly unlimited"; `None` means unparsable.
fn parse_max_rows(raw: &str) -> Option<Option<usize>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") {
        return Some(None);
    }
    match raw.parse::<usize>() {
        Ok(0) => Some(None),
        Ok(n) => Some(Some(n)),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.max_rows, Some(1000));
        assert_eq!(config.price_bucket_width, 500_000.0);
        assert_eq!(config.trailing_volume_days, 30);
        assert!(!config.apply_extended_ranges);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_partial_overrides_keep_defaults() {
        let config =
            AnalyticsConfig::from_json_str(r#"{"max_rows": null, "apply_extended_ranges": true}"#)
                .unwrap();
        assert_eq!(config.max_rows, None);
        assert!(config.apply_extended_ranges);
        assert_eq!(config.price_bucket_width, DEFAULT_BUCKET_WIDTH);
    }

    #[test]
    fn test_json_rejects_zero_bucket_width() {
        let err = AnalyticsConfig::from_json_str(r#"{"price_bucket_width": 0}"#).unwrap_err();
        assert!(matches!(err, AnalyticsError::Config(_)));
    }

    #[test]
    fn test_json_rejects_out_of_range_trailing_days() {
        let err = AnalyticsConfig::from_json_str(r#"{"trailing_volume_days": 9000000000000000}"#)
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::Config(_)));

        let err = AnalyticsConfig::from_json_str(r#"{"trailing_volume_days": -1}"#).unwrap_err();
        assert!(matches!(err, AnalyticsError::Config(_)));

        let config = AnalyticsConfig::from_json_str(r#"{"trailing_volume_days": 365000}"#).unwrap();
        assert_eq!(config.trailing_volume_days, MAX_TRAILING_DAYS);
    }

    #[test]
    fn test_json_rejects_garbage() {
        let err = AnalyticsConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, AnalyticsError::JsonParse(_)));
    }

    #[test]
    fn test_parse_max_rows() {
        assert_eq!(parse_max_rows("250"), Some(Some(250)));
        assert_eq!(parse_max_rows("0"), Some(None));
        assert_eq!(parse_max_rows("None"), Some(None));
        assert_eq!(parse_max_rows("lots"), None);
    }
}
