// errors.rs
use std::fmt;

/// Errors from the edges of the pipeline (data sources, configuration,
/// exports). Parsing, filtering and aggregation never fail; they degrade
/// to best-effort output instead.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    Source(String),
    JsonParse(String),
    Config(String),
    XlsxError(String),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl fmt::Display for AnalyticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsError::Source(msg) => write!(f, "Data source error: {msg}"),
            AnalyticsError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            AnalyticsError::Config(msg) => write!(f, "Invalid configuration: {msg}"),
            AnalyticsError::XlsxError(msg) => write!(f, "Spreadsheet export error: {msg}"),
        }
    }
}

impl std::error::Error for AnalyticsError {}

impl From<serde_json::Error> for AnalyticsError {
    fn from(e: serde_json::Error) -> Self {
        AnalyticsError::JsonParse(e.to_string())
    }
}
