//! Sales analytics core for property transaction dashboards.
//!
//! Raw rows go through address parsing and normalization once per load;
//! every filter change then produces a fresh filtered view with its own
//! aggregates, while baseline aggregates for the full dataset are cached.

pub mod analytics;
pub mod config;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod source;
pub mod spreadsheets;

#[cfg(test)]
mod tests;

pub use analytics::{aggregate, Aggregator, DatasetFingerprint, StatsCache};
pub use config::AnalyticsConfig;
pub use domain::{
    AggregateStats, DateWindow, FilterCriteria, PropertyRecord, RawField, RawRecord, ValueRange,
};
pub use errors::{AnalyticsError, AnalyticsResult};
pub use filter::{filter_records, CompiledFilter, FilterOptions};
pub use normalize::{
    normalize, parse_address, CurrencyFormat, DanishKroner, Normalizer, ParsedAddress,
};
pub use pipeline::{Dashboard, FilteredView};
pub use source::{InMemorySource, JsonSource, RecordSource};
