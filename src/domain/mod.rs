pub mod criteria;
pub mod record;
pub mod stats;

pub use criteria::{DateWindow, FilterCriteria, ValueRange};
pub use record::{PropertyRecord, RawField, RawRecord};
pub use stats::{
    AggregateStats, DistrictPrice, DistrictSales, PriceBucket, SummaryMetrics, TypeComparison,
    TypeCount, YearOverYear,
};
