// src/domain/stats.rs

use serde::Serialize;

/// One histogram bar: prices in `(lower, upper]`, labelled with formatted currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBucket {
    pub label: String,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCount {
    pub property_type: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictPrice {
    pub district: String,
    pub avg_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictSales {
    pub district: String,
    pub sales: usize,
}

/// Headline numbers. Every field is 0 for an empty collection, never NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total_count: usize,
    pub avg_price: f64,
    pub avg_size: f64,
    /// `avg_price / avg_size`, a ratio of means rather than the mean of stored per-record values.
    pub avg_price_per_m2: f64,
    pub trailing_volume: usize,
}

/// Grouped statistics over one record collection (full dataset or a filtered view).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    /// Ascending by bucket.
    pub price_histogram: Vec<PriceBucket>,
    /// First-seen order.
    pub property_type_counts: Vec<TypeCount>,
    /// Descending by average price.
    pub district_avg_price: Vec<DistrictPrice>,
    /// Descending by sales count.
    pub district_sales_counts: Vec<DistrictSales>,
    pub summary: SummaryMetrics,
}

impl AggregateStats {
    pub fn count_for_type(&self, property_type: &str) -> Option<usize> {
        self.property_type_counts
            .iter()
            .find(|t| t.property_type == property_type)
            .map(|t| t.count)
    }
}

/// Side-by-side metrics for one property type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeComparison {
    pub property_type: String,
    pub count: usize,
    pub avg_price: f64,
    pub avg_size: f64,
    /// Total price over total size for the type.
    pub price_per_m2: f64,
    pub median_price: f64,
}

/// Percentage changes between the trailing year and the year before it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YearOverYear {
    pub price_change: f64,
    pub price_per_m2_change: f64,
    pub volume_change: f64,
}
