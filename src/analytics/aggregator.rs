// src/analytics/aggregator.rs

use crate::analytics::group_first_seen;
use crate::config::{AnalyticsConfig, DEFAULT_BUCKET_WIDTH, DEFAULT_TRAILING_DAYS};
use crate::domain::{
    AggregateStats, DistrictPrice, DistrictSales, PriceBucket, PropertyRecord, SummaryMetrics,
    TypeCount,
};
use crate::normalize::{CurrencyFormat, DanishKroner};
use chrono::{Duration, NaiveDateTime, Utc};
use log::debug;
use std::collections::BTreeMap;

/// Computes grouped statistics over a record collection.
///
/// Pure: the same records and `now` always give the same stats, and the
/// input slice is never reordered.
pub struct Aggregator<'a> {
    formatter: &'a dyn CurrencyFormat,
    bucket_width: f64,
    trailing_days: i64,
}

impl<'a> Aggregator<'a> {
    pub fn new(formatter: &'a dyn CurrencyFormat) -> Self {
        Self {
            formatter,
            bucket_width: DEFAULT_BUCKET_WIDTH,
            trailing_days: DEFAULT_TRAILING_DAYS,
        }
    }

    pub fn from_config(formatter: &'a dyn CurrencyFormat, config: &AnalyticsConfig) -> Self {
        Self {
            formatter,
            bucket_width: config.price_bucket_width,
            trailing_days: config.trailing_volume_days,
        }
    }

    pub fn aggregate(&self, records: &[PropertyRecord], now: NaiveDateTime) -> AggregateStats {
        AggregateStats {
            price_histogram: self.price_histogram(records),
            property_type_counts: property_type_counts(records),
            district_avg_price: district_avg_price(records),
            district_sales_counts: district_sales_counts(records),
            summary: self.summary(records, now),
        }
    }

    /// Fixed-width buckets, ascending. A price equal to a bucket's upper bound
    /// belongs to that bucket, so 500 000 falls in "0 - 500 000" and 500 001 in
    /// the next one. Zero (and anything below) lands in the first bucket.
    pub fn price_histogram(&self, records: &[PropertyRecord]) -> Vec<PriceBucket> {
        let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
        for record in records {
            *counts.entry(self.bucket_index(record.price)).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .map(|(index, count)| {
                let lower = index as f64 * self.bucket_width;
                let upper = lower + self.bucket_width;
                PriceBucket {
                    label: format!(
                        "{} - {}",
                        self.formatter.format(lower),
                        self.formatter.format(upper)
                    ),
                    lower,
                    upper,
                    count,
                }
            })
            .collect()
    }

    /// Bucket index for `price`. The float-to-int cast saturates, so prices
    /// beyond `u64::MAX` buckets all share the last bucket.
    pub fn bucket_index(&self, price: f64) -> u64 {
        if !price.is_finite() || price <= 0.0 {
            return 0;
        }
        let buckets = (price / self.bucket_width).ceil();
        if buckets >= u64::MAX as f64 {
            debug!("price {} exceeds the histogram range, clamping", price);
        }
        (buckets as u64).saturating_sub(1)
    }

    pub fn summary(&self, records: &[PropertyRecord], now: NaiveDateTime) -> SummaryMetrics {
        let total_count = records.len();
        if total_count == 0 {
            return SummaryMetrics::default();
        }

        let n = total_count as f64;
        let avg_price = records.iter().map(|r| r.price).sum::<f64>() / n;
        let avg_size = records.iter().map(|r| r.size_m2).sum::<f64>() / n;
        let avg_price_per_m2 = if avg_size > 0.0 { avg_price / avg_size } else { 0.0 };

        let cutoff = Duration::try_days(self.trailing_days)
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(NaiveDateTime::MIN);
        let trailing_volume = records
            .iter()
            .filter(|r| r.sold_at.is_some_and(|d| d >= cutoff))
            .count();

        SummaryMetrics {
            total_count,
            avg_price,
            avg_size,
            avg_price_per_m2,
            trailing_volume,
        }
    }
}

/// Aggregates with default bucket width, trailing window and Danish formatting.
pub fn aggregate(records: &[PropertyRecord], now: NaiveDateTime) -> AggregateStats {
    Aggregator::new(&DanishKroner).aggregate(records, now)
}

pub fn aggregate_now(records: &[PropertyRecord]) -> AggregateStats {
    aggregate(records, Utc::now().naive_utc())
}

pub fn property_type_counts(records: &[PropertyRecord]) -> Vec<TypeCount> {
    group_first_seen(records, |r| r.property_type.as_str(), |count: &mut usize, _| *count += 1)
        .into_iter()
        .map(|(property_type, count)| TypeCount {
            property_type: property_type.to_string(),
            count,
        })
        .collect()
}

/// Districts ranked by mean price, highest first. Ties keep first-seen order.
pub fn district_avg_price(records: &[PropertyRecord]) -> Vec<DistrictPrice> {
    let mut ranked: Vec<DistrictPrice> = group_first_seen(
        records,
        |r| r.district.as_str(),
        |acc: &mut (f64, usize), r| {
            acc.0 += r.price;
            acc.1 += 1;
        },
    )
    .into_iter()
    .map(|(district, (total, count))| DistrictPrice {
        district: district.to_string(),
        avg_price: total / count as f64,
    })
    .collect();

    ranked.sort_by(|a, b| b.avg_price.total_cmp(&a.avg_price));
    ranked
}

/// Districts ranked by number of sales, highest first. Ties keep first-seen order.
pub fn district_sales_counts(records: &[PropertyRecord]) -> Vec<DistrictSales> {
    let mut ranked: Vec<DistrictSales> =
        group_first_seen(records, |r| r.district.as_str(), |count: &mut usize, _| *count += 1)
            .into_iter()
            .map(|(district, sales)| DistrictSales {
                district: district.to_string(),
                sales,
            })
            .collect();

    ranked.sort_by(|a, b| b.sales.cmp(&a.sales));
    ranked
}
