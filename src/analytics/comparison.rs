// src/analytics/comparison.rs

use crate::analytics::group_first_seen;
use crate::domain::{PropertyRecord, TypeComparison, YearOverYear};
use chrono::{Months, NaiveDateTime};

#[derive(Default)]
struct TypeTotals {
    total_price: f64,
    total_size: f64,
    prices: Vec<f64>,
}

/// Per-type averages, price per m² and median price, in first-seen type order.
pub fn type_comparison(records: &[PropertyRecord]) -> Vec<TypeComparison> {
    group_first_seen(records, |r| r.property_type.as_str(), |acc: &mut TypeTotals, r| {
        acc.total_price += r.price;
        acc.total_size += r.size_m2;
        acc.prices.push(r.price);
    })
    .into_iter()
    .map(|(property_type, mut totals)| {
        let count = totals.prices.len();
        totals.prices.sort_by(f64::total_cmp);
        TypeComparison {
            property_type: property_type.to_string(),
            count,
            avg_price: totals.total_price / count as f64,
            avg_size: totals.total_size / count as f64,
            price_per_m2: if totals.total_size > 0.0 {
                totals.total_price / totals.total_size
            } else {
                0.0
            },
            // upper median for even counts
            median_price: totals.prices[count / 2],
        }
    })
    .collect()
}

/// Compares the last twelve months against the twelve before them.
///
/// Current year: sold after `now - 12 months`.
/// Previous year: sold in `(now - 24 months, now - 12 months]`.
/// Price per m² here is the mean of the stored per-record values.
pub fn year_over_year(records: &[PropertyRecord], now: NaiveDateTime) -> YearOverYear {
    let one_year_ago = now
        .checked_sub_months(Months::new(12))
        .unwrap_or(NaiveDateTime::MIN);
    let two_years_ago = now
        .checked_sub_months(Months::new(24))
        .unwrap_or(NaiveDateTime::MIN);

    let current: Vec<&PropertyRecord> = records
        .iter()
        .filter(|r| r.sold_at.is_some_and(|d| d > one_year_ago))
        .collect();
    let previous: Vec<&PropertyRecord> = records
        .iter()
        .filter(|r| r.sold_at.is_some_and(|d| d <= one_year_ago && d > two_years_ago))
        .collect();

    YearOverYear {
        price_change: percent_change(
            mean(current.iter().map(|r| r.price)),
            mean(previous.iter().map(|r| r.price)),
        ),
        price_per_m2_change: percent_change(
            mean(current.iter().map(|r| r.price_per_m2)),
            mean(previous.iter().map(|r| r.price_per_m2)),
        ),
        volume_change: percent_change(current.len() as f64, previous.len() as f64),
    }
}

/// Percentage change from `previous` to `current`; 0 when there is no baseline.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}
