pub mod aggregator;
pub mod cache;
pub mod comparison;

pub use aggregator::{
    aggregate, aggregate_now, district_avg_price, district_sales_counts, property_type_counts,
    Aggregator,
};
pub use cache::{DatasetFingerprint, StatsCache};
pub use comparison::{percent_change, type_comparison, year_over_year};

use crate::domain::PropertyRecord;
use std::collections::HashMap;

/// Folds records into groups keyed by `key`, returned in first-seen key order.
pub(crate) fn group_first_seen<'r, A, K, F>(
    records: &'r [PropertyRecord],
    key: K,
    mut fold: F,
) -> Vec<(&'r str, A)>
where
    A: Default,
    K: Fn(&'r PropertyRecord) -> &'r str,
    F: FnMut(&mut A, &'r PropertyRecord),
{
    let mut index: HashMap<&'r str, usize> = HashMap::new();
    let mut groups: Vec<(&'r str, A)> = Vec::new();

    for record in records {
        let k = key(record);
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push((k, A::default()));
            groups.len() - 1
        });
        fold(&mut groups[slot].1, record);
    }

    groups
}
