// src/tests/property_tests.rs
//
// Invariants that must hold for any input, checked over the sample dataset
// and a spread of criteria.

use super::utils::{fixed_now, sample_rows};
use crate::analytics::aggregate;
use crate::domain::{DateWindow, FilterCriteria, ValueRange};
use crate::filter::filter_records;
use crate::normalize::{normalize, Normalizer};

fn criteria_grid() -> Vec<FilterCriteria> {
    let base = FilterCriteria::default();
    let mut grid = vec![
        base.clone(),
        FilterCriteria::match_all(),
        FilterCriteria {
            search: "KØBENHAVN".to_string(),
            ..base.clone()
        },
        FilterCriteria {
            postcode: "22".to_string(),
            date_window: DateWindow::All,
            ..base.clone()
        },
        FilterCriteria {
            price_range: ValueRange::new(5_000_000.0, 1_000_000.0),
            ..base.clone()
        },
        FilterCriteria {
            date_window: DateWindow::Months(3),
            ..base.clone()
        },
    ];

    let mut typed = FilterCriteria::match_all();
    typed.toggle_property_type("Ejerlejlighed");
    typed.toggle_district("København N");
    grid.push(typed);
    grid
}

#[test]
fn normalize_is_deterministic() {
    let normalizer = Normalizer::new();
    for raw in sample_rows() {
        assert_eq!(normalizer.normalize(&raw), normalize(&raw));
        assert_eq!(normalize(&raw), normalize(&raw));
    }
}

#[test]
fn filter_output_is_ordered_subset() {
    let records = Normalizer::new().normalize_all(&sample_rows());

    for criteria in criteria_grid() {
        let out = filter_records(&records, &criteria, fixed_now());
        assert!(out.len() <= records.len());

        // every output record appears in the input, in the same relative order
        let mut cursor = 0;
        for r in &out {
            let pos = records[cursor..]
                .iter()
                .position(|candidate| candidate == r)
                .expect("filtered record missing from input");
            cursor += pos + 1;
        }
    }
}

#[test]
fn inverted_price_range_matches_nothing() {
    let records = Normalizer::new().normalize_all(&sample_rows());
    let criteria = FilterCriteria {
        price_range: ValueRange::new(5_000_000.0, 1_000_000.0),
        date_window: DateWindow::All,
        ..FilterCriteria::default()
    };
    assert!(filter_records(&records, &criteria, fixed_now()).is_empty());
}

#[test]
fn aggregates_never_contain_nan() {
    let records = Normalizer::new().normalize_all(&sample_rows());

    for criteria in criteria_grid() {
        let view = filter_records(&records, &criteria, fixed_now());
        let stats = aggregate(&view, fixed_now());
        let s = &stats.summary;

        assert_eq!(s.total_count, view.len());
        for value in [s.avg_price, s.avg_size, s.avg_price_per_m2] {
            assert!(value.is_finite(), "non-finite summary value for {criteria:?}");
        }
        assert!(stats.district_avg_price.iter().all(|d| d.avg_price.is_finite()));
        assert_eq!(
            stats.price_histogram.iter().map(|b| b.count).sum::<usize>(),
            view.len()
        );
    }
}

#[test]
fn aggregate_does_not_reorder_input() {
    let records = Normalizer::new().normalize_all(&sample_rows());
    let before = records.clone();
    let _ = aggregate(&records, fixed_now());
    assert_eq!(records, before);
}

#[test]
fn rankings_are_sorted_descending() {
    let records = Normalizer::new().normalize_all(&sample_rows());
    let stats = aggregate(&records, fixed_now());

    assert!(stats
        .district_avg_price
        .windows(2)
        .all(|w| w[0].avg_price >= w[1].avg_price));
    assert!(stats
        .district_sales_counts
        .windows(2)
        .all(|w| w[0].sales >= w[1].sales));
    assert!(stats
        .price_histogram
        .windows(2)
        .all(|w| w[0].lower < w[1].lower));
}
