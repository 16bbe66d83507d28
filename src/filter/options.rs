// src/filter/options.rs

use crate::domain::{PropertyRecord, ValueRange};
use serde::Serialize;
use std::collections::BTreeSet;

/// Choices offered by the filter panel, derived from the loaded dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Min/max over non-zero prices.
    pub price_bounds: Option<ValueRange>,
    /// Min/max over non-zero room counts.
    pub room_bounds: Option<(u32, u32)>,
    /// Sorted, unique, non-empty.
    pub districts: Vec<String>,
    /// Sorted, unique, non-empty.
    pub property_types: Vec<String>,
}

pub fn filter_options(records: &[PropertyRecord]) -> FilterOptions {
    let price_bounds = records
        .iter()
        .map(|r| r.price)
        .filter(|p| *p != 0.0)
        .fold(None, |acc: Option<ValueRange>, p| match acc {
            None => Some(ValueRange::new(p, p)),
            Some(r) => Some(ValueRange::new(r.min.min(p), r.max.max(p))),
        });

    let rooms = records.iter().map(|r| r.rooms).filter(|r| *r != 0);
    let room_bounds = rooms
        .clone()
        .min()
        .zip(rooms.max());

    FilterOptions {
        price_bounds,
        room_bounds,
        districts: sorted_unique(records.iter().map(|r| r.district.as_str())),
        property_types: sorted_unique(records.iter().map(|r| r.property_type.as_str())),
    }
}

fn sorted_unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
