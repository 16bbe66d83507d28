// src/filter/engine.rs

use crate::domain::{DateWindow, FilterCriteria, PropertyRecord};
use chrono::{Months, NaiveDateTime, Utc};

/// A `FilterCriteria` prepared against a fixed "now".
///
/// A record passes when every predicate holds:
/// date window, text search (street or district, case-insensitive),
/// postcode substring, property type, inclusive price range, district.
/// Room, size and year-built ranges only apply with `extended_ranges(true)`.
#[derive(Debug, Clone)]
pub struct CompiledFilter<'a> {
    criteria: &'a FilterCriteria,
    search: String,
    cutoff: Option<NaiveDateTime>,
    extended_ranges: bool,
}

impl<'a> CompiledFilter<'a> {
    pub fn new(criteria: &'a FilterCriteria, now: NaiveDateTime) -> Self {
        Self {
            criteria,
            search: criteria.search.to_lowercase(),
            cutoff: window_cutoff(criteria.date_window, now),
            extended_ranges: false,
        }
    }

    pub fn extended_ranges(mut self, enabled: bool) -> Self {
        self.extended_ranges = enabled;
        self
    }

    pub fn matches(&self, record: &PropertyRecord) -> bool {
        self.matches_date(record)
            && self.matches_search(record)
            && self.matches_postcode(record)
            && self.matches_type(record)
            && self.criteria.price_range.contains(record.price)
            && self.matches_district(record)
            && (!self.extended_ranges || self.matches_extended(record))
    }

    /// Stable filter: matching records keep their relative order.
    pub fn apply(&self, records: &[PropertyRecord]) -> Vec<PropertyRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }

    fn matches_date(&self, record: &PropertyRecord) -> bool {
        match self.cutoff {
            None => true,
            // An unparsable date is never inside a window.
            Some(cutoff) => record.sold_at.is_some_and(|d| d >= cutoff),
        }
    }

    fn matches_search(&self, record: &PropertyRecord) -> bool {
        self.search.is_empty()
            || record.address.to_lowercase().contains(&self.search)
            || record.district.to_lowercase().contains(&self.search)
    }

    fn matches_postcode(&self, record: &PropertyRecord) -> bool {
        self.criteria.postcode.is_empty() || record.postcode.contains(&self.criteria.postcode)
    }

    fn matches_type(&self, record: &PropertyRecord) -> bool {
        self.criteria.property_types.is_empty()
            || self.criteria.property_types.contains(&record.property_type)
    }

    fn matches_district(&self, record: &PropertyRecord) -> bool {
        self.criteria.districts.is_empty() || self.criteria.districts.contains(&record.district)
    }

    fn matches_extended(&self, record: &PropertyRecord) -> bool {
        self.criteria.room_range.contains(record.rooms as f64)
            && self.criteria.size_range.contains(record.size_m2)
            && self.criteria.year_built_range.contains(record.year_built as f64)
    }
}

/// Earliest sale time inside the window: `now` minus N calendar months.
/// Day-of-month overflow clamps to the last day of the target month.
pub fn window_cutoff(window: DateWindow, now: NaiveDateTime) -> Option<NaiveDateTime> {
    match window {
        DateWindow::All => None,
        DateWindow::Months(n) => Some(
            now.checked_sub_months(Months::new(n))
                .unwrap_or(NaiveDateTime::MIN),
        ),
    }
}

pub fn filter_records(
    records: &[PropertyRecord],
    criteria: &FilterCriteria,
    now: NaiveDateTime,
) -> Vec<PropertyRecord> {
    CompiledFilter::new(criteria, now).apply(records)
}

/// `filter_records` against the current UTC time.
pub fn filter_records_now(
    records: &[PropertyRecord],
    criteria: &FilterCriteria,
) -> Vec<PropertyRecord> {
    filter_records(records, criteria, Utc::now().naive_utc())
}
