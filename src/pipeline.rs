// src/pipeline.rs

use crate::analytics::{
    type_comparison, year_over_year, Aggregator, DatasetFingerprint, StatsCache,
};
use crate::config::AnalyticsConfig;
use crate::domain::{
    AggregateStats, FilterCriteria, PropertyRecord, TypeComparison, YearOverYear,
};
use crate::errors::AnalyticsResult;
use crate::filter::{filter_options, CompiledFilter, FilterOptions};
use crate::normalize::{CurrencyFormat, DanishKroner, Normalizer};
use crate::source::RecordSource;
use crate::spreadsheets::export_records_xlsx;
use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::Serialize;

/// Records matching one set of criteria, with stats computed over just those records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredView {
    pub records: Vec<PropertyRecord>,
    pub stats: AggregateStats,
}

/// Pipeline entry point: source → row cap → normalize → baseline stats,
/// then fresh filtered views on demand.
///
/// The normalized records are read-only after a load; `reload` swaps them out.
pub struct Dashboard<F: CurrencyFormat = DanishKroner> {
    config: AnalyticsConfig,
    normalizer: Normalizer<F>,
    fingerprint: DatasetFingerprint,
    records: Vec<PropertyRecord>,
    loaded_at: NaiveDateTime,
    cache: StatsCache,
}

impl Dashboard<DanishKroner> {
    pub fn load(
        source: &dyn RecordSource,
        config: AnalyticsConfig,
        now: NaiveDateTime,
    ) -> AnalyticsResult<Self> {
        Self::load_with_formatter(source, config, DanishKroner, now)
    }
}

impl<F: CurrencyFormat> Dashboard<F> {
    pub fn load_with_formatter(
        source: &dyn RecordSource,
        config: AnalyticsConfig,
        formatter: F,
        now: NaiveDateTime,
    ) -> AnalyticsResult<Self> {
        config.validate()?;

        let mut dashboard = Self {
            config,
            normalizer: Normalizer::with_formatter(formatter),
            fingerprint: DatasetFingerprint::of(&[]),
            records: Vec::new(),
            loaded_at: now,
            cache: StatsCache::new(),
        };
        dashboard.reload(source, now)?;
        Ok(dashboard)
    }

    /// Pulls a fresh dataset from `source`. Baseline stats are recomputed only
    /// when the content differs from what is already loaded.
    pub fn reload(
        &mut self,
        source: &dyn RecordSource,
        now: NaiveDateTime,
    ) -> AnalyticsResult<()> {
        let mut rows = source.load()?;

        if let Some(max) = self.config.max_rows {
            if rows.len() > max {
                debug!(
                    "{}: capping {} rows to the first {}",
                    source.name(),
                    rows.len(),
                    max
                );
                rows.truncate(max);
            }
        }
        if rows.is_empty() {
            warn!("{}: no rows loaded", source.name());
        }

        let fingerprint = DatasetFingerprint::of(&rows);
        if fingerprint != self.fingerprint || self.cache.get(&fingerprint).is_none() {
            self.records = self.normalizer.normalize_all(&rows);
            self.fingerprint = fingerprint;
            self.loaded_at = now;
        }
        debug!(
            "{}: {} records loaded (dataset {})",
            source.name(),
            self.records.len(),
            self.fingerprint
        );

        self.baseline();
        Ok(())
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn fingerprint(&self) -> &DatasetFingerprint {
        &self.fingerprint
    }

    /// Stats over the full dataset, computed once per distinct load.
    pub fn baseline(&mut self) -> &AggregateStats {
        let records = &self.records;
        let config = &self.config;
        let formatter = self.normalizer.formatter();
        let at = self.loaded_at;

        self.cache.get_or_compute(&self.fingerprint, || {
            Aggregator::from_config(formatter, config).aggregate(records, at)
        })
    }

    /// How often baseline stats have been computed over this dashboard's lifetime.
    pub fn baseline_computations(&self) -> usize {
        self.cache.computations()
    }

    pub fn filter(&self, criteria: &FilterCriteria, now: NaiveDateTime) -> Vec<PropertyRecord> {
        CompiledFilter::new(criteria, now)
            .extended_ranges(self.config.apply_extended_ranges)
            .apply(&self.records)
    }

    /// Filters and aggregates from scratch. Nothing about the view is cached.
    pub fn view(&self, criteria: &FilterCriteria, now: NaiveDateTime) -> FilteredView {
        let records = self.filter(criteria, now);
        let stats = self.aggregator().aggregate(&records, now);
        FilteredView { records, stats }
    }

    pub fn filter_options(&self) -> FilterOptions {
        filter_options(&self.records)
    }

    pub fn type_comparison(
        &self,
        criteria: &FilterCriteria,
        now: NaiveDateTime,
    ) -> Vec<TypeComparison> {
        type_comparison(&self.filter(criteria, now))
    }

    /// Year-over-year changes across the whole dataset.
    pub fn year_over_year(&self, now: NaiveDateTime) -> YearOverYear {
        year_over_year(&self.records, now)
    }

    /// The filtered view as an XLSX workbook, in memory.
    pub fn export_xlsx(
        &self,
        criteria: &FilterCriteria,
        now: NaiveDateTime,
    ) -> AnalyticsResult<Vec<u8>> {
        export_records_xlsx(&self.filter(criteria, now))
    }

    fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::from_config(self.normalizer.formatter(), &self.config)
    }
}
