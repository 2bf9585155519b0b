use chrono::Month;
use std::collections::BTreeSet;
use tracing::debug;

use crate::analyzers::delta::DeltaAnalyzer;
use crate::analyzers::ranking::{highest_n, lowest_n};
use crate::analyzers::reducer::PerCountryReducer;
use crate::error::Result;
use crate::models::{Dataset, TemperatureRecord};
use crate::query::{country_range, find_extremum, Extremum, PredicateSet, TieBreak};
use crate::utils::constants::DEFAULT_TOP_N;

/// Country extremum tasks keep the last of several equal readings.
const EXTREMUM_TIE_BREAK: TieBreak = TieBreak::Last;

/// Report-level queries over a loaded dataset.
///
/// All temperatures going in and out are Celsius.
pub struct ClimateAnalyzer<'a> {
    dataset: &'a Dataset,
    top_n: usize,
    reducer: PerCountryReducer,
}

impl<'a> ClimateAnalyzer<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            top_n: DEFAULT_TOP_N,
            reducer: PerCountryReducer::sequential(),
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.reducer = PerCountryReducer::new(max_workers);
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    fn extremum(&self, predicates: &PredicateSet, extremum: Extremum) -> Result<TemperatureRecord> {
        find_extremum(self.dataset.records(), predicates, extremum, EXTREMUM_TIE_BREAK).cloned()
    }

    pub fn lowest_by_month(&self, country: &str, month: Month) -> Result<TemperatureRecord> {
        let predicates = PredicateSet::new().with_country(country).with_month(month);
        self.extremum(&predicates, Extremum::Min)
    }

    pub fn highest_by_month(&self, country: &str, month: Month) -> Result<TemperatureRecord> {
        let predicates = PredicateSet::new().with_country(country).with_month(month);
        self.extremum(&predicates, Extremum::Max)
    }

    pub fn lowest_by_year(&self, country: &str, year: i32) -> Result<TemperatureRecord> {
        let predicates = PredicateSet::new().with_country(country).with_year(year);
        self.extremum(&predicates, Extremum::Min)
    }

    pub fn highest_by_year(&self, country: &str, year: i32) -> Result<TemperatureRecord> {
        let predicates = PredicateSet::new().with_country(country).with_year(year);
        self.extremum(&predicates, Extremum::Max)
    }

    /// Lowest reading for a country across every month and year.
    pub fn lowest_for_country(&self, country: &str) -> Result<TemperatureRecord> {
        self.extremum(&PredicateSet::new().with_country(country), Extremum::Min)
    }

    /// Highest reading for a country across every month and year.
    pub fn highest_for_country(&self, country: &str) -> Result<TemperatureRecord> {
        self.extremum(&PredicateSet::new().with_country(country), Extremum::Max)
    }

    /// Readings for one country within `[low, high]`. An empty set is a valid outcome.
    pub fn within_range(&self, country: &str, low: f64, high: f64) -> BTreeSet<TemperatureRecord> {
        country_range(self.dataset.records(), country, low, high)
    }

    pub fn top_lowest_by_month(&self, month: Month) -> Result<Vec<TemperatureRecord>> {
        let per_country = self
            .reducer
            .reduce(self.dataset, |country| self.lowest_by_month(country, month))?;
        lowest_n(per_country, self.top_n)
    }

    pub fn top_highest_by_month(&self, month: Month) -> Result<Vec<TemperatureRecord>> {
        let per_country = self
            .reducer
            .reduce(self.dataset, |country| self.highest_by_month(country, month))?;
        highest_n(per_country, self.top_n)
    }

    pub fn top_lowest_overall(&self) -> Result<Vec<TemperatureRecord>> {
        let per_country = self
            .reducer
            .reduce(self.dataset, |country| self.lowest_for_country(country))?;
        lowest_n(per_country, self.top_n)
    }

    pub fn top_highest_overall(&self) -> Result<Vec<TemperatureRecord>> {
        let per_country = self
            .reducer
            .reduce(self.dataset, |country| self.highest_for_country(country))?;
        highest_n(per_country, self.top_n)
    }

    /// Every country's readings within `[low, high]`, merged in ascending order.
    pub fn all_within_range(&self, low: f64, high: f64) -> Result<Vec<TemperatureRecord>> {
        let groups = self
            .reducer
            .reduce(self.dataset, |country| Ok(self.within_range(country, low, high)))?;

        let mut merged: Vec<TemperatureRecord> = groups.into_iter().flatten().collect();
        merged.sort();
        debug!(matches = merged.len(), low, high, "Collected readings within range");
        Ok(merged)
    }

    /// Countries with the largest change in `month` between the two years, ascending.
    pub fn top_deltas(&self, month: Month, year1: i32, year2: i32) -> Result<Vec<TemperatureRecord>> {
        let candidates = self.dataset.countries();
        DeltaAnalyzer::new(self.dataset.records()).top_deltas(
            &candidates,
            month,
            year1,
            year2,
            self.top_n,
        )
    }
}
