use chrono::Month;
use std::cmp::Ordering;

use crate::error::{AnalysisError, Result};
use crate::models::month::{month_abbrev, month_number};
use crate::models::unit::TemperatureUnit;
use crate::utils::constants::{MAX_VALID_TEMP, MIN_VALID_TEMP};

/// One monthly temperature observation for a country.
///
/// Records are totally ordered by `(value, country, year, month rank)`. The
/// country code rides along for reporting and takes no part in ordering or
/// equality, so two readings differing only by code are the same record.
#[derive(Debug, Clone)]
pub struct TemperatureRecord {
    /// Degrees Celsius.
    pub value: f64,
    pub year: i32,
    pub month: Month,
    pub country: String,
    pub country_code: String,
}

impl TemperatureRecord {
    pub fn new(
        value: f64,
        year: i32,
        month: Month,
        country: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            value,
            year,
            month,
            country: country.into(),
            country_code: country_code.into(),
        }
    }

    /// Synthetic record carrying `|second - first|` and the year gap between two readings.
    pub fn delta(first: &TemperatureRecord, second: &TemperatureRecord) -> Self {
        Self {
            value: (second.value - first.value).abs(),
            year: second.year - first.year,
            month: first.month,
            country: first.country.clone(),
            country_code: first.country_code.clone(),
        }
    }

    /// Country name comparison under Unicode lowercase folding, so
    /// "CÔTE D'IVOIRE" names the same country as "Côte d'Ivoire".
    pub fn is_country(&self, name: &str) -> bool {
        self.country == name || self.country.to_lowercase() == name.to_lowercase()
    }

    pub fn celsius(&self) -> f64 {
        self.value
    }

    pub fn fahrenheit(&self) -> f64 {
        TemperatureUnit::Fahrenheit.convert(self.value)
    }

    pub fn value_in(&self, unit: TemperatureUnit) -> f64 {
        unit.convert(self.value)
    }

    pub fn month_label(&self) -> &'static str {
        month_abbrev(self.month)
    }

    pub fn is_valid_temperature(&self) -> bool {
        self.value.is_finite() && (MIN_VALID_TEMP..=MAX_VALID_TEMP).contains(&self.value)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.is_valid_temperature() {
            return Err(AnalysisError::InvalidFormat(format!(
                "Temperature {} is outside valid range [{}, {}]",
                self.value, MIN_VALID_TEMP, MAX_VALID_TEMP
            )));
        }
        if self.country.is_empty() {
            return Err(AnalysisError::InvalidFormat(
                "Country name is empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Ord for TemperatureRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then_with(|| self.country.cmp(&other.country))
            .then_with(|| self.year.cmp(&other.year))
            .then_with(|| month_number(self.month).cmp(&month_number(other.month)))
    }
}

impl PartialOrd for TemperatureRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TemperatureRecord {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TemperatureRecord {}

impl std::fmt::Display for TemperatureRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2}°C {}/{} {} ({})",
            self.value,
            self.month_label(),
            self.year,
            self.country,
            self.country_code
        )
    }
}
