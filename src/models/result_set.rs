use serde::{Deserialize, Serialize};

use crate::models::{TemperatureRecord, TemperatureUnit};
use crate::utils::constants::{DELTAS_HEADER, READINGS_HEADER};

/// What the records of a result set hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// Actual readings.
    Readings,
    /// Synthetic change records: value is a temperature difference and year a year gap.
    Deltas,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Readings => "readings",
            ResultKind::Deltas => "deltas",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            ResultKind::Readings => READINGS_HEADER,
            ResultKind::Deltas => DELTAS_HEADER,
        }
    }
}

/// One completed query, ready for a sink.
#[derive(Debug, Clone)]
pub struct ResultSet {
    pub subject: String,
    pub kind: ResultKind,
    pub records: Vec<TemperatureRecord>,
}

impl ResultSet {
    pub fn readings(subject: impl Into<String>, records: Vec<TemperatureRecord>) -> Self {
        Self {
            subject: subject.into(),
            kind: ResultKind::Readings,
            records,
        }
    }

    pub fn deltas(subject: impl Into<String>, records: Vec<TemperatureRecord>) -> Self {
        Self {
            subject: subject.into(),
            kind: ResultKind::Deltas,
            records,
        }
    }

    pub fn rows(&self) -> Vec<ResultRow> {
        self.records
            .iter()
            .map(ResultRow::new)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Flat, display-ready form of a record, values rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub celsius: f64,
    pub fahrenheit: f64,
    pub year: i32,
    pub month: String,
    pub country: String,
    pub country_code: String,
}

impl ResultRow {
    pub fn new(record: &TemperatureRecord) -> Self {
        Self {
            celsius: round2(record.value),
            fahrenheit: round2(record.fahrenheit()),
            year: record.year,
            month: record.month_label().to_string(),
            country: record.country.clone(),
            country_code: record.country_code.clone(),
        }
    }

    pub fn value_in(&self, unit: TemperatureUnit) -> f64 {
        match unit {
            TemperatureUnit::Celsius => self.celsius,
            TemperatureUnit::Fahrenheit => self.fahrenheit,
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    #[test]
    fn test_reading_row() {
        let record = TemperatureRecord::new(21.456, 2003, Month::August, "Spain", "ESP");
        let row = ResultRow::new(&record);

        assert_eq!(row.celsius, 21.46);
        assert_eq!(row.fahrenheit, 70.62);
        assert_eq!(row.month, "Aug");
        assert_eq!(row.value_in(TemperatureUnit::Fahrenheit), 70.62);
    }

    #[test]
    fn test_delta_row_uses_record_conversion() {
        let record = TemperatureRecord::new(5.0, 1, Month::January, "India", "IND");
        let set = ResultSet::deltas("Task C1: changes", vec![record]);
        let rows = set.rows();
        let row = &rows[0];
        assert_eq!(row.celsius, 5.0);
        assert_eq!(row.fahrenheit, 41.0);
        assert_eq!(ResultKind::Deltas.header(), DELTAS_HEADER);
    }
}
