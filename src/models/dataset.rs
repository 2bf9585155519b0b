use std::collections::HashSet;

use crate::models::TemperatureRecord;

/// The full set of readings, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<TemperatureRecord>,
}

impl Dataset {
    pub fn new(records: Vec<TemperatureRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TemperatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct country names in the order they first appear.
    pub fn countries(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.country.as_str())
            .filter(|country| seen.insert(*country))
            .collect()
    }

    /// Case-insensitive lookup returning the dataset's own spelling of a country.
    pub fn resolve_country(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.records
            .iter()
            .find(|r| r.is_country(name))
            .map(|r| r.country.as_str())
    }

    /// Earliest and latest year covered, or `None` for an empty dataset.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            total_records: self.records.len(),
            countries: self.countries().len(),
            year_range: self.year_range(),
            coldest: self.records.iter().min().cloned(),
            hottest: self.records.iter().max().cloned(),
        }
    }
}

#[derive(Debug)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub countries: usize,
    pub year_range: Option<(i32, i32)>,
    pub coldest: Option<TemperatureRecord>,
    pub hottest: Option<TemperatureRecord>,
}

impl DatasetSummary {
    pub fn summary(&self) -> String {
        let years = match self.year_range {
            Some((first, last)) => format!("{} to {} ({} years)", first, last, last - first + 1),
            None => "No readings".to_string(),
        };
        let describe = |record: &Option<TemperatureRecord>| {
            record
                .as_ref()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "No valid measurements".to_string())
        };

        format!(
            "Dataset Summary:\n\
            - Records: {}\n\
            - Countries: {}\n\
            - Years: {}\n\
            - Coldest: {}\n\
            - Hottest: {}",
            self.total_records,
            self.countries,
            years,
            describe(&self.coldest),
            describe(&self.hottest)
        )
    }
}
