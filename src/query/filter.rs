use chrono::Month;

use crate::models::{month_abbrev, TemperatureRecord};

/// Case-insensitive country match.
pub fn matches_country(record: &TemperatureRecord, country: &str) -> bool {
    record.is_country(country)
}

pub fn matches_month(record: &TemperatureRecord, month: Month) -> bool {
    record.month == month
}

pub fn matches_year(record: &TemperatureRecord, year: i32) -> bool {
    record.year == year
}

/// Inclusive on both ends. Bounds are Celsius.
pub fn in_range(record: &TemperatureRecord, low: f64, high: f64) -> bool {
    record.value >= low && record.value <= high
}

/// A single query dimension over a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Country(String),
    Month(Month),
    Year(i32),
    ValueRange { low: f64, high: f64 },
}

impl Predicate {
    pub fn matches(&self, record: &TemperatureRecord) -> bool {
        match self {
            Predicate::Country(country) => matches_country(record, country),
            Predicate::Month(month) => matches_month(record, *month),
            Predicate::Year(year) => matches_year(record, *year),
            Predicate::ValueRange { low, high } => in_range(record, *low, *high),
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Country(country) => write!(f, "country={}", country),
            Predicate::Month(month) => write!(f, "month={}", month_abbrev(*month)),
            Predicate::Year(year) => write!(f, "year={}", year),
            Predicate::ValueRange { low, high } => write!(f, "value in [{:.2}, {:.2}]", low, high),
        }
    }
}

/// Conjunction of predicates. An empty set matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn with_country(self, country: &str) -> Self {
        self.with(Predicate::Country(country.to_string()))
    }

    pub fn with_month(self, month: Month) -> Self {
        self.with(Predicate::Month(month))
    }

    pub fn with_year(self, year: i32) -> Self {
        self.with(Predicate::Year(year))
    }

    pub fn with_range(self, low: f64, high: f64) -> Self {
        self.with(Predicate::ValueRange { low, high })
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn matches(&self, record: &TemperatureRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Records satisfying every predicate, in input order.
    pub fn filter<'s, 'r: 's>(
        &'s self,
        records: &'r [TemperatureRecord],
    ) -> impl Iterator<Item = &'r TemperatureRecord> + 's {
        records.iter().filter(move |r| self.matches(r))
    }
}

impl std::fmt::Display for PredicateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.predicates.is_empty() {
            return write!(f, "all records");
        }
        let parts: Vec<String> = self.predicates.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(value: f64) -> TemperatureRecord {
        TemperatureRecord::new(value, 2005, Month::June, "India", "IND")
    }

    #[test]
    fn test_country_match_ignores_case() {
        assert!(matches_country(&reading(1.0), "india"));
        assert!(matches_country(&reading(1.0), "INDIA"));
        assert!(!matches_country(&reading(1.0), "Indiana"));
    }

    #[test]
    fn test_country_match_folds_accented_letters() {
        let record = TemperatureRecord::new(26.1, 2010, Month::July, "Côte d'Ivoire", "CIV");
        assert!(matches_country(&record, "CÔTE D'IVOIRE"));
        assert!(matches_country(&record, "côte d'ivoire"));
        assert!(!matches_country(&record, "COTE D'IVOIRE"));
    }

    #[test]
    fn test_range_is_inclusive() {
        assert!(in_range(&reading(5.0), 5.0, 10.0));
        assert!(in_range(&reading(10.0), 5.0, 10.0));
        assert!(in_range(&reading(7.0), 7.0, 7.0));
        assert!(!in_range(&reading(10.01), 5.0, 10.0));
    }

    #[test]
    fn test_predicate_set_conjunction() {
        let set = PredicateSet::new()
            .with_country("india")
            .with_month(Month::June)
            .with_year(2005);
        assert!(set.matches(&reading(30.0)));

        let other_year = set.clone().with_year(2006);
        assert!(!other_year.matches(&reading(30.0)));
        assert!(PredicateSet::new().matches(&reading(30.0)));
    }

    #[test]
    fn test_filter_keeps_order() {
        let records = vec![reading(3.0), reading(12.0), reading(8.0)];
        let set = PredicateSet::new().with_range(5.0, 15.0);
        let values: Vec<f64> = set.filter(&records).map(|r| r.value).collect();
        assert_eq!(values, vec![12.0, 8.0]);
    }

    #[test]
    fn test_display() {
        let set = PredicateSet::new().with_country("Peru").with_month(Month::January);
        assert_eq!(set.to_string(), "country=Peru, month=Jan");
        assert_eq!(PredicateSet::new().to_string(), "all records");
    }
}
