use chrono::Month;

use crate::error::{AnalysisError, Result};
use crate::models::TemperatureRecord;
use crate::query::filter::PredicateSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Min,
    Max,
}

/// Which of several equally extreme records wins, by dataset order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    First,
    Last,
}

impl Extremum {
    /// True when `candidate` should replace `best` under this tie-break policy.
    fn improves(&self, candidate: f64, best: f64, tie_break: TieBreak) -> bool {
        match (self, tie_break) {
            (Extremum::Min, TieBreak::Last) => candidate <= best,
            (Extremum::Min, TieBreak::First) => candidate < best,
            (Extremum::Max, TieBreak::Last) => candidate >= best,
            (Extremum::Max, TieBreak::First) => candidate > best,
        }
    }
}

/// Single pass over `records`, returning the minimum or maximum matching record.
///
/// Only the value is compared; equal values are resolved by `tie_break`
/// against dataset order rather than by the record total order.
pub fn find_extremum<'a>(
    records: &'a [TemperatureRecord],
    predicates: &PredicateSet,
    extremum: Extremum,
    tie_break: TieBreak,
) -> Result<&'a TemperatureRecord> {
    let mut best: Option<&TemperatureRecord> = None;

    for record in predicates.filter(records) {
        best = match best {
            Some(current) if !extremum.improves(record.value, current.value, tie_break) => {
                Some(current)
            }
            _ => Some(record),
        };
    }

    best.ok_or_else(|| AnalysisError::NoMatch {
        criteria: predicates.to_string(),
    })
}

/// The reading for one (country, month, year) cell. If the dataset holds
/// more than one, the last in dataset order is returned.
pub fn find_exact<'a>(
    records: &'a [TemperatureRecord],
    country: &str,
    month: Month,
    year: i32,
) -> Result<&'a TemperatureRecord> {
    let predicates = PredicateSet::new()
        .with_country(country)
        .with_month(month)
        .with_year(year);

    predicates
        .filter(records)
        .last()
        .ok_or_else(|| AnalysisError::NoMatch {
            criteria: predicates.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<TemperatureRecord> {
        vec![
            TemperatureRecord::new(4.0, 2000, Month::January, "Peru", "PER"),
            TemperatureRecord::new(-2.0, 2001, Month::January, "Peru", "PER"),
            TemperatureRecord::new(9.0, 2002, Month::January, "Peru", "PER"),
            TemperatureRecord::new(-2.0, 2003, Month::January, "Peru", "PER"),
            TemperatureRecord::new(9.0, 2004, Month::January, "Peru", "PER"),
            TemperatureRecord::new(-30.0, 2000, Month::January, "Canada", "CAN"),
            TemperatureRecord::new(20.0, 2000, Month::July, "Peru", "PER"),
        ]
    }

    #[test]
    fn test_min_and_max_for_country_month() {
        let data = records();
        let set = PredicateSet::new().with_country("peru").with_month(Month::January);

        let min = find_extremum(&data, &set, Extremum::Min, TieBreak::Last).unwrap();
        assert_eq!(min.value, -2.0);
        let max = find_extremum(&data, &set, Extremum::Max, TieBreak::Last).unwrap();
        assert_eq!(max.value, 9.0);
    }

    #[test]
    fn test_tie_break_last_and_first() {
        let data = records();
        let set = PredicateSet::new().with_country("Peru").with_month(Month::January);

        let last_min = find_extremum(&data, &set, Extremum::Min, TieBreak::Last).unwrap();
        assert_eq!(last_min.year, 2003);
        let first_min = find_extremum(&data, &set, Extremum::Min, TieBreak::First).unwrap();
        assert_eq!(first_min.year, 2001);

        let last_max = find_extremum(&data, &set, Extremum::Max, TieBreak::Last).unwrap();
        assert_eq!(last_max.year, 2004);
        let first_max = find_extremum(&data, &set, Extremum::Max, TieBreak::First).unwrap();
        assert_eq!(first_max.year, 2002);
    }

    #[test]
    fn test_result_bounds_every_match() {
        let data = records();
        let set = PredicateSet::new().with_country("Peru");
        let min = find_extremum(&data, &set, Extremum::Min, TieBreak::Last).unwrap();
        let max = find_extremum(&data, &set, Extremum::Max, TieBreak::Last).unwrap();

        for record in set.filter(&data) {
            assert!(min.value <= record.value);
            assert!(max.value >= record.value);
        }
    }

    #[test]
    fn test_max_of_all_negative_values() {
        let data = vec![
            TemperatureRecord::new(-12.0, 2000, Month::January, "Russia", "RUS"),
            TemperatureRecord::new(-7.5, 2001, Month::January, "Russia", "RUS"),
        ];
        let set = PredicateSet::new().with_country("Russia");
        let max = find_extremum(&data, &set, Extremum::Max, TieBreak::Last).unwrap();
        assert_eq!(max.value, -7.5);
    }

    #[test]
    fn test_no_match_is_an_error() {
        let data = records();
        let set = PredicateSet::new().with_country("Chile");
        let err = find_extremum(&data, &set, Extremum::Min, TieBreak::Last).unwrap_err();
        assert!(matches!(err, AnalysisError::NoMatch { .. }));

        let empty: Vec<TemperatureRecord> = Vec::new();
        assert!(find_extremum(&empty, &PredicateSet::new(), Extremum::Max, TieBreak::First).is_err());
    }

    #[test]
    fn test_find_exact() {
        let data = records();
        let found = find_exact(&data, "PERU", Month::January, 2002).unwrap();
        assert_eq!(found.value, 9.0);

        let err = find_exact(&data, "Peru", Month::March, 2002).unwrap_err();
        assert!(err.to_string().contains("month=Mar"));
    }
}
