use chrono::Month;
use std::collections::HashSet;
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::models::TemperatureRecord;
use crate::query::find_exact;

/// Change detection between two years of the same month.
///
/// A delta is `|value(year2) - value(year1)|` for one country, packaged as a
/// synthetic record whose year is `year2 - year1`. The years may be given in
/// either order.
pub struct DeltaAnalyzer<'a> {
    records: &'a [TemperatureRecord],
}

impl<'a> DeltaAnalyzer<'a> {
    pub fn new(records: &'a [TemperatureRecord]) -> Self {
        Self { records }
    }

    /// Delta for one country. Fails with `NoMatch` if either reading is missing.
    pub fn country_delta(
        &self,
        country: &str,
        month: Month,
        year1: i32,
        year2: i32,
    ) -> Result<TemperatureRecord> {
        let first = find_exact(self.records, country, month, year1)?;
        let second = find_exact(self.records, country, month, year2)?;
        Ok(TemperatureRecord::delta(first, second))
    }

    /// Largest delta among `candidates` not in `excluded`.
    ///
    /// Comparison is strict, so among equal deltas the earliest candidate
    /// wins. Returns `None` once every candidate is excluded.
    pub fn largest_delta<'c>(
        &self,
        candidates: &[&'c str],
        excluded: &HashSet<&'c str>,
        month: Month,
        year1: i32,
        year2: i32,
    ) -> Result<Option<(&'c str, TemperatureRecord)>> {
        let deltas = self.deltas_for(candidates, month, year1, year2)?;
        Ok(select_largest(&deltas, excluded).map(|(country, delta)| (country, delta.clone())))
    }

    /// The `n` countries with the largest delta, in ascending delta order.
    ///
    /// Selection is greedy: pick the current maximum, exclude its country,
    /// repeat. The candidate list itself is never modified.
    pub fn top_deltas(
        &self,
        candidates: &[&str],
        month: Month,
        year1: i32,
        year2: i32,
        n: usize,
    ) -> Result<Vec<TemperatureRecord>> {
        let distinct: HashSet<&str> = candidates.iter().copied().collect();
        if distinct.len() < n {
            return Err(AnalysisError::InsufficientData {
                requested: n,
                available: distinct.len(),
            });
        }

        let deltas = self.deltas_for(candidates, month, year1, year2)?;
        let mut excluded: HashSet<&str> = HashSet::with_capacity(n);
        let mut ranked = Vec::with_capacity(n);

        for _ in 0..n {
            let (country, delta) =
                select_largest(&deltas, &excluded).ok_or(AnalysisError::InsufficientData {
                    requested: n,
                    available: ranked.len(),
                })?;
            debug!(country, delta = delta.value, rank = ranked.len() + 1, "Selected delta");
            excluded.insert(country);
            ranked.push(delta.clone());
        }

        ranked.reverse();
        Ok(ranked)
    }

    fn deltas_for<'c>(
        &self,
        candidates: &[&'c str],
        month: Month,
        year1: i32,
        year2: i32,
    ) -> Result<Vec<(&'c str, TemperatureRecord)>> {
        candidates
            .iter()
            .map(|&country| {
                self.country_delta(country, month, year1, year2)
                    .map(|delta| (country, delta))
            })
            .collect()
    }
}

fn select_largest<'d, 'c>(
    deltas: &'d [(&'c str, TemperatureRecord)],
    excluded: &HashSet<&'c str>,
) -> Option<(&'c str, &'d TemperatureRecord)> {
    let mut best: Option<(&'c str, &'d TemperatureRecord)> = None;

    for (country, delta) in deltas {
        if excluded.contains(country) {
            continue;
        }
        match best {
            Some((_, current)) if delta.value <= current.value => {}
            _ => best = Some((*country, delta)),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reading(value: f64, year: i32, country: &str) -> TemperatureRecord {
        TemperatureRecord::new(value, year, Month::January, country, &country[..3].to_uppercase())
    }

    fn records() -> Vec<TemperatureRecord> {
        vec![
            reading(10.0, 2000, "India"),
            reading(15.0, 2001, "India"),
            reading(-4.0, 2000, "Canada"),
            reading(-12.0, 2001, "Canada"),
            reading(20.0, 2000, "Brazil"),
            reading(21.0, 2001, "Brazil"),
            reading(3.0, 2000, "Norway"),
            reading(8.0, 2001, "Norway"),
        ]
    }

    #[test]
    fn test_single_country_delta() {
        let data = vec![reading(10.0, 2000, "India"), reading(15.0, 2001, "India")];
        let analyzer = DeltaAnalyzer::new(&data);
        let delta = analyzer.country_delta("India", Month::January, 2000, 2001).unwrap();

        assert_eq!(delta.value, 5.0);
        assert_eq!(delta.year, 1);
        assert_eq!(delta.country, "India");
        assert_eq!(delta.country_code, "IND");
    }

    #[test]
    fn test_delta_is_symmetric() {
        let data = records();
        let analyzer = DeltaAnalyzer::new(&data);
        for country in ["India", "Canada", "Brazil", "Norway"] {
            let forward = analyzer.country_delta(country, Month::January, 2000, 2001).unwrap();
            let backward = analyzer.country_delta(country, Month::January, 2001, 2000).unwrap();
            assert_eq!(forward.value, backward.value);
            assert_eq!(forward.year, -backward.year);
        }
    }

    #[test]
    fn test_largest_delta_first_seen_wins_ties() {
        let data = records();
        let analyzer = DeltaAnalyzer::new(&data);
        let candidates = ["India", "Canada", "Brazil", "Norway"];

        let (country, delta) = analyzer
            .largest_delta(&candidates, &HashSet::new(), Month::January, 2000, 2001)
            .unwrap()
            .unwrap();
        assert_eq!(country, "Canada");
        assert_eq!(delta.value, 8.0);

        // India and Norway both moved by 5; India is seen first.
        let excluded: HashSet<&str> = ["Canada"].into_iter().collect();
        let (country, _) = analyzer
            .largest_delta(&candidates, &excluded, Month::January, 2000, 2001)
            .unwrap()
            .unwrap();
        assert_eq!(country, "India");

        let all: HashSet<&str> = candidates.into_iter().collect();
        assert!(analyzer
            .largest_delta(&candidates, &all, Month::January, 2000, 2001)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_top_deltas_ascending() {
        let data = records();
        let analyzer = DeltaAnalyzer::new(&data);
        let candidates = ["India", "Canada", "Brazil", "Norway"];

        let top = analyzer.top_deltas(&candidates, Month::January, 2000, 2001, 3).unwrap();
        let ranked: Vec<(&str, f64)> = top.iter().map(|r| (r.country.as_str(), r.value)).collect();
        assert_eq!(ranked, vec![("Norway", 5.0), ("India", 5.0), ("Canada", 8.0)]);
    }

    #[test]
    fn test_top_deltas_insufficient_candidates() {
        let data = records();
        let analyzer = DeltaAnalyzer::new(&data);
        let err = analyzer
            .top_deltas(&["India", "Canada"], Month::January, 2000, 2001, 10)
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientData {
                requested: 10,
                available: 2
            }
        ));
    }

    #[test]
    fn test_missing_year_propagates() {
        let data = records();
        let analyzer = DeltaAnalyzer::new(&data);
        let err = analyzer
            .top_deltas(&["India", "Canada"], Month::January, 2000, 2005, 1)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::NoMatch { .. }));
    }
}
