use crate::error::{AnalysisError, Result};
use crate::models::TemperatureRecord;

fn sorted(mut results: Vec<TemperatureRecord>, n: usize) -> Result<Vec<TemperatureRecord>> {
    if results.len() < n {
        return Err(AnalysisError::InsufficientData {
            requested: n,
            available: results.len(),
        });
    }
    results.sort();
    Ok(results)
}

/// First `n` records after an ascending sort by the total order.
pub fn lowest_n(results: Vec<TemperatureRecord>, n: usize) -> Result<Vec<TemperatureRecord>> {
    let mut ranked = sorted(results, n)?;
    ranked.truncate(n);
    Ok(ranked)
}

/// Last `n` records after an ascending sort, still in ascending order.
/// Reverse the output for highest-first.
pub fn highest_n(results: Vec<TemperatureRecord>, n: usize) -> Result<Vec<TemperatureRecord>> {
    let mut ranked = sorted(results, n)?;
    let start = ranked.len() - n;
    Ok(ranked.split_off(start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use pretty_assertions::assert_eq;

    fn per_country() -> Vec<TemperatureRecord> {
        [("A", 7.0), ("B", -3.0), ("C", 12.0), ("D", 0.5), ("E", 7.0)]
            .iter()
            .map(|(country, value)| {
                TemperatureRecord::new(*value, 2010, Month::January, *country, *country)
            })
            .collect()
    }

    fn countries(records: &[TemperatureRecord]) -> Vec<&str> {
        records.iter().map(|r| r.country.as_str()).collect()
    }

    #[test]
    fn test_lowest_n() {
        let ranked = lowest_n(per_country(), 3).unwrap();
        assert_eq!(countries(&ranked), vec!["B", "D", "A"]);
    }

    #[test]
    fn test_highest_n_is_ascending() {
        let ranked = highest_n(per_country(), 3).unwrap();
        assert_eq!(countries(&ranked), vec!["A", "E", "C"]);
        assert!(ranked.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_exact_length() {
        assert_eq!(lowest_n(per_country(), 5).unwrap().len(), 5);
        assert_eq!(highest_n(per_country(), 0).unwrap().len(), 0);
    }

    #[test]
    fn test_insufficient_data() {
        let err = highest_n(per_country(), 10).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientData {
                requested: 10,
                available: 5
            }
        ));
        assert!(lowest_n(Vec::new(), 1).is_err());
    }
}
