use std::collections::BTreeSet;

use crate::error::{AnalysisError, Result};
use crate::models::TemperatureRecord;
use crate::query::filter::PredicateSet;

/// All matching records as an ordered set. Records equal under the total
/// order collapse into a single entry.
pub fn collect_range(
    records: &[TemperatureRecord],
    predicates: &PredicateSet,
) -> BTreeSet<TemperatureRecord> {
    predicates.filter(records).cloned().collect()
}

/// Readings for `country` with `low <= value <= high` (Celsius).
pub fn country_range(
    records: &[TemperatureRecord],
    country: &str,
    low: f64,
    high: f64,
) -> BTreeSet<TemperatureRecord> {
    let predicates = PredicateSet::new()
        .with_country(country)
        .with_range(low, high);
    collect_range(records, &predicates)
}

/// Turn an empty range outcome into the recoverable `EmptyRange` error.
pub fn require_non_empty<T>(results: T, low: f64, high: f64, scope: &str) -> Result<T>
where
    for<'a> &'a T: IntoIterator,
{
    if (&results).into_iter().next().is_none() {
        return Err(AnalysisError::EmptyRange {
            low,
            high,
            scope: scope.to_string(),
        });
    }
    Ok(results)
}
