use rayon::prelude::*;
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::models::Dataset;

/// Runs a query once per distinct country, in first-seen order.
///
/// With more than one worker the per-country calls run on a dedicated rayon
/// pool. Output order and the reported error are the same as for a
/// sequential run: results follow country order and the first failing
/// country (in that order) wins.
pub struct PerCountryReducer {
    max_workers: usize,
}

impl PerCountryReducer {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }

    pub fn sequential() -> Self {
        Self::new(1)
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    pub fn reduce<T, F>(&self, dataset: &Dataset, op: F) -> Result<Vec<T>>
    where
        F: Fn(&str) -> Result<T> + Sync + Send,
        T: Send,
    {
        let countries = dataset.countries();
        debug!(
            countries = countries.len(),
            workers = self.max_workers,
            "Reducing per country"
        );

        if self.max_workers == 1 || countries.len() < 2 {
            return countries.into_iter().map(op).collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| AnalysisError::Config(e.to_string()))?;

        let outcomes: Vec<Result<T>> =
            pool.install(|| countries.par_iter().map(|country| op(*country)).collect());

        outcomes.into_iter().collect()
    }
}

impl Default for PerCountryReducer {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
