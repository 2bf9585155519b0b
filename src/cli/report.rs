use chrono::Month;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use validator::Validate;

use crate::analyzers::ClimateAnalyzer;
use crate::cli::prompt::{valid_country, valid_range, valid_year, Prompter};
use crate::error::{AnalysisError, Result};
use crate::models::{month_abbrev, month_from_number, Dataset, ResultSet, TemperatureRecord, TemperatureUnit};
use crate::query::require_non_empty;
use crate::utils::filename::task_report_path;
use crate::utils::progress::ProgressReporter;
use crate::writers::ReportWriter;

pub const TASKS: [&str; 8] = ["A1", "A2", "A3", "A4", "B1", "B2", "B3", "C1"];

/// Query parameters given up front. Anything left out is asked for.
/// Temperature bounds are in the display unit.
#[derive(Debug, Clone, Default, Validate)]
pub struct ReportParams {
    pub country: Option<String>,

    #[validate(range(min = 1, max = 12))]
    pub month: Option<u32>,

    pub year: Option<i32>,

    pub range: Option<(f64, f64)>,

    #[validate(range(min = 1, max = 12))]
    pub all_month: Option<u32>,

    pub all_range: Option<(f64, f64)>,

    #[validate(range(min = 1, max = 12))]
    pub delta_month: Option<u32>,

    pub year1: Option<i32>,

    pub year2: Option<i32>,
}

/// What a report run produced.
#[derive(Debug, Default)]
pub struct ReportSummary {
    pub reports: Vec<PathBuf>,
    pub skipped: Vec<String>,
    pub result_sets: Vec<ResultSet>,
}

impl ReportSummary {
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Report complete: {} task files, {} result sets",
            self.reports.len(),
            self.result_sets.len()
        );
        for task in &self.skipped {
            out.push_str(&format!("\n  skipped {}: no temperatures within range", task));
        }
        out
    }
}

/// Runs the eight report tasks in order, one report file per task.
pub struct ReportRunner<'a, R, W> {
    dataset: &'a Dataset,
    analyzer: ClimateAnalyzer<'a>,
    writer: ReportWriter,
    unit: TemperatureUnit,
    output_dir: PathBuf,
    prompter: Option<Prompter<R, W>>,
    progress: ProgressReporter,
}

impl<'a> ReportRunner<'a, std::io::Empty, std::io::Sink> {
    /// A runner that never prompts. Missing parameters are errors and empty
    /// ranges skip their task.
    pub fn non_interactive(analyzer: ClimateAnalyzer<'a>, output_dir: &Path) -> Self {
        Self::build(analyzer, output_dir, None)
    }
}

impl<'a, R: BufRead, W: Write> ReportRunner<'a, R, W> {
    pub fn interactive(analyzer: ClimateAnalyzer<'a>, output_dir: &Path, prompter: Prompter<R, W>) -> Self {
        Self::build(analyzer, output_dir, Some(prompter))
    }

    fn build(analyzer: ClimateAnalyzer<'a>, output_dir: &Path, prompter: Option<Prompter<R, W>>) -> Self {
        Self {
            dataset: analyzer.dataset(),
            analyzer,
            writer: ReportWriter::new(),
            unit: TemperatureUnit::Celsius,
            output_dir: output_dir.to_path_buf(),
            prompter,
            progress: ProgressReporter::silent(),
        }
    }

    pub fn with_unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = unit;
        self.writer = ReportWriter::new().with_primary_unit(unit);
        self
    }

    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    pub fn run(&mut self, params: &ReportParams) -> Result<ReportSummary> {
        params.validate()?;
        let years = self
            .dataset
            .year_range()
            .ok_or_else(|| AnalysisError::MissingData("dataset has no records".to_string()))?;
        let mut summary = ReportSummary::default();

        // Task A: one country
        let country = self.country(params.country.as_deref())?;
        let month = self.month("month", params.month)?;
        self.start_task("A1")?;
        let sets = vec![
            ResultSet::readings(
                format!("Task A1: lowest temperature for {} in {}", country, month_abbrev(month)),
                vec![self.analyzer.lowest_by_month(&country, month)?],
            ),
            ResultSet::readings(
                format!("Task A1: highest temperature for {} in {}", country, month_abbrev(month)),
                vec![self.analyzer.highest_by_month(&country, month)?],
            ),
        ];
        self.finish_task("A1", sets, &mut summary)?;

        let year = self.year("year", "a", params.year, years)?;
        self.start_task("A2")?;
        let sets = vec![
            ResultSet::readings(
                format!("Task A2: lowest temperature for {} in {}", country, year),
                vec![self.analyzer.lowest_by_year(&country, year)?],
            ),
            ResultSet::readings(
                format!("Task A2: highest temperature for {} in {}", country, year),
                vec![self.analyzer.highest_by_year(&country, year)?],
            ),
        ];
        self.finish_task("A2", sets, &mut summary)?;

        let found = self.range_query(
            "range-low/--range-high",
            params.range,
            &country,
            |analyzer, low, high| Ok(analyzer.within_range(&country, low, high).into_iter().collect()),
        )?;
        self.start_task("A3")?;
        match found {
            Some((low, high, records)) => {
                let set = ResultSet::readings(
                    format!(
                        "Task A3: Temperatures within the specific range of {:.2}(C)-{:.2}(C) for {}",
                        low, high, country
                    ),
                    records,
                );
                self.finish_task("A3", vec![set], &mut summary)?;
            }
            None => self.skip_task("A3", &mut summary),
        }

        self.start_task("A4")?;
        let sets = vec![
            ResultSet::readings(
                format!("Task A4: The year with the lowest temperature for {}", country),
                vec![self.analyzer.lowest_for_country(&country)?],
            ),
            ResultSet::readings(
                format!("Task A4: The year with the highest temperature for {}", country),
                vec![self.analyzer.highest_for_country(&country)?],
            ),
        ];
        self.finish_task("A4", sets, &mut summary)?;

        // Task B: every country
        let top_n = self.analyzer.top_n();
        let all_month = self.month("all-month", params.all_month.or(params.month))?;
        self.start_task("B1")?;
        let sets = vec![
            ResultSet::readings(
                format!(
                    "Task B1: Top {} countries with the lowest temperature reading for {} between {} and {}",
                    top_n,
                    month_abbrev(all_month),
                    years.0,
                    years.1
                ),
                self.analyzer.top_lowest_by_month(all_month)?,
            ),
            ResultSet::readings(
                format!(
                    "Task B1: Top {} countries with the highest temperature reading for {} between {} and {}",
                    top_n,
                    month_abbrev(all_month),
                    years.0,
                    years.1
                ),
                self.analyzer.top_highest_by_month(all_month)?,
            ),
        ];
        self.finish_task("B1", sets, &mut summary)?;

        self.start_task("B2")?;
        let sets = vec![
            ResultSet::readings(
                format!(
                    "Task B2: Top {} countries with the lowest temperature from {} and {}",
                    top_n, years.0, years.1
                ),
                self.analyzer.top_lowest_overall()?,
            ),
            ResultSet::readings(
                format!(
                    "Task B2: Top {} countries with the highest temperature reading from {} and {}",
                    top_n, years.0, years.1
                ),
                self.analyzer.top_highest_overall()?,
            ),
        ];
        self.finish_task("B2", sets, &mut summary)?;

        let found = self.range_query(
            "all-range-low/--all-range-high",
            params.all_range,
            "all countries",
            |analyzer, low, high| analyzer.all_within_range(low, high),
        )?;
        self.start_task("B3")?;
        match found {
            Some((low, high, records)) => {
                let set = ResultSet::readings(
                    format!(
                        "Task B3: List all of the countries that fall within a specific temperature range of {:.2}(C)-{:.2}(C)",
                        low, high
                    ),
                    records,
                );
                self.finish_task("B3", vec![set], &mut summary)?;
            }
            None => self.skip_task("B3", &mut summary),
        }

        // Task C: change detection
        let delta_month = self.month("delta-month", params.delta_month)?;
        let year1 = self.year("year1", "the first", params.year1, years)?;
        let year2 = self.year("year2", "the second", params.year2, years)?;
        self.start_task("C1")?;
        let set = ResultSet::deltas(
            format!(
                "Task C1: List of the top {} countries with the largest change in temperature in {} between {} and {}",
                top_n,
                month_abbrev(delta_month),
                year1,
                year2
            ),
            self.analyzer.top_deltas(delta_month, year1, year2)?,
        );
        self.finish_task("C1", vec![set], &mut summary)?;

        self.progress.finish_with_message("All tasks completed");
        info!(
            reports = summary.reports.len(),
            skipped = summary.skipped.len(),
            "Report run finished"
        );
        Ok(summary)
    }

    fn start_task(&self, task: &str) -> Result<()> {
        self.progress.set_message(&format!("Task {}", task));
        self.writer.create_report(&task_report_path(&self.output_dir, task))
    }

    fn finish_task(&self, task: &str, sets: Vec<ResultSet>, summary: &mut ReportSummary) -> Result<()> {
        let path = task_report_path(&self.output_dir, task);
        for set in &sets {
            self.writer.append_result_set(&path, set)?;
        }
        info!(task, sets = sets.len(), path = %path.display(), "Task written");
        summary.result_sets.extend(sets);
        summary.reports.push(path);
        self.progress.increment(1);
        Ok(())
    }

    fn skip_task(&self, task: &str, summary: &mut ReportSummary) {
        summary.reports.push(task_report_path(&self.output_dir, task));
        summary.skipped.push(task.to_string());
        self.progress.increment(1);
    }

    fn missing(flag: &str) -> AnalysisError {
        AnalysisError::MissingData(format!("--{} is required when not prompting", flag))
    }

    fn country(&mut self, given: Option<&str>) -> Result<String> {
        let dataset = self.dataset;
        match (given, self.prompter.as_mut()) {
            (Some(name), _) => valid_country(dataset, name)
                .ok_or_else(|| AnalysisError::InvalidParameter(format!("Unknown country '{}'", name))),
            (None, Some(prompter)) => prompter.ask_country(dataset),
            (None, None) => Err(Self::missing("country")),
        }
    }

    fn month(&mut self, flag: &str, given: Option<u32>) -> Result<Month> {
        match (given, self.prompter.as_mut()) {
            (Some(number), _) => month_from_number(number)
                .ok_or_else(|| AnalysisError::InvalidParameter(format!("Invalid month {}", number))),
            (None, Some(prompter)) => prompter.ask_month(),
            (None, None) => Err(Self::missing(flag)),
        }
    }

    fn year(&mut self, flag: &str, label: &str, given: Option<i32>, years: (i32, i32)) -> Result<i32> {
        match (given, self.prompter.as_mut()) {
            (Some(year), _) => valid_year(&year.to_string(), years).ok_or_else(|| {
                AnalysisError::InvalidParameter(format!(
                    "Year {} is outside the dataset's {}-{}",
                    year, years.0, years.1
                ))
            }),
            (None, Some(prompter)) => prompter.ask_year(label, years),
            (None, None) => Err(Self::missing(flag)),
        }
    }

    /// Run a range query until it has results. Returns the Celsius bounds used,
    /// or `None` when the range came up empty and there is nobody to ask again.
    fn range_query<F>(
        &mut self,
        flag: &str,
        given: Option<(f64, f64)>,
        scope: &str,
        query: F,
    ) -> Result<Option<(f64, f64, Vec<TemperatureRecord>)>>
    where
        F: Fn(&ClimateAnalyzer<'a>, f64, f64) -> Result<Vec<TemperatureRecord>>,
    {
        let mut next = match given {
            Some((low, high)) => Some(
                valid_range(&low.to_string(), &high.to_string()).ok_or_else(|| {
                    AnalysisError::InvalidParameter(format!("Invalid temperature range {}-{}", low, high))
                })?,
            ),
            None => None,
        };

        loop {
            let (low, high) = match (next.take(), self.prompter.as_mut()) {
                (Some(bounds), _) => bounds,
                (None, Some(prompter)) => prompter.ask_range(self.unit)?,
                (None, None) => return Err(Self::missing(flag)),
            };
            let (low, high) = (self.unit.to_celsius(low), self.unit.to_celsius(high));

            match require_non_empty(query(&self.analyzer, low, high)?, low, high, scope) {
                Ok(records) => return Ok(Some((low, high, records))),
                Err(err) if err.is_recoverable() => {
                    warn!("{}", err);
                    match self.prompter.as_mut() {
                        Some(prompter) => prompter.say(&format!(
                            "WARNING: {}. Please enter a different range of temperatures.",
                            err
                        ))?,
                        None => return Ok(None),
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }
}
