use chrono::Month;
use std::io::{BufRead, Write};

use crate::error::{AnalysisError, Result};
use crate::models::{month_from_number, Dataset, TemperatureUnit};

/// Country as spelled in the dataset, matched case-insensitively.
pub fn valid_country(dataset: &Dataset, input: &str) -> Option<String> {
    dataset.resolve_country(input).map(str::to_string)
}

/// Month number 1-12.
pub fn valid_month(input: &str) -> Option<Month> {
    input.trim().parse::<u32>().ok().and_then(month_from_number)
}

/// Year within the dataset's covered range (inclusive).
pub fn valid_year(input: &str, (first, last): (i32, i32)) -> Option<i32> {
    input
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|year| (first..=last).contains(year))
}

/// A numeric pair with `high > low`.
pub fn valid_range(low: &str, high: &str) -> Option<(f64, f64)> {
    let low = low.trim().parse::<f64>().ok()?;
    let high = high.trim().parse::<f64>().ok()?;
    (low.is_finite() && high.is_finite() && high > low).then_some((low, high))
}

/// Line-oriented question/answer loop that re-asks until the answer is valid.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        self.say(question)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AnalysisError::Cancelled);
        }
        Ok(line.trim().to_string())
    }

    pub fn ask_country(&mut self, dataset: &Dataset) -> Result<String> {
        loop {
            let answer = self.ask("Enter the name of the country (Ex. India):")?;
            match valid_country(dataset, &answer) {
                Some(country) => return Ok(country),
                None => self.say(&format!(
                    "'{}' is not a country in the dataset. Please enter a valid country.",
                    answer
                ))?,
            }
        }
    }

    pub fn ask_month(&mut self) -> Result<Month> {
        loop {
            let answer = self.ask("Enter the month between 1-12 (Ex. Enter 1 for January, etc.):")?;
            match valid_month(&answer) {
                Some(month) => return Ok(month),
                None => self.say("User input for month is invalid. Please enter a month (1-12).")?,
            }
        }
    }

    pub fn ask_year(&mut self, label: &str, years: (i32, i32)) -> Result<i32> {
        loop {
            let answer = self.ask(&format!(
                "Enter {} year between {} and {}:",
                label, years.0, years.1
            ))?;
            match valid_year(&answer, years) {
                Some(year) => return Ok(year),
                None => self.say(&format!(
                    "User input for year is invalid. Please enter a year between {} and {}.",
                    years.0, years.1
                ))?,
            }
        }
    }

    /// Bounds in `unit`, as typed by the user.
    pub fn ask_range(&mut self, unit: TemperatureUnit) -> Result<(f64, f64)> {
        loop {
            let low = self.ask(&format!(
                "Enter the lower end of the temperature range (in {}):",
                unit
            ))?;
            let high = self.ask(&format!(
                "Enter the higher end of the temperature range (in {}):",
                unit
            ))?;
            match valid_range(&low, &high) {
                Some(range) => return Ok(range),
                None => self.say(
                    "User input for the temperature range is invalid. Please enter two numbers with the lower end first.",
                )?,
            }
        }
    }
}
