use csv::WriterBuilder;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::models::{ResultRow, ResultSet, TemperatureUnit};

/// Writes result sets as human-readable delimited text.
///
/// Each set becomes a subject line, a header line and one row per record.
/// The temperature cell carries both units, the primary unit first.
pub struct ReportWriter {
    primary_unit: TemperatureUnit,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self {
            primary_unit: TemperatureUnit::Celsius,
        }
    }

    pub fn with_primary_unit(mut self, unit: TemperatureUnit) -> Self {
        self.primary_unit = unit;
        self
    }

    /// Create (or truncate) a report file, creating parent directories as needed.
    pub fn create_report(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        File::create(path)?;
        Ok(())
    }

    /// Append one result set to `path`, creating the file if needed.
    pub fn append_result_set(&self, path: &Path, result_set: &ResultSet) -> Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut out = BufWriter::new(file);
        self.write_result_set(&mut out, result_set)?;
        out.flush()?;

        debug!(
            path = %path.display(),
            subject = %result_set.subject,
            rows = result_set.len(),
            "Wrote result set"
        );
        Ok(())
    }

    pub fn write_result_set<W: Write>(&self, out: &mut W, result_set: &ResultSet) -> Result<()> {
        writeln!(out, "{}", result_set.subject)?;
        writeln!(out, "{}", result_set.kind.header())?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(&mut *out);
        for row in result_set.rows() {
            writer.write_record([
                self.format_temperature(&row),
                row.year.to_string(),
                row.month.clone(),
                row.country.clone(),
                row.country_code.clone(),
            ])?;
        }
        writer.flush()?;

        Ok(())
    }

    /// "21.46(C) 70.62(F)" with the primary unit first.
    pub fn format_temperature(&self, row: &ResultRow) -> String {
        let primary = self.primary_unit;
        let secondary = primary.other();
        format!(
            "{:.2}{} {:.2}{}",
            row.value_in(primary),
            primary.suffix(),
            row.value_in(secondary),
            secondary.suffix()
        )
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemperatureRecord;
    use chrono::Month;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn readings() -> ResultSet {
        ResultSet::readings(
            "Task A1: lowest temperature for India in Jan",
            vec![TemperatureRecord::new(14.256, 2008, Month::January, "India", "IND")],
        )
    }

    #[test]
    fn test_write_readings() -> Result<()> {
        let mut out = Vec::new();
        ReportWriter::new().write_result_set(&mut out, &readings())?;

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Task A1: lowest temperature for India in Jan\n\
            Temperature, Year, Month_Avg, Country, Country_Code\n\
            14.26(C) 57.66(F),2008,Jan,India,IND\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_deltas_fahrenheit_first() -> Result<()> {
        let deltas = ResultSet::deltas(
            "Task C1: deltas",
            vec![TemperatureRecord::new(5.0, 1, Month::January, "Korea, South", "KOR")],
        );
        let mut out = Vec::new();
        ReportWriter::new()
            .with_primary_unit(TemperatureUnit::Fahrenheit)
            .write_result_set(&mut out, &deltas)?;

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[1],
            "Temperature Delta, Year Delta, Month_Avg, Country, Country_Code"
        );
        assert_eq!(lines[2], "41.00(F) 5.00(C),1,Jan,\"Korea, South\",KOR");
        Ok(())
    }

    #[test]
    fn test_append_to_report_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("taskA1_climate_info.csv");
        let writer = ReportWriter::new();

        writer.create_report(&path)?;
        writer.append_result_set(&path, &readings())?;
        writer.append_result_set(&path, &readings())?;

        let text = std::fs::read_to_string(&path)?;
        assert_eq!(text.lines().count(), 6);

        writer.create_report(&path)?;
        assert_eq!(std::fs::read_to_string(&path)?, "");
        Ok(())
    }
}
