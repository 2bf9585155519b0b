use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::{ResultKind, ResultRow, ResultSet};

#[derive(Serialize)]
struct ResultSetView<'a> {
    subject: &'a str,
    kind: ResultKind,
    header: &'static str,
    rows: Vec<ResultRow>,
}

impl<'a> From<&'a ResultSet> for ResultSetView<'a> {
    fn from(result_set: &'a ResultSet) -> Self {
        Self {
            subject: &result_set.subject,
            kind: result_set.kind,
            header: result_set.kind.header(),
            rows: result_set.rows(),
        }
    }
}

/// Writes result sets to a pretty-formatted JSON array.
pub fn write_json(result_sets: &[ResultSet], output_path: &Path) -> Result<()> {
    let views: Vec<ResultSetView<'_>> = result_sets.iter().map(ResultSetView::from).collect();
    let file = File::create(output_path)?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &views)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemperatureRecord;
    use chrono::Month;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_json() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        let sets = vec![
            ResultSet::readings(
                "Task A4: The year with the lowest temperature for Peru",
                vec![TemperatureRecord::new(8.5, 2007, Month::July, "Peru", "PER")],
            ),
            ResultSet::deltas("Task C1: changes", Vec::new()),
        ];

        write_json(&sets, temp_file.path())?;

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(temp_file.path())?)?;
        assert_eq!(value[0]["kind"], "readings");
        assert_eq!(value[0]["rows"][0]["country"], "Peru");
        assert_eq!(value[0]["rows"][0]["month"], "Jul");
        assert_eq!(value[0]["rows"][0]["fahrenheit"], 47.3);
        assert_eq!(value[1]["kind"], "deltas");
        assert_eq!(value[1]["rows"].as_array().map(|rows| rows.len()), Some(0));

        Ok(())
    }
}
