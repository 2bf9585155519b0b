use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::WINDOWS_1252;
use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{AnalysisError, Result};
use crate::models::{parse_month, Dataset, TemperatureRecord};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;

/// Loads a delimited temperature table into an immutable `Dataset`.
///
/// Expected layout: one header line, then `value,year,month,country,code`
/// rows. A single malformed row fails the whole load.
pub struct DatasetReader {
    skip_header: bool,
    use_mmap: bool,
}

impl DatasetReader {
    pub fn new() -> Self {
        Self {
            skip_header: true,
            use_mmap: false,
        }
    }

    pub fn with_skip_header(mut self, skip_header: bool) -> Self {
        self.skip_header = skip_header;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub fn read_dataset(&self, path: &Path) -> Result<Dataset> {
        let records = if self.use_mmap {
            self.read_records_mmap(path)?
        } else {
            self.read_records_buffered(path)?
        };

        if records.is_empty() {
            return Err(AnalysisError::MissingData(format!(
                "No temperature readings in {}",
                path.display()
            )));
        }

        let dataset = Dataset::new(records);
        info!(
            path = %path.display(),
            records = dataset.len(),
            countries = dataset.countries().len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    fn read_records_buffered(&self, path: &Path) -> Result<Vec<TemperatureRecord>> {
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        self.parse_bytes(&bytes)
    }

    fn read_records_mmap(&self, path: &Path) -> Result<Vec<TemperatureRecord>> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        self.parse_bytes(&mmap)
    }

    fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<TemperatureRecord>> {
        let text = decode(bytes);
        self.parse_text(&text)
    }

    /// Parse already-decoded text into records.
    pub fn parse_text(&self, text: &str) -> Result<Vec<TemperatureRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(self.skip_header)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            records.push(self.parse_row(&row)?);
        }

        debug!(rows = records.len(), "Parsed temperature rows");
        Ok(records)
    }

    fn parse_row(&self, row: &StringRecord) -> Result<TemperatureRecord> {
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let field = |index: usize, name: &str| {
            row.get(index).ok_or_else(|| {
                AnalysisError::InvalidFormat(format!("Line {}: missing {} column", line, name))
            })
        };

        let value_str = field(0, "temperature")?;
        let value = value_str.parse::<f64>().map_err(|_| {
            AnalysisError::InvalidFormat(format!("Line {}: invalid temperature '{}'", line, value_str))
        })?;

        let year_str = field(1, "year")?;
        let year = year_str.parse::<i32>().map_err(|_| {
            AnalysisError::InvalidFormat(format!("Line {}: invalid year '{}'", line, year_str))
        })?;

        let month = parse_month(field(2, "month")?)
            .map_err(|e| AnalysisError::InvalidFormat(format!("Line {}: {}", line, e)))?;

        let record = TemperatureRecord::new(
            value,
            year,
            month,
            field(3, "country")?,
            field(4, "country code")?,
        );
        record
            .validate()
            .map_err(|e| AnalysisError::InvalidFormat(format!("Line {}: {}", line, e)))?;

        Ok(record)
    }
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new()
    }
}

/// UTF-8 when valid, otherwise Windows-1252 (legacy spreadsheet exports).
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.trim_start_matches('\u{feff}')),
        Err(_) => {
            warn!("Input is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "Temperature, Year, Month_Avg, Country, Country_Code\n\
        -0.3452, 2000, Jan, Afghanistan, AFG\n\
        1.0223, 2000, Feb, Afghanistan, AFG\n\
        \n\
        24.5, 2001, Jan, India, IND\n";

    #[test]
    fn test_parse_text() {
        let records = DatasetReader::new().parse_text(SAMPLE).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].value, -0.3452);
        assert_eq!(records[0].year, 2000);
        assert_eq!(records[0].month, Month::January);
        assert_eq!(records[0].country, "Afghanistan");
        assert_eq!(records[0].country_code, "AFG");
        assert_eq!(records[2].country, "India");
    }

    #[test]
    fn test_malformed_row_fails_whole_load() {
        let text = "header\n1.0, 2000, Jan, Peru, PER\noops, 2000, Feb, Peru, PER\n";
        let err = DatasetReader::new().parse_text(text).unwrap_err();
        assert!(err.to_string().contains("Line 3"));
        assert!(err.to_string().contains("oops"));

        let short = "header\n1.0, 2000, Jan\n";
        assert!(DatasetReader::new().parse_text(short).is_err());

        let bad_month = "header\n1.0, 2000, Foo, Peru, PER\n";
        assert!(DatasetReader::new().parse_text(bad_month).is_err());
    }

    #[test]
    fn test_without_header() {
        let text = "5.5, 2010, Mar, Chile, CHL\n";
        let records = DatasetReader::new()
            .with_skip_header(false)
            .parse_text(text)
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].month, Month::March);
    }

    #[test]
    fn test_read_dataset_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "{}", SAMPLE)?;

        for reader in [DatasetReader::new(), DatasetReader::new().with_mmap(true)] {
            let dataset = reader.read_dataset(temp_file.path())?;
            assert_eq!(dataset.len(), 3);
            assert_eq!(dataset.countries(), vec!["Afghanistan", "India"]);
        }

        Ok(())
    }

    #[test]
    fn test_windows_1252_fallback() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"header\n26.1, 2004, Jul, C\xf4te d'Ivoire, CIV\n")?;

        let dataset = DatasetReader::new().read_dataset(temp_file.path())?;
        assert_eq!(dataset.records()[0].country, "Côte d'Ivoire");

        Ok(())
    }

    #[test]
    fn test_header_only_is_rejected() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "Temperature, Year, Month_Avg, Country, Country_Code")?;

        let err = DatasetReader::new().read_dataset(temp_file.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingData(_)));

        Ok(())
    }
}
