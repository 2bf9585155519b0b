use arrow::array::{Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use crate::error::{AnalysisError, Result};
use crate::models::ResultSet;
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE,
};

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(parquet::basic::ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(AnalysisError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Write result sets to one Parquet file, one batch per set.
    pub fn write_result_sets(&self, result_sets: &[ResultSet], path: &Path) -> Result<()> {
        if result_sets.iter().all(|set| set.is_empty()) {
            return Ok(());
        }

        let schema = self.create_schema();
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;
        for result_set in result_sets.iter().filter(|set| !set.is_empty()) {
            let batch = self.result_set_to_batch(result_set, schema.clone())?;
            writer.write(&batch)?;
        }
        writer.close()?;

        Ok(())
    }

    /// Create Arrow schema for result rows
    fn create_schema(&self) -> Arc<Schema> {
        let fields = vec![
            Field::new("subject", DataType::Utf8, false),
            Field::new("kind", DataType::Utf8, false),
            Field::new("celsius", DataType::Float64, false),
            Field::new("fahrenheit", DataType::Float64, false),
            Field::new("year", DataType::Int32, false),
            Field::new("month", DataType::Utf8, false),
            Field::new("country", DataType::Utf8, false),
            Field::new("country_code", DataType::Utf8, false),
        ];

        Arc::new(Schema::new(fields))
    }

    fn result_set_to_batch(&self, result_set: &ResultSet, schema: Arc<Schema>) -> Result<RecordBatch> {
        let rows = result_set.rows();
        let kind = result_set.kind.as_str();

        let subjects = StringArray::from_iter_values(rows.iter().map(|_| result_set.subject.as_str()));
        let kinds = StringArray::from_iter_values(rows.iter().map(|_| kind));
        let celsius = Float64Array::from_iter_values(rows.iter().map(|r| r.celsius));
        let fahrenheit = Float64Array::from_iter_values(rows.iter().map(|r| r.fahrenheit));
        let years = Int32Array::from_iter_values(rows.iter().map(|r| r.year));
        let months = StringArray::from_iter_values(rows.iter().map(|r| r.month.as_str()));
        let countries = StringArray::from_iter_values(rows.iter().map(|r| r.country.as_str()));
        let codes = StringArray::from_iter_values(rows.iter().map(|r| r.country_code.as_str()));

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(subjects),
                Arc::new(kinds),
                Arc::new(celsius),
                Arc::new(fahrenheit),
                Arc::new(years),
                Arc::new(months),
                Arc::new(countries),
                Arc::new(codes),
            ],
        )?;

        Ok(batch)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let row_groups = metadata.num_row_groups();
        let total_rows = metadata.file_metadata().num_rows();
        let file_size = std::fs::metadata(path)?.len();

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            file_size,
            compression: self.compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} KB\n\
            - Compression: {:?}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1024.0,
            self.compression,
        )
    }
}
