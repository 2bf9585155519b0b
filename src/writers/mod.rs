pub mod json_writer;
pub mod parquet_writer;
pub mod report_writer;

pub use json_writer::write_json;
pub use parquet_writer::{ParquetFileInfo, ParquetWriter};
pub use report_writer::ReportWriter;
