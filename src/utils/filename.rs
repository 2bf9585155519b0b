use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

/// Text report for one task, e.g. `taskA1_climate_info.csv`.
pub fn task_report_path(output_dir: &Path, task: &str) -> PathBuf {
    output_dir.join(format!("task{}_climate_info.csv", task))
}

/// Export file with format: climate-report-{YYMMDD}.{extension}
pub fn generate_default_export_filename(output_dir: &Path, extension: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!(
        "climate-report-{:02}{:02}{:02}.{}",
        year, month, day, extension
    );
    output_dir.join(filename)
}
