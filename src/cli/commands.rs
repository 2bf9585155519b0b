use std::path::{Path, PathBuf};
use tracing::info;
use validator::Validate;

use crate::analyzers::ClimateAnalyzer;
use crate::cli::args::{Cli, Commands, ExportFormat};
use crate::cli::prompt::Prompter;
use crate::cli::report::{ReportParams, ReportRunner, TASKS};
use crate::config::Settings;
use crate::error::Result;
use crate::models::{Dataset, ResultSet};
use crate::readers::DatasetReader;
use crate::utils::filename::generate_default_export_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::{write_json, ParquetWriter};

pub fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Report {
            input,
            output_dir,
            country,
            month,
            year,
            range_low,
            range_high,
            all_month,
            all_range_low,
            all_range_high,
            delta_month,
            year1,
            year2,
            unit,
            top_n,
            format,
            compression,
            max_workers,
            no_prompt,
            quiet,
        } => {
            if let Some(input) = input {
                settings.input_file = input;
            }
            if let Some(output_dir) = output_dir {
                settings.output_dir = output_dir;
            }
            if let Some(unit) = unit {
                settings.unit = unit;
            }
            if let Some(top_n) = top_n {
                settings.top_n = top_n;
            }
            if let Some(max_workers) = max_workers {
                settings.max_workers = max_workers;
            }
            settings.validate()?;

            let dataset = load_dataset(&settings, quiet)?;
            let analyzer = ClimateAnalyzer::new(&dataset)
                .with_top_n(settings.top_n)
                .with_max_workers(settings.max_workers);

            let params = ReportParams {
                country,
                month,
                year,
                range: range_low.zip(range_high),
                all_month,
                all_range: all_range_low.zip(all_range_high),
                delta_month,
                year1,
                year2,
            };

            println!(
                "Writing task reports to {} (unit: {}, top {})",
                settings.output_dir.display(),
                settings.unit,
                settings.top_n
            );

            let summary = if no_prompt {
                let progress = ProgressReporter::new(TASKS.len() as u64, "Running report tasks", quiet);
                ReportRunner::non_interactive(analyzer, &settings.output_dir)
                    .with_unit(settings.unit)
                    .with_progress(progress)
                    .run(&params)?
            } else {
                // Prompts and a progress bar don't share a terminal well.
                let prompter = Prompter::new(std::io::stdin().lock(), std::io::stdout());
                ReportRunner::interactive(analyzer, &settings.output_dir, prompter)
                    .with_unit(settings.unit)
                    .run(&params)?
            };

            println!("\n{}", summary.summary());

            for path in export(&summary.result_sets, &settings.output_dir, &format, &compression)? {
                println!("Exported {}", path.display());
            }
        }

        Commands::Info { input } => {
            if let Some(input) = input {
                settings.input_file = input;
            }
            let dataset = load_dataset(&settings, false)?;
            println!("{}", dataset.summary().summary());
        }
    }

    Ok(())
}

fn load_dataset(settings: &Settings, quiet: bool) -> Result<Dataset> {
    let progress = ProgressReporter::new_spinner(
        &format!("Loading {}...", settings.input_file.display()),
        quiet,
    );
    let dataset = DatasetReader::new()
        .with_mmap(settings.use_mmap)
        .read_dataset(&settings.input_file)?;
    progress.finish_with_message(&format!("Loaded {} records", dataset.len()));
    Ok(dataset)
}

/// Write the requested exports; returns the files written.
pub fn export(
    result_sets: &[ResultSet],
    output_dir: &Path,
    formats: &[ExportFormat],
    compression: &str,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for format in formats {
        let path = match format {
            ExportFormat::Json => {
                let path = generate_default_export_filename(output_dir, "json");
                write_json(result_sets, &path)?;
                path
            }
            ExportFormat::Parquet => {
                let path = generate_default_export_filename(output_dir, "parquet");
                let writer = ParquetWriter::new().with_compression(compression)?;
                writer.write_result_sets(result_sets, &path)?;
                println!("{}", writer.get_file_info(&path)?.summary());
                path
            }
        };
        info!(path = %path.display(), "Export written");
        written.push(path);
    }
    Ok(written)
}
