use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::TemperatureUnit;

#[derive(Parser)]
#[command(name = "climate-analyzer")]
#[command(about = "Temperature extremes, ranges, rankings and change detection across countries")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Settings file [default: climate-analyzer.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Parquet,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every report task and write one file per task
    Report {
        #[arg(short, long, help = "Input CSV dataset [default: from settings]")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Directory for the task reports [default: from settings]")]
        output_dir: Option<PathBuf>,

        #[arg(long, help = "Country for the single-country tasks")]
        country: Option<String>,

        #[arg(long, help = "Month (1-12) for A1, and B1 unless --all-month is given")]
        month: Option<u32>,

        #[arg(long, help = "Year for A2")]
        year: Option<i32>,

        #[arg(long, allow_hyphen_values = true, requires = "range_high")]
        range_low: Option<f64>,

        #[arg(long, allow_hyphen_values = true, requires = "range_low")]
        range_high: Option<f64>,

        #[arg(long, help = "Month (1-12) for B1")]
        all_month: Option<u32>,

        #[arg(long, allow_hyphen_values = true, requires = "all_range_high")]
        all_range_low: Option<f64>,

        #[arg(long, allow_hyphen_values = true, requires = "all_range_low")]
        all_range_high: Option<f64>,

        #[arg(long, help = "Month (1-12) for C1")]
        delta_month: Option<u32>,

        #[arg(long)]
        year1: Option<i32>,

        #[arg(long)]
        year2: Option<i32>,

        #[arg(short, long, value_enum, help = "Display unit [default: from settings]")]
        unit: Option<TemperatureUnit>,

        #[arg(short = 'n', long, help = "Entries in each ranking [default: from settings]")]
        top_n: Option<usize>,

        #[arg(short, long, value_enum, help = "Extra exports next to the text reports")]
        format: Vec<ExportFormat>,

        #[arg(short, long, default_value = "snappy")]
        compression: String,

        #[arg(long)]
        max_workers: Option<usize>,

        #[arg(long, default_value = "false", help = "Fail instead of prompting for missing parameters")]
        no_prompt: bool,

        #[arg(short, long, default_value = "false", help = "Hide the progress bar")]
        quiet: bool,
    },

    /// Summarise a dataset
    Info {
        #[arg(short, long, help = "Input CSV dataset [default: from settings]")]
        input: Option<PathBuf>,
    },
}
