pub mod args;
pub mod commands;
pub mod prompt;
pub mod report;

pub use args::{Cli, Commands, ExportFormat};
pub use commands::run;
pub use prompt::Prompter;
pub use report::{ReportParams, ReportRunner, ReportSummary};
