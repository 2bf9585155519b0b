use clap::Parser;
use climate_analyzer::cli::{run, Cli};
use climate_analyzer::error::Result;
use climate_analyzer::utils::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref())?;
    run(cli)
}
