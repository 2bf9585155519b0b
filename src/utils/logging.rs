use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

use crate::error::{AnalysisError, Result};

/// Install the global fmt subscriber. Debug level when verbose, info otherwise.
/// Output goes to stderr unless a log file is given.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| AnalysisError::Config(format!("Failed to initialise logging: {}", e)))
}
