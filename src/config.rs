use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

use crate::error::Result;
use crate::models::TemperatureUnit;
use crate::utils::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_TOP_N, ENV_PREFIX,
};

/// Run settings, layered as defaults < TOML file < `CLIMATE_*` environment.
/// Command-line flags are applied on top by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    pub input_file: PathBuf,

    pub output_dir: PathBuf,

    #[validate(range(min = 1))]
    pub top_n: usize,

    pub unit: TemperatureUnit,

    #[validate(range(min = 1))]
    pub max_workers: usize,

    pub use_mmap: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(DEFAULT_INPUT_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            top_n: DEFAULT_TOP_N,
            unit: TemperatureUnit::Celsius,
            max_workers: num_cpus::get(),
            use_mmap: false,
        }
    }
}

impl Settings {
    /// Load settings. An explicit file must exist; the default
    /// `climate-analyzer.toml` is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let builder = Config::builder()
            .set_default("input_file", defaults.input_file.to_string_lossy().to_string())?
            .set_default("output_dir", defaults.output_dir.to_string_lossy().to_string())?
            .set_default("top_n", defaults.top_n as i64)?
            .set_default("unit", "celsius")?
            .set_default("max_workers", defaults.max_workers as i64)?
            .set_default("use_mmap", defaults.use_mmap)?;

        let builder = match config_file {
            Some(path) => builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(true),
            ),
            None => builder.add_source(
                File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
            ),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        debug!(?settings, "Loaded settings");
        Ok(settings)
    }
}
