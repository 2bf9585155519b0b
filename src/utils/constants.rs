/// File names
pub const DEFAULT_INPUT_FILE: &str = "data/world_temp_2000-2016.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const DEFAULT_CONFIG_FILE: &str = "climate-analyzer.toml";
pub const ENV_PREFIX: &str = "CLIMATE";

/// Report headers
pub const READINGS_HEADER: &str = "Temperature, Year, Month_Avg, Country, Country_Code";
pub const DELTAS_HEADER: &str = "Temperature Delta, Year Delta, Month_Avg, Country, Country_Code";

/// Temperature constraints (monthly country averages, Celsius)
pub const MIN_VALID_TEMP: f64 = -90.0;
pub const MAX_VALID_TEMP: f64 = 60.0;

/// Query defaults
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
