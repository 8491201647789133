/// Default file locations, relative to the working directory
pub const DEFAULT_RAW_PATH: &str = "data/raw/raw.json";
pub const DEFAULT_PROCESSED_PATH: &str = "data/processed/processed.csv";
pub const DEFAULT_SINK_PATH: &str = "data/data.csv";

/// Default configuration sources
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_ENV_FILE: &str = ".env";
pub const ENV_OVERRIDE_PREFIX: &str = "WEATHER_ETL";

/// OpenWeatherMap current weather endpoint
pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_UNITS: &str = "metric";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// API credential
pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";
pub const API_KEY_LENGTH: usize = 32;

/// Processed record layout
pub const RECORD_DELIMITER: u8 = b';';
pub const RECORD_FIELD_COUNT: usize = 8;

/// Backup naming
pub const BACKUP_EXTENSION: &str = "bak";
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Mode for newly written files (rw-r--r--)
pub const DEFAULT_FILE_MODE: u32 = 0o644;
