use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::config::secret::{ApiKey, Secrets};
use crate::error::{EtlError, Result};
use crate::utils::constants::{
    DEFAULT_API_URL, DEFAULT_PROCESSED_PATH, DEFAULT_RAW_PATH, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SINK_PATH, DEFAULT_UNITS, ENV_OVERRIDE_PREFIX,
};

/// Shape of the YAML settings file. Every key is optional.
#[derive(Debug, Clone, Deserialize, Validate)]
struct FileSettings {
    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0))]
    latitude: f64,

    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0))]
    longitude: f64,

    #[serde(default = "default_raw_path")]
    raw_path: PathBuf,

    #[serde(default = "default_processed_path")]
    processed_path: PathBuf,

    #[serde(default = "default_sink_path")]
    sink_path: PathBuf,

    #[serde(default = "default_api_url")]
    #[validate(length(min = 1))]
    api_url: String,

    #[serde(default = "default_units")]
    #[validate(length(min = 1))]
    units: String,

    #[serde(default = "default_request_timeout_secs")]
    #[validate(range(min = 1))]
    request_timeout_secs: u64,
}

fn default_raw_path() -> PathBuf {
    PathBuf::from(DEFAULT_RAW_PATH)
}

fn default_processed_path() -> PathBuf {
    PathBuf::from(DEFAULT_PROCESSED_PATH)
}

fn default_sink_path() -> PathBuf {
    PathBuf::from(DEFAULT_SINK_PATH)
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_units() -> String {
    DEFAULT_UNITS.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl FileSettings {
    // Range checks let NaN through, so coordinates also have to be finite
    fn check(&self) -> Result<()> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        for (field, value) in [("latitude", self.latitude), ("longitude", self.longitude)] {
            if !value.is_finite() {
                errors.add(field, ValidationError::new("finite"));
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors.into())
        }
    }
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            raw_path: default_raw_path(),
            processed_path: default_processed_path(),
            sink_path: default_sink_path(),
            api_url: default_api_url(),
            units: default_units(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Parameters for one pipeline run.
///
/// Loaded once and passed by reference to every stage. The API key lives in
/// [`Secrets`] and is redacted whenever the settings are printed or serialized.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub latitude: f64,
    pub longitude: f64,
    pub raw_path: PathBuf,
    pub processed_path: PathBuf,
    pub sink_path: PathBuf,
    pub api_url: String,
    pub units: String,
    pub request_timeout_secs: u64,
    pub secrets: Secrets,
}

impl Settings {
    /// Load settings from a YAML file and the API key from the environment.
    ///
    /// `env_file` is consulted for the key when the process environment does
    /// not provide it.
    pub fn load(path: impl AsRef<Path>, env_file: Option<&Path>) -> Result<Self> {
        let file = read_file_settings(path.as_ref())?;
        let api_key = ApiKey::from_env(env_file)?;
        Ok(Self::assemble(file, api_key))
    }

    /// Load settings from a YAML file with an already resolved API key.
    pub fn from_file_with_secret(path: impl AsRef<Path>, api_key: ApiKey) -> Result<Self> {
        let file = read_file_settings(path.as_ref())?;
        Ok(Self::assemble(file, api_key))
    }

    pub fn builder(api_key: ApiKey) -> SettingsBuilder {
        SettingsBuilder::new(api_key)
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.secrets.api_key
    }

    fn assemble(file: FileSettings, api_key: ApiKey) -> Self {
        Self {
            latitude: file.latitude,
            longitude: file.longitude,
            raw_path: file.raw_path,
            processed_path: file.processed_path,
            sink_path: file.sink_path,
            api_url: file.api_url,
            units: file.units,
            request_timeout_secs: file.request_timeout_secs,
            secrets: Secrets::new(api_key),
        }
    }
}

fn read_file_settings(path: &Path) -> Result<FileSettings> {
    if !path.exists() {
        return Err(EtlError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path)?;

    // The root must be a mapping; an empty document is rejected as well
    let root: serde_yaml::Value = serde_yaml::from_str(&text)
        .map_err(|e| EtlError::config_format(path, format!("is not valid YAML: {}", e)))?;
    if !root.is_mapping() {
        return Err(EtlError::config_format(path, "must contain a mapping"));
    }

    let layered = ::config::Config::builder()
        .add_source(::config::File::from_str(&text, ::config::FileFormat::Yaml))
        .add_source(::config::Environment::with_prefix(ENV_OVERRIDE_PREFIX).try_parsing(true))
        .build()
        .map_err(|e| EtlError::config_format(path, format!("could not be read: {}", e)))?;

    let settings: FileSettings = layered
        .try_deserialize()
        .map_err(|e| EtlError::config_format(path, format!("has an invalid value: {}", e)))?;

    settings.check()?;
    debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}

/// Builds [`Settings`] in code, applying the same defaults and validation as the file loader.
pub struct SettingsBuilder {
    file: FileSettings,
    api_key: ApiKey,
}

impl SettingsBuilder {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            file: FileSettings::default(),
            api_key,
        }
    }

    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.file.latitude = latitude;
        self.file.longitude = longitude;
        self
    }

    pub fn raw_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file.raw_path = path.into();
        self
    }

    pub fn processed_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file.processed_path = path.into();
        self
    }

    pub fn sink_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file.sink_path = path.into();
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.file.api_url = url.into();
        self
    }

    pub fn units(mut self, units: impl Into<String>) -> Self {
        self.file.units = units.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.file.request_timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<Settings> {
        self.file.check()?;
        Ok(Settings::assemble(self.file, self.api_key))
    }
}
