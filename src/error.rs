use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EtlError>;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration file at {} does not exist", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration file at {} {message}", path.display())]
    ConfigFormat { path: PathBuf, message: String },

    #[error("Configuration validation error: {0}")]
    ConfigValidation(#[from] validator::ValidationErrors),

    #[error("Secret validation error: {0}")]
    SecretValidation(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Error fetching data: {status} - {body}")]
    ExtractionStatus { status: u16, body: String },

    #[error("Invalid JSON in response: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("{what} data file not found: {}", path.display())]
    MissingInput { what: &'static str, path: PathBuf },

    #[error("Malformed raw document {}: {message}", path.display())]
    Transform { path: PathBuf, message: String },

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),
}

impl EtlError {
    /// True for failures raised while talking to the weather API.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            EtlError::Request(_) | EtlError::ExtractionStatus { .. } | EtlError::InvalidJson(_)
        )
    }

    pub(crate) fn config_format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        EtlError::ConfigFormat {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<tempfile::PersistError> for EtlError {
    fn from(err: tempfile::PersistError) -> Self {
        EtlError::Io(err.error)
    }
}
