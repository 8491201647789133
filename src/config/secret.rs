use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

use crate::error::{EtlError, Result};
use crate::utils::constants::{API_KEY_LENGTH, API_KEY_VAR};

const REDACTED: &str = "**********";

/// OpenWeatherMap API key.
///
/// `Debug`, `Display` and `Serialize` all print a redaction marker; the
/// plaintext is only reachable through [`ApiKey::expose`].
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate a key exactly as given; surrounding whitespace is an error, not trimmed.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(EtlError::SecretValidation(format!(
                "{} is missing or empty",
                API_KEY_VAR
            )));
        }

        if value.trim() != value {
            return Err(EtlError::SecretValidation(format!(
                "{} has leading or trailing whitespace",
                API_KEY_VAR
            )));
        }

        let length = value.chars().count();
        if length != API_KEY_LENGTH {
            return Err(EtlError::SecretValidation(format!(
                "{} must be exactly {} characters, got {}",
                API_KEY_VAR, API_KEY_LENGTH, length
            )));
        }

        Ok(Self(value))
    }

    /// Resolve the key from the process environment, falling back to `env_file`.
    ///
    /// Without an explicit file, a `.env` in the working directory (or one of
    /// its parents) is merged into the environment first.
    pub fn from_env(env_file: Option<&Path>) -> Result<Self> {
        if env_file.is_none() {
            dotenvy::dotenv().ok();
        }

        if let Ok(value) = std::env::var(API_KEY_VAR) {
            if !value.trim().is_empty() {
                return Self::new(value);
            }
        }

        match env_file {
            Some(path) if path.exists() => Self::from_env_file(path),
            _ => Self::new(String::new()),
        }
    }

    /// Read the key from a dotenv-style file without touching the process environment.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        let entries = dotenvy::from_path_iter(path).map_err(|_| {
            EtlError::SecretValidation(format!("could not read env file {}", path.display()))
        })?;

        for entry in entries {
            // Parse errors echo the offending line, which may hold the secret
            let (key, value) = entry.map_err(|_| {
                EtlError::SecretValidation(format!("could not parse env file {}", path.display()))
            })?;
            if key == API_KEY_VAR {
                return Self::new(value);
            }
        }

        Self::new(String::new())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&REDACTED).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl Serialize for ApiKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

/// Credentials sourced separately from the settings file.
#[derive(Debug, Clone, Serialize)]
pub struct Secrets {
    pub api_key: ApiKey,
}

impl Secrets {
    pub fn new(api_key: ApiKey) -> Self {
        Self { api_key }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_valid_key() {
        let key = ApiKey::new(KEY).unwrap();
        assert_eq!(key.expose(), KEY);
    }

    #[test]
    fn test_invalid_lengths() {
        assert!(matches!(
            ApiKey::new(""),
            Err(EtlError::SecretValidation(_))
        ));
        assert!(matches!(
            ApiKey::new("x".repeat(31)),
            Err(EtlError::SecretValidation(_))
        ));
        assert!(matches!(
            ApiKey::new("x".repeat(33)),
            Err(EtlError::SecretValidation(_))
        ));
    }

    #[test]
    fn test_padded_key_rejected() {
        for padded in [format!("  {}  ", KEY), format!("{}\n", KEY), " ".repeat(32)] {
            assert!(matches!(
                ApiKey::new(padded),
                Err(EtlError::SecretValidation(_))
            ));
        }
    }

    #[test]
    fn test_error_does_not_leak_value() {
        let err = ApiKey::new("secret-but-too-short").unwrap_err();
        assert!(!err.to_string().contains("secret-but-too-short"));
    }

    #[test]
    fn test_redacted_representations() {
        let key = ApiKey::new(KEY).unwrap();
        assert!(!format!("{:?}", key).contains(KEY));
        assert!(!key.to_string().contains(KEY));

        let secrets = Secrets::new(key);
        let json = serde_json::to_string(&secrets).unwrap();
        assert!(!json.contains(KEY));
        assert!(json.contains(REDACTED));
    }

    #[test]
    fn test_from_env_file() {
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join(".env");
        fs::write(&env_file, format!("OTHER=1\n{}={}\n", API_KEY_VAR, KEY)).unwrap();

        let key = ApiKey::from_env_file(&env_file).unwrap();
        assert_eq!(key.expose(), KEY);
    }

    #[test]
    fn test_from_env_file_wrong_length() {
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join(".env");
        fs::write(&env_file, format!("{}=short\n", API_KEY_VAR)).unwrap();

        let err = ApiKey::from_env_file(&env_file).unwrap_err();
        assert!(matches!(err, EtlError::SecretValidation(_)));
    }

    #[test]
    fn test_from_env_file_missing_variable() {
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join(".env");
        fs::write(&env_file, "OTHER=1\n").unwrap();

        assert!(matches!(
            ApiKey::from_env_file(&env_file),
            Err(EtlError::SecretValidation(_))
        ));
    }

    #[test]
    fn test_from_env_file_nonexistent() {
        let result = ApiKey::from_env_file(Path::new("/nonexistent/.env"));
        assert!(matches!(result, Err(EtlError::SecretValidation(_))));
    }
}
