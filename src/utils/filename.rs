use chrono::{DateTime, Local, TimeZone};
use std::path::{Path, PathBuf};

use crate::error::{EtlError, Result};
use crate::utils::constants::{BACKUP_EXTENSION, BACKUP_TIMESTAMP_FORMAT};

/// Generate the backup name for `path` with format: {stem}_{YYYYMMDDHHMMSS}.bak
pub fn backup_path(path: &Path) -> Result<PathBuf> {
    backup_path_at(path, &Local::now())
}

/// Same as [`backup_path`] with an explicit timestamp.
pub fn backup_path_at<Tz>(path: &Path, now: &DateTime<Tz>) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let stem = path.file_stem().ok_or_else(|| {
        EtlError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Cannot derive a backup name for '{}'", path.display()),
        ))
    })?;

    let filename = format!(
        "{}_{}.{}",
        stem.to_string_lossy(),
        now.format(BACKUP_TIMESTAMP_FORMAT),
        BACKUP_EXTENSION
    );
    Ok(path.with_file_name(filename))
}

/// Disambiguate a backup name taken within the same second: {stem}_{YYYYMMDDHHMMSS}_{n}.bak
pub fn numbered_backup_path(backup: &Path, n: u32) -> PathBuf {
    let stem = backup
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    backup.with_file_name(format!("{}_{}.{}", stem, n, BACKUP_EXTENSION))
}
