use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;
#[cfg(unix)]
use crate::utils::constants::DEFAULT_FILE_MODE;
use crate::utils::filename::{backup_path, numbered_backup_path};

/// Create the parent directory of `path` (recursively) if it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Rename an existing file at `path` to its timestamped backup name.
///
/// An existing backup is never replaced: backups taken within the same second
/// get a `_1`, `_2`, ... suffix. Returns the backup location, or `None` when
/// there was nothing to back up.
pub fn backup_existing(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    let base = backup_path(path)?;
    let mut backup = base.clone();
    let mut counter = 0;
    while backup.exists() {
        counter += 1;
        backup = numbered_backup_path(&base, counter);
    }

    fs::rename(path, &backup)?;
    debug!(from = %path.display(), to = %backup.display(), "backed up existing file");
    Ok(Some(backup))
}

/// Back up the file at `path`, then atomically write `contents` in its place.
///
/// The new file keeps the permissions of the one it replaces.
pub fn replace_with_backup(path: &Path, contents: &[u8]) -> Result<Option<PathBuf>> {
    let previous = fs::metadata(path).ok().map(|meta| meta.permissions());

    let backup = backup_existing(path)?;
    write_file(path, contents, previous)?;
    Ok(backup)
}

/// Write `contents` to a temporary file next to `path`, then rename it into place.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let previous = fs::metadata(path).ok().map(|meta| meta.permissions());
    write_file(path, contents, previous)
}

fn write_file(path: &Path, contents: &[u8], permissions: Option<fs::Permissions>) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;

    // Temporary files are created owner-only
    if let Some(permissions) = permissions.or_else(default_permissions) {
        tmp.as_file().set_permissions(permissions)?;
    }

    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(DEFAULT_FILE_MODE))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

/// Delete `path`, treating an already missing file as success.
///
/// Returns whether a file was actually removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
