use std::fs;

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{EtlError, Result};
use crate::models::WeatherObservation;
use crate::utils::{ensure_parent_dir, replace_with_backup};

/// Flatten the raw document at `raw_path` into a single record at `processed_path`.
///
/// An existing processed file is renamed to a timestamped backup, then
/// replaced. Nothing is written when the raw document is missing or malformed.
pub fn transform(settings: &Settings) -> Result<()> {
    let raw_path = &settings.raw_path;
    let processed_path = &settings.processed_path;

    if !raw_path.exists() {
        return Err(EtlError::MissingInput {
            what: "Raw",
            path: raw_path.clone(),
        });
    }

    info!(from = %raw_path.display(), to = %processed_path.display(), "transforming weather data");

    ensure_parent_dir(processed_path)?;

    let raw = fs::read_to_string(raw_path)?;
    let observation =
        WeatherObservation::from_json(&raw).map_err(|message| EtlError::Transform {
            path: raw_path.clone(),
            message,
        })?;
    let line = observation.to_record_line()?;
    debug!(record = %line.trim_end(), "record rendered");

    replace_with_backup(processed_path, line.as_bytes())?;

    info!(path = %processed_path.display(), "processed record written");
    Ok(())
}
