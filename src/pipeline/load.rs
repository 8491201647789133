use std::fs::{self, OpenOptions};
use std::io::Write;

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{EtlError, Result};
use crate::utils::ensure_parent_dir;

/// Append the processed record to the sink, creating the sink on first use.
pub fn load(settings: &Settings) -> Result<()> {
    let processed_path = &settings.processed_path;
    let sink_path = &settings.sink_path;

    if !processed_path.exists() {
        return Err(EtlError::MissingInput {
            what: "Processed",
            path: processed_path.clone(),
        });
    }

    info!(from = %processed_path.display(), to = %sink_path.display(), "loading processed data");

    let contents = fs::read_to_string(processed_path)?;

    ensure_parent_dir(sink_path)?;
    let mut sink = OpenOptions::new()
        .create(true)
        .append(true)
        .open(sink_path)?;
    sink.write_all(contents.as_bytes())?;
    sink.flush()?;

    debug!(bytes = contents.len(), "appended to sink");
    info!(path = %sink_path.display(), "sink updated");
    Ok(())
}
