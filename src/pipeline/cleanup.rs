use tracing::{debug, info};

use crate::config::Settings;
use crate::error::Result;
use crate::utils::remove_if_exists;

/// Remove the raw and processed intermediates. Missing files are not an error.
pub fn cleanup(settings: &Settings) -> Result<()> {
    info!("cleaning up intermediate files");

    for path in [&settings.raw_path, &settings.processed_path] {
        if remove_if_exists(path)? {
            debug!(path = %path.display(), "removed");
        }
    }

    Ok(())
}
