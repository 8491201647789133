//! The four pipeline stages.
//!
//! Stages hand data to each other only through the files named in
//! [`Settings`], so each one can be invoked on its own by a scheduler.

pub mod cleanup;
pub mod extract;
pub mod load;
pub mod transform;

pub use cleanup::cleanup;
pub use extract::{extract, extract_with, persist_raw, WeatherClient};
pub use load::load;
pub use transform::transform;

use tracing::info;

use crate::config::Settings;
use crate::error::Result;

/// Run extract, transform, load and cleanup in order, stopping at the first failure.
pub fn run(settings: &Settings) -> Result<()> {
    extract(settings)?;
    transform(settings)?;
    load(settings)?;
    cleanup(settings)?;

    info!(sink = %settings.sink_path.display(), "pipeline run complete");
    Ok(())
}
