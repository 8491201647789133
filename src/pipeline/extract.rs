//! Weather API retrieval and raw document persistence.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::{ApiKey, Settings};
use crate::error::{EtlError, Result};
use crate::utils::{ensure_parent_dir, replace_with_backup};

/// Blocking client for the OpenWeatherMap current weather endpoint.
pub struct WeatherClient {
    client: Client,
    api_url: String,
    units: String,
    api_key: ApiKey,
}

impl WeatherClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            units: settings.units.clone(),
            api_key: settings.api_key().clone(),
        })
    }

    /// Fetch the current observation for a coordinate as untyped JSON.
    pub fn fetch_current(&self, latitude: f64, longitude: f64) -> Result<Value> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();

        debug!(url = %self.api_url, %lat, %lon, units = %self.units, "requesting current weather");

        // reqwest errors carry the full URL, including the appid parameter
        let resp = self
            .client
            .get(&self.api_url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.expose()),
                ("units", self.units.as_str()),
            ])
            .send()
            .map_err(|e| EtlError::Request(e.without_url()))?;

        let status = resp.status();
        let body = resp.text().map_err(|e| EtlError::Request(e.without_url()))?;

        if !status.is_success() {
            return Err(EtlError::ExtractionStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(EtlError::InvalidJson)
    }
}

/// Fetch the current weather and store it at `raw_path`.
pub fn extract(settings: &Settings) -> Result<()> {
    let client = WeatherClient::from_settings(settings)?;
    extract_with(&client, settings)
}

/// [`extract`] with a caller-supplied client.
pub fn extract_with(client: &WeatherClient, settings: &Settings) -> Result<()> {
    info!(path = %settings.raw_path.display(), "extracting weather data");

    ensure_parent_dir(&settings.raw_path)?;
    let document = client.fetch_current(settings.latitude, settings.longitude)?;
    persist_raw(&settings.raw_path, &document)?;

    info!(path = %settings.raw_path.display(), "raw weather data written");
    Ok(())
}

/// Write a raw document, backing up any previous one first.
pub fn persist_raw(raw_path: &Path, document: &Value) -> Result<()> {
    ensure_parent_dir(raw_path)?;
    let bytes = serde_json::to_vec(document).map_err(std::io::Error::from)?;

    replace_with_backup(raw_path, &bytes)?;

    debug!(path = %raw_path.display(), bytes = bytes.len(), "raw document persisted");
    Ok(())
}
