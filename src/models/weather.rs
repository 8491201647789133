use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::Result;
use crate::utils::constants::{RECORD_DELIMITER, RECORD_FIELD_COUNT};

// Subset of the OpenWeatherMap "current weather" payload that the record uses
#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    dt: i64,
    weather: Vec<RawCondition>,
    main: RawMain,
    clouds: RawClouds,
    wind: RawWind,
}

#[derive(Debug, Deserialize)]
struct RawCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct RawMain {
    temp: Number,
    humidity: Number,
    pressure: Number,
}

#[derive(Debug, Deserialize)]
struct RawClouds {
    all: Number,
}

#[derive(Debug, Deserialize)]
struct RawWind {
    speed: Number,
}

/// One observation flattened out of a raw weather document.
///
/// Numeric readings keep their JSON representation so the record shows
/// exactly what the API sent (`20.0` stays `20.0`, `50` stays `50`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherObservation {
    pub location: String,
    pub timestamp: i64,
    pub description: String,
    pub temperature: Number,
    pub cloud_coverage: Number,
    pub humidity: Number,
    pub wind_speed: Number,
    pub pressure: Number,
}

impl WeatherObservation {
    /// Project a raw JSON document onto the record fields.
    ///
    /// The error string describes what is missing or mistyped.
    pub fn from_json(raw: &str) -> std::result::Result<Self, String> {
        let doc: RawDocument = serde_json::from_str(raw).map_err(|e| e.to_string())?;

        let description = doc
            .weather
            .into_iter()
            .next()
            .map(|condition| condition.description)
            .ok_or_else(|| "weather condition list is empty".to_string())?;

        check_text_field("name", &doc.name)?;
        check_text_field("description", &description)?;

        Ok(Self {
            location: doc.name,
            timestamp: doc.dt,
            description,
            temperature: doc.main.temp,
            cloud_coverage: doc.clouds.all,
            humidity: doc.main.humidity,
            wind_speed: doc.wind.speed,
            pressure: doc.main.pressure,
        })
    }

    /// Fields in record order: location, timestamp, description, temperature,
    /// cloud coverage, humidity, wind speed, pressure.
    pub fn record_fields(&self) -> [String; RECORD_FIELD_COUNT] {
        [
            self.location.clone(),
            self.timestamp.to_string(),
            self.description.clone(),
            self.temperature.to_string(),
            self.cloud_coverage.to_string(),
            self.humidity.to_string(),
            self.wind_speed.to_string(),
            self.pressure.to_string(),
        ]
    }

    /// Render the semicolon-delimited record line, newline terminated.
    ///
    /// Values are written verbatim, without quoting or escaping.
    pub fn to_record_line(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(RECORD_DELIMITER)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(self.record_fields())?;

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        let line = String::from_utf8(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(line)
    }
}

// Text values go into the record unescaped, so they must not split it
fn check_text_field(field: &str, value: &str) -> std::result::Result<(), String> {
    if value
        .chars()
        .any(|c| c == RECORD_DELIMITER as char || c == '\n' || c == '\r')
    {
        return Err(format!(
            "field `{}` contains the record delimiter or a line break: {:?}",
            field, value
        ));
    }
    Ok(())
}
