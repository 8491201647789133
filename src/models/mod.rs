pub mod weather;

pub use weather::WeatherObservation;
