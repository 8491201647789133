pub mod secret;
pub mod settings;

pub use secret::{ApiKey, Secrets};
pub use settings::{Settings, SettingsBuilder};
