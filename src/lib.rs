pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use crate::config::{ApiKey, Settings};
pub use error::{EtlError, Result};
pub use pipeline::{cleanup, extract, load, transform};
