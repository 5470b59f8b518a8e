//! Configuration module
//!
//! Display, preview and CSV settings, loaded from TOML.

#[allow(clippy::module_inception)]
pub mod config;

pub use config::{Config, CsvConfig, DisplayConfig, PreviewConfig};
