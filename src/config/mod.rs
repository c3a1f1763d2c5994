//! Configuration module for auto-youtube-dl.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Writing a template when none exists
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{
    write_template, Config, DownloaderConfig, SettingsConfig, CONFIG_FILE_NAME, CONFIG_TEMPLATE,
};
pub use validation::validate_config;
