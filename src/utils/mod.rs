//! Utility module for quietdoc
//!
//! This module provides common utilities used throughout the application:
//! - Error handling with custom error types
//! - Configuration management
//! - Common helper functions

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::{ChromeConfig, ChromeModeConfig, Config, GeneralConfig, WindowConfig};
pub use error::{QuietDocError, Result};

/// Initialize the application configuration
///
/// Loads configuration from:
/// 1. Default values
/// 2. User configuration file (or `path`, when given)
/// 3. Environment variables
///
/// # Returns
///
/// Returns the loaded configuration or an error if loading fails
pub fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    Config::load(path)
}

/// Clamp a value between min and max
///
/// # Arguments
///
/// * `value` - Value to clamp
/// * `min` - Minimum value
/// * `max` - Maximum value
///
/// # Returns
///
/// The clamped value
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
