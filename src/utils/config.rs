//! Configuration management for quietdoc
//!
//! This module handles loading and managing application configuration
//! from the user config file and environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::utils::error::{QuietDocError, Result};
use crate::window::resize::{MIN_HEIGHT, MIN_WIDTH};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window configuration
    pub window: WindowConfig,

    /// Frameless chrome configuration
    pub chrome: ChromeConfig,

    /// General application settings
    pub general: GeneralConfig,
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial window x position (screen units)
    pub x: i32,

    /// Initial window y position (screen units)
    pub y: i32,

    /// Initial window width
    pub width: u32,

    /// Initial window height
    pub height: u32,

    /// Window title
    pub title: String,

    /// Always on top
    pub always_on_top: bool,

    /// Start in reduced-chrome mode
    pub start_reduced: bool,

    /// Write the final window geometry back on exit
    pub remember_geometry: bool,
}

/// Border band and layout margin of one display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromeModeConfig {
    /// Hit-test band thickness along each edge
    pub border_width: i32,

    /// Margin reserved around the content; must be at least `border_width`
    pub layout_margin: i32,
}

/// Frameless chrome configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Metrics used in normal mode
    pub normal: ChromeModeConfig,

    /// Metrics used in reduced-chrome mode
    pub reduced: ChromeModeConfig,

    /// Height of the custom title bar (double-click toggles maximize)
    pub title_bar_height: i32,

    /// Height of the status strip in normal mode
    pub status_bar_height: i32,

    /// Width of the file list panel when visible
    pub file_list_width: i32,
}

/// General application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            width: 1000,
            height: 700,
            title: "quietdoc".to_string(),
            always_on_top: false,
            start_reduced: false,
            remember_geometry: true,
        }
    }
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            normal: ChromeModeConfig {
                border_width: 15,
                layout_margin: 15,
            },
            reduced: ChromeModeConfig {
                border_width: 15,
                layout_margin: 25,
            },
            title_bar_height: 30,
            status_bar_height: 20,
            file_list_width: 200,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. User config file (~/.config/quietdoc/config.toml on Linux), or `path` if given
    /// 3. Environment variables (QUIETDOC_* prefix)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let file = path.map(Path::to_path_buf).or_else(Self::user_config_path);
        if let Some(file) = file {
            if file.exists() {
                config = Self::from_file(&file)?;
                log::debug!("Loaded configuration from {:?}", file);
            }
        }

        config.apply_env_overrides()?;
        config.enforce_minimum_size();
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to `path`, or the user config file
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(Self::user_config_path)
            .ok_or_else(|| QuietDocError::Config("Cannot determine user config path".to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| QuietDocError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let toml = toml::to_string_pretty(self)?;

        std::fs::write(&path, toml)
            .map_err(|e| QuietDocError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Read a configuration file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| QuietDocError::Config(format!("Failed to read config file: {}", e)))?;

        Ok(toml::from_str(&contents)?)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(width) = std::env::var("QUIETDOC_WINDOW_WIDTH") {
            self.window.width = width.parse()
                .map_err(|_| QuietDocError::Config("Invalid QUIETDOC_WINDOW_WIDTH".to_string()))?;
        }

        if let Ok(height) = std::env::var("QUIETDOC_WINDOW_HEIGHT") {
            self.window.height = height.parse()
                .map_err(|_| QuietDocError::Config("Invalid QUIETDOC_WINDOW_HEIGHT".to_string()))?;
        }

        // One override for both modes; margins are widened by ModeConfig if needed
        if let Ok(border) = std::env::var("QUIETDOC_BORDER_WIDTH") {
            let border: i32 = border.parse()
                .map_err(|_| QuietDocError::Config("Invalid QUIETDOC_BORDER_WIDTH".to_string()))?;
            self.chrome.normal.border_width = border;
            self.chrome.reduced.border_width = border;
        }

        if let Ok(log_level) = std::env::var("QUIETDOC_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        Ok(())
    }

    /// Raise the window size to the minimum every resize honors
    pub fn enforce_minimum_size(&mut self) {
        let (width, height) = (self.window.width, self.window.height);
        self.window.width = width.max(MIN_WIDTH as u32);
        self.window.height = height.max(MIN_HEIGHT as u32);

        if (width, height) != (self.window.width, self.window.height) {
            log::warn!(
                "Window size {}x{} is below the minimum, using {}x{}",
                width,
                height,
                self.window.width,
                self.window.height
            );
        }
    }

    /// Validate configuration values
    ///
    /// Chrome metrics are deliberately not checked here: a bad border band is
    /// recoverable and handled by `ModeConfig::from_config`.
    pub fn validate(&self) -> Result<()> {
        if self.window.width < MIN_WIDTH as u32 || self.window.height < MIN_HEIGHT as u32 {
            return Err(QuietDocError::Config(format!(
                "Window must be at least {}x{}",
                MIN_WIDTH, MIN_HEIGHT
            )));
        }

        if self.chrome.title_bar_height < 0
            || self.chrome.status_bar_height < 0
            || self.chrome.file_list_width < 0
        {
            return Err(QuietDocError::Config("Chrome sizes must not be negative".to_string()));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(QuietDocError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level,
                valid_log_levels
            )));
        }

        Ok(())
    }

    /// Get user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quietdoc").join("config.toml"))
    }
}
