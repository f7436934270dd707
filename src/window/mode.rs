//! Display modes and their chrome metrics
//!
//! Each mode owns one `ChromeMetrics` pair (border band + layout margin).
//! Switching modes only selects a different entry of the table, so toggling
//! back and forth always restores the exact original values.

use crate::utils::clamp;
use crate::utils::config::{ChromeConfig, ChromeModeConfig};
use crate::utils::error::{QuietDocError, Result};
use crate::window::geometry::Size;
use crate::window::resize::MIN_HEIGHT;
use log::{info, warn};

/// Border width used when a configured or effective value is unusable
pub const DEFAULT_BORDER_WIDTH: i32 = 15;

/// Display mode of the main window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    /// Title bar, file list and status strip visible
    #[default]
    Normal,

    /// Reading area only
    Reduced,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Normal => DisplayMode::Reduced,
            DisplayMode::Reduced => DisplayMode::Normal,
        }
    }
}

/// Border band thickness and the layout margin reserved for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeMetrics {
    border_width: i32,
    layout_margin: i32,
}

impl ChromeMetrics {
    /// Create metrics, enforcing `0 < border_width < MIN_HEIGHT / 2` and
    /// `layout_margin >= border_width`
    pub fn new(border_width: i32, layout_margin: i32) -> Result<Self> {
        if border_width <= 0 {
            return Err(QuietDocError::invalid_input(format!(
                "border width must be positive, got {}",
                border_width
            )));
        }

        if border_width >= MIN_HEIGHT / 2 {
            return Err(QuietDocError::invalid_input(format!(
                "border width {} does not fit a {}px window",
                border_width, MIN_HEIGHT
            )));
        }

        if layout_margin < border_width {
            return Err(QuietDocError::invalid_input(format!(
                "layout margin {} is smaller than border width {}",
                layout_margin, border_width
            )));
        }

        Ok(Self {
            border_width,
            layout_margin,
        })
    }

    pub fn border_width(&self) -> i32 {
        self.border_width
    }

    pub fn layout_margin(&self) -> i32 {
        self.layout_margin
    }
}

impl Default for ChromeMetrics {
    fn default() -> Self {
        Self {
            border_width: DEFAULT_BORDER_WIDTH,
            layout_margin: DEFAULT_BORDER_WIDTH,
        }
    }
}

impl TryFrom<ChromeModeConfig> for ChromeMetrics {
    type Error = QuietDocError;

    fn try_from(config: ChromeModeConfig) -> Result<Self> {
        ChromeMetrics::new(config.border_width, config.layout_margin)
    }
}

/// Record of a display mode switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub from: DisplayMode,
    pub to: DisplayMode,
    pub metrics: ChromeMetrics,
}

/// Chrome metrics for every display mode plus the active mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeConfig {
    normal: ChromeMetrics,
    reduced: ChromeMetrics,
    mode: DisplayMode,
}

impl ModeConfig {
    pub fn new(normal: ChromeMetrics, reduced: ChromeMetrics) -> Self {
        Self {
            normal,
            reduced,
            mode: DisplayMode::Normal,
        }
    }

    /// Build from configuration, falling back per mode on invalid metrics
    pub fn from_config(config: &ChromeConfig) -> Self {
        Self::new(
            Self::metrics_or_default(DisplayMode::Normal, config.normal),
            Self::metrics_or_default(DisplayMode::Reduced, config.reduced),
        )
    }

    fn metrics_or_default(mode: DisplayMode, config: ChromeModeConfig) -> ChromeMetrics {
        ChromeMetrics::try_from(config).unwrap_or_else(|err| {
            // A margin that is merely too small is widened rather than discarded
            if config.border_width > 0 && config.border_width < MIN_HEIGHT / 2 {
                warn!("{:?} mode: {}; widening margin to the border width", mode, err);
                return ChromeMetrics {
                    border_width: config.border_width,
                    layout_margin: config.border_width,
                };
            }
            warn!("{:?} mode: {}; using default chrome metrics", mode, err);
            ChromeMetrics::default()
        })
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn metrics(&self) -> ChromeMetrics {
        self.metrics_for(self.mode)
    }

    pub fn metrics_for(&self, mode: DisplayMode) -> ChromeMetrics {
        match mode {
            DisplayMode::Normal => self.normal,
            DisplayMode::Reduced => self.reduced,
        }
    }

    pub fn border_width(&self) -> i32 {
        self.metrics().border_width
    }

    pub fn layout_margin(&self) -> i32 {
        self.metrics().layout_margin
    }

    /// Whether the active border satisfies `0 < border < min(width, height) / 2`
    pub fn border_fits(&self, size: Size) -> bool {
        let border = self.border_width();
        border > 0 && border < size.width.min(size.height) / 2
    }

    /// Border width to hit-test a window of `size` with
    ///
    /// When the active border does not fit, the default (squeezed into range
    /// if necessary) is used. This runs on every hover, so it does not log;
    /// callers report the fallback where it matters.
    pub fn effective_border_width(&self, size: Size) -> i32 {
        if self.border_fits(size) {
            return self.border_width();
        }
        let limit = size.width.min(size.height) / 2;
        clamp(DEFAULT_BORDER_WIDTH, 1, (limit - 1).max(1))
    }

    /// Switch to `mode`; `None` if it is already active
    pub fn set_mode(&mut self, mode: DisplayMode) -> Option<ModeChange> {
        if mode == self.mode {
            return None;
        }
        Some(self.toggle())
    }

    pub fn toggle(&mut self) -> ModeChange {
        let to = self.mode.toggled();
        let change = ModeChange {
            from: self.mode,
            to,
            metrics: self.metrics_for(to),
        };
        self.mode = to;
        info!(
            "Display mode {:?} -> {:?} (border {}px, margin {}px)",
            change.from,
            change.to,
            change.metrics.border_width,
            change.metrics.layout_margin
        );
        change
    }
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self::from_config(&ChromeConfig::default())
    }
}
