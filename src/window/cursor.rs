//! Cursor affordances for the window regions

use crate::window::hit_test::Region;
use crate::window::WindowSurface;
use winit::window::CursorIcon;

impl Region {
    /// Convert to cursor icon
    pub fn to_cursor_icon(&self) -> CursorIcon {
        match self {
            Region::Top => CursorIcon::Move,
            Region::TopLeft | Region::BottomRight => CursorIcon::NwseResize,
            Region::TopRight | Region::BottomLeft => CursorIcon::NeswResize,
            Region::Left | Region::Right => CursorIcon::EwResize,
            Region::Bottom => CursorIcon::NsResize,
            Region::Interior => CursorIcon::Default,
        }
    }
}

/// Pushes the cursor for a region to the window, skipping redundant updates
#[derive(Debug, Default)]
pub struct CursorPresenter {
    current: Option<CursorIcon>,
}

impl CursorPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the cursor for `region`; returns the icon now in effect
    pub fn present(&mut self, region: Region, surface: &mut dyn WindowSurface) -> CursorIcon {
        let icon = region.to_cursor_icon();
        if self.current != Some(icon) {
            surface.set_cursor(icon);
            self.current = Some(icon);
        }
        icon
    }

    /// Last icon pushed to the window
    pub fn current(&self) -> Option<CursorIcon> {
        self.current
    }
}
