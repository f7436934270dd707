//! Window management module for quietdoc
//!
//! This module turns raw pointer events into move/resize operations and
//! cursor feedback for a window that has no OS-drawn border or title bar.
//! The interaction core (hit testing, sessions, geometry, cursors, routing)
//! is platform independent and talks to the real window only through the
//! `WindowSurface` trait; `winit_window` provides the winit implementation.

pub mod controller;
pub mod cursor;
pub mod events;
pub mod geometry;
pub mod layout;
pub mod mode;
pub mod resize;
pub mod router;
pub mod session;
pub mod winit_window;

pub use controller::{GeometryCause, InteractionController, InteractionEvent, InteractionEventHandler};
pub use cursor::CursorPresenter;
pub use geometry::{Point, Size, WindowRect};
pub use hit_test::{classify, Region};
pub use layout::{ContentLayout, LayoutSpec};
pub use mode::{ChromeMetrics, DisplayMode, ModeChange, ModeConfig};
pub use resize::{solve, ResizeDirection, MIN_HEIGHT, MIN_WIDTH};
pub use router::{EventRouter, NestedRegion, NestedRegionId};
pub use session::{Session, SessionMode};
pub use winit_window::WinitWindowImpl;

use winit::window::CursorIcon;

/// Platform primitives the interaction core needs from a window
pub trait WindowSurface {
    /// Current window rectangle in screen coordinates
    fn outer_rect(&self) -> WindowRect;

    /// Move the window without changing its size
    ///
    /// # Arguments
    ///
    /// * `top_left` - New screen position of the top-left corner
    fn set_position(&mut self, top_left: Point);

    /// Move and resize the window in one step
    ///
    /// # Arguments
    ///
    /// * `rect` - New screen rectangle
    fn apply_rect(&mut self, rect: WindowRect);

    /// Show a cursor affordance
    fn set_cursor(&mut self, cursor: CursorIcon);

    /// Maximize the window, or restore it if already maximized
    fn toggle_maximized(&mut self);
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Stage of a pointer interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    DoubleClick,
}

/// A pointer notification as seen by the interaction core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Position in the receiver's local frame
    pub position: Point,

    /// Position in screen coordinates
    pub global: Point,

    /// Button that changed state (down, up and double-click only)
    pub button: Option<MouseButton>,

    /// Whether the primary button is held after this event
    pub primary_held: bool,
}

impl PointerEvent {
    /// Pointer motion with no button held
    pub fn hover(position: Point, global: Point) -> Self {
        Self {
            position,
            global,
            button: None,
            primary_held: false,
        }
    }

    /// Pointer motion with the primary button held
    pub fn drag(position: Point, global: Point) -> Self {
        Self {
            primary_held: true,
            ..Self::hover(position, global)
        }
    }

    /// Button press
    pub fn press(button: MouseButton, position: Point, global: Point) -> Self {
        Self {
            position,
            global,
            button: Some(button),
            primary_held: button == MouseButton::Left,
        }
    }

    /// Button release
    pub fn release(button: MouseButton, position: Point, global: Point) -> Self {
        Self {
            position,
            global,
            button: Some(button),
            primary_held: false,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.button == Some(MouseButton::Left)
    }
}

/// Keyboard key types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Toggle the file list
    F2,

    /// Toggle the display mode
    F3,

    Escape,

    // Other keys can be added as needed
    Other(String),
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool, // Windows/Super/Command key
}

/// Window events that can occur
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// Window close requested
    CloseRequested,

    /// Window resized by the platform
    Resized { width: u32, height: u32 },

    /// Window moved by the platform
    Moved { x: i32, y: i32 },

    /// Pointer event in window-local coordinates
    Pointer { phase: PointerPhase, button: Option<MouseButton>, position: Point, primary_held: bool },

    /// Pointer left the window
    PointerLeft,

    /// Key pressed
    KeyPressed { key: Key, modifiers: KeyModifiers },
}
