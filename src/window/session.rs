//! Live state of a move or resize gesture
//!
//! A `Session` is created whole on primary button-down and dropped whole on
//! button-up; nothing about it is ever updated piecemeal.

use crate::window::geometry::{Point, WindowRect};
use crate::window::hit_test::Region;
use crate::window::resize::{self, ResizeDirection};

/// Kind of gesture in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Idle,
    Moving,
    Resizing,
}

/// An in-progress move or resize gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    /// Dragging the whole window
    Moving {
        /// Pointer position relative to the window's top-left corner
        anchor_offset: Point,
    },

    /// Dragging an edge or corner
    Resizing {
        /// Global pointer position at button-down
        anchor_pointer: Point,

        /// Window rectangle at button-down
        anchor_rect: WindowRect,

        /// Fixed for the whole gesture, wherever the pointer goes
        direction: ResizeDirection,
    },
}

impl Session {
    /// Start the gesture a press in `region` calls for
    pub fn begin(region: Region, global: Point, rect: WindowRect) -> Self {
        match region.resize_direction() {
            Some(direction) => Session::Resizing {
                anchor_pointer: global,
                anchor_rect: rect,
                direction,
            },
            None => Session::Moving {
                anchor_offset: global - rect.top_left(),
            },
        }
    }

    pub fn mode(&self) -> SessionMode {
        match self {
            Session::Moving { .. } => SessionMode::Moving,
            Session::Resizing { .. } => SessionMode::Resizing,
        }
    }

    /// Window rectangle for the pointer now at `global`
    ///
    /// `current` only supplies the size while moving; a resize always
    /// works from its anchor.
    pub fn target(&self, global: Point, current: WindowRect) -> WindowRect {
        match *self {
            Session::Moving { anchor_offset } => current.moved_to(global - anchor_offset),
            Session::Resizing {
                anchor_pointer,
                anchor_rect,
                direction,
            } => resize::solve(direction, anchor_rect, global - anchor_pointer),
        }
    }
}
