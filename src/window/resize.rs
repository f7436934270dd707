//! Edge resize geometry for the borderless window
//!
//! Given the direction fixed at the start of a resize gesture, the window
//! rectangle captured at that moment and the pointer displacement since,
//! this module computes the rectangle to apply.

use crate::window::geometry::{Point, WindowRect};

/// Minimum window width enforced by every resize
pub const MIN_WIDTH: i32 = 300;

/// Minimum window height enforced by every resize
pub const MIN_HEIGHT: i32 = 200;

/// Resize direction enumeration
///
/// There is no `Top`: the top edge is the move handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    Right,
    Left,
    Bottom,
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl ResizeDirection {
    /// Whether this direction drags the left edge (and so moves the origin)
    pub fn moves_left_edge(&self) -> bool {
        matches!(self, Self::Left | Self::BottomLeft | Self::TopLeft)
    }

    pub fn moves_right_edge(&self) -> bool {
        matches!(self, Self::Right | Self::BottomRight | Self::TopRight)
    }

    /// Whether this direction drags the top edge (and so moves the origin)
    pub fn moves_top_edge(&self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    pub fn moves_bottom_edge(&self) -> bool {
        matches!(self, Self::Bottom | Self::BottomRight | Self::BottomLeft)
    }
}

/// Compute the new window rectangle for a resize gesture
///
/// Width and height never drop below `MIN_WIDTH` x `MIN_HEIGHT`. When the
/// clamp triggers on an edge that moves the origin, the origin stays where
/// the minimum size was reached, so the opposite edge does not move.
pub fn solve(direction: ResizeDirection, anchor: WindowRect, delta: Point) -> WindowRect {
    let mut rect = anchor;

    if direction.moves_left_edge() {
        rect.x += delta.x;
        rect.width -= delta.x;
    } else if direction.moves_right_edge() {
        rect.width += delta.x;
    }

    if direction.moves_top_edge() {
        rect.y += delta.y;
        rect.height -= delta.y;
    } else if direction.moves_bottom_edge() {
        rect.height += delta.y;
    }

    if rect.width < MIN_WIDTH {
        rect.width = MIN_WIDTH;
        if direction.moves_left_edge() {
            rect.x = anchor.right() - MIN_WIDTH;
        }
    }

    if rect.height < MIN_HEIGHT {
        rect.height = MIN_HEIGHT;
        if direction.moves_top_edge() {
            rect.y = anchor.bottom() - MIN_HEIGHT;
        }
    }

    rect
}
