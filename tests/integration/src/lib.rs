//! Integration test utilities for quietdoc
//!
//! This module provides common utilities for integration testing including:
//! - An in-memory `WindowSurface`
//! - Scripted pointer gestures
//! - Config fixtures

use anyhow::Result;
use quietdoc::utils::Config;
use quietdoc::window::{InteractionController, Point, PointerEvent, PointerPhase, WindowRect, WindowSurface};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use winit::window::CursorIcon;

/// Window that records every request made of it
#[derive(Debug, Clone)]
pub struct FakeSurface {
    pub rect: WindowRect,
    pub cursors: Vec<CursorIcon>,
    pub geometry_requests: usize,
    pub maximized: bool,
}

impl FakeSurface {
    pub fn new(rect: WindowRect) -> Self {
        Self {
            rect,
            cursors: Vec::new(),
            geometry_requests: 0,
            maximized: false,
        }
    }

    /// Window-local and global position of a point in this window
    pub fn at(&self, x: i32, y: i32) -> (Point, Point) {
        let local = Point::new(x, y);
        (local, local + self.rect.top_left())
    }

    pub fn last_cursor(&self) -> Option<CursorIcon> {
        self.cursors.last().copied()
    }
}

impl WindowSurface for FakeSurface {
    fn outer_rect(&self) -> WindowRect {
        self.rect
    }

    fn set_position(&mut self, top_left: Point) {
        self.geometry_requests += 1;
        self.rect = self.rect.moved_to(top_left);
    }

    fn apply_rect(&mut self, rect: WindowRect) {
        self.geometry_requests += 1;
        self.rect = rect;
    }

    fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursors.push(cursor);
    }

    fn toggle_maximized(&mut self) {
        self.maximized = !self.maximized;
    }
}

/// Feed a scripted gesture to the controller
///
/// Returns whether any event was reported as consumed.
pub fn play(
    controller: &mut InteractionController,
    surface: &mut FakeSurface,
    events: &[(PointerPhase, PointerEvent)],
) -> bool {
    events
        .iter()
        .fold(false, |consumed, (phase, event)| controller.handle(*phase, event, surface) || consumed)
}

/// Temporary directory holding a config file
pub struct ConfigFixture {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl ConfigFixture {
    /// Write `contents` as config.toml in a fresh directory
    pub fn with_contents(contents: &str) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, contents)?;
        Ok(Self { temp_dir, path })
    }

    /// Fresh directory with no config file yet
    pub fn empty() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        Ok(Self { temp_dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        Ok(Config::load(Some(&self.path))?)
    }
}

/// Mock pointer gesture generator for testing
pub mod mock_events {
    use quietdoc::window::{MouseButton, Point, PointerEvent, PointerPhase};

    /// Primary-button drag from `start` by `delta`, in `steps` moves, then release
    ///
    /// Positions are given window-local with the window at `origin`. Local
    /// positions of the moves are reported relative to the original window,
    /// as the platform does while the window itself is moving.
    pub fn generate_drag_sequence(
        origin: Point,
        start: Point,
        delta: Point,
        steps: i32,
    ) -> Vec<(PointerPhase, PointerEvent)> {
        let steps = steps.max(1);
        let mut events = vec![(PointerPhase::Down, PointerEvent::press(MouseButton::Left, start, origin + start))];

        for step in 1..=steps {
            let offset = Point::new(delta.x * step / steps, delta.y * step / steps);
            let local = start + offset;
            events.push((PointerPhase::Move, PointerEvent::drag(local, origin + local)));
        }

        let end = start + delta;
        events.push((PointerPhase::Up, PointerEvent::release(MouseButton::Left, end, origin + end)));
        events
    }

    /// Hover over each local point with no button held
    pub fn generate_hover_sequence(origin: Point, points: &[Point]) -> Vec<(PointerPhase, PointerEvent)> {
        points
            .iter()
            .map(|&p| (PointerPhase::Move, PointerEvent::hover(p, origin + p)))
            .collect()
    }
}
