//! Event handling for the winit window
//!
//! This module converts winit events to quietdoc `WindowEvent` types. It
//! tracks what winit reports only as deltas (pointer position, held
//! buttons, modifiers) and detects double-clicks, which winit leaves to
//! the application.

use crate::window::geometry::Point;
use crate::window::{Key, KeyModifiers, MouseButton, PointerPhase, WindowEvent};
use std::time::{Duration, Instant};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent as WinitWindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// Longest gap between two presses of a double-click
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(500);

/// Largest pointer travel between two presses of a double-click
pub const DOUBLE_CLICK_DISTANCE: i32 = 4;

/// Detects double-clicks from a stream of primary presses
#[derive(Debug, Default)]
pub struct ClickTracker {
    last_press: Option<(Point, Instant)>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a primary press now; returns whether it completes a double-click
    pub fn register_press(&mut self, position: Point) -> bool {
        self.register_press_at(position, Instant::now())
    }

    /// Record a primary press at `now`
    ///
    /// The press that completes a double-click is consumed, so a third quick
    /// press starts a new sequence.
    pub fn register_press_at(&mut self, position: Point, now: Instant) -> bool {
        let is_double = match self.last_press {
            Some((last, at)) => {
                let delta = position - last;
                now.saturating_duration_since(at) <= DOUBLE_CLICK_INTERVAL
                    && delta.x.abs() <= DOUBLE_CLICK_DISTANCE
                    && delta.y.abs() <= DOUBLE_CLICK_DISTANCE
            }
            None => false,
        };

        self.last_press = if is_double { None } else { Some((position, now)) };
        is_double
    }

    pub fn reset(&mut self) {
        self.last_press = None;
    }
}

/// Event handler for converting winit events to quietdoc events
pub struct EventHandler {
    /// Current keyboard modifiers state
    modifiers: ModifiersState,

    /// Last known pointer position, window-local
    pointer_position: Point,

    /// Whether the primary button is down
    primary_held: bool,

    clicks: ClickTracker,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        Self {
            modifiers: ModifiersState::empty(),
            pointer_position: Point::default(),
            primary_held: false,
            clicks: ClickTracker::new(),
        }
    }

    /// Handle a winit window event and convert to a quietdoc event
    pub fn handle_event(&mut self, event: &WinitWindowEvent) -> Option<WindowEvent> {
        match event {
            WinitWindowEvent::CloseRequested => Some(WindowEvent::CloseRequested),

            WinitWindowEvent::Resized(size) => Some(WindowEvent::Resized {
                width: size.width,
                height: size.height,
            }),

            WinitWindowEvent::Moved(position) => Some(WindowEvent::Moved {
                x: position.x,
                y: position.y,
            }),

            WinitWindowEvent::Focused(false) => Some(self.focus_lost()),

            WinitWindowEvent::CursorMoved { position, .. } => Some(self.pointer_moved(to_point(*position))),

            WinitWindowEvent::CursorLeft { .. } => Some(WindowEvent::PointerLeft),

            WinitWindowEvent::MouseInput { state, button, .. } => {
                let button = convert_mouse_button(*button)?;
                Some(self.button_changed(*state, button))
            }

            WinitWindowEvent::ModifiersChanged(new_modifiers) => {
                self.modifiers = new_modifiers.state();
                None // Don't emit event for modifier changes alone
            }

            WinitWindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return None;
                }
                match event.physical_key {
                    PhysicalKey::Code(keycode) => Some(WindowEvent::KeyPressed {
                        key: convert_key_code(keycode),
                        modifiers: convert_modifiers(self.modifiers),
                    }),
                    PhysicalKey::Unidentified(_) => None,
                }
            }

            _ => None,
        }
    }

    /// Pointer motion to a window-local position
    pub fn pointer_moved(&mut self, position: Point) -> WindowEvent {
        self.pointer_position = position;
        WindowEvent::Pointer {
            phase: PointerPhase::Move,
            button: None,
            position,
            primary_held: self.primary_held,
        }
    }

    /// Button press or release at the last known position
    pub fn button_changed(&mut self, state: ElementState, button: MouseButton) -> WindowEvent {
        let position = self.pointer_position;
        let phase = match (state, button) {
            (ElementState::Pressed, MouseButton::Left) => {
                self.primary_held = true;
                if self.clicks.register_press(position) {
                    PointerPhase::DoubleClick
                } else {
                    PointerPhase::Down
                }
            }
            (ElementState::Pressed, _) => PointerPhase::Down,
            (ElementState::Released, MouseButton::Left) => {
                self.primary_held = false;
                PointerPhase::Up
            }
            (ElementState::Released, _) => PointerPhase::Up,
        };

        WindowEvent::Pointer {
            phase,
            button: Some(button),
            position,
            primary_held: self.primary_held,
        }
    }

    /// Focus loss ends any gesture as if the primary button were released
    pub fn focus_lost(&mut self) -> WindowEvent {
        self.primary_held = false;
        self.clicks.reset();
        WindowEvent::Pointer {
            phase: PointerPhase::Up,
            button: Some(MouseButton::Left),
            position: self.pointer_position,
            primary_held: false,
        }
    }

    /// Get current modifiers state
    pub fn modifiers(&self) -> ModifiersState {
        self.modifiers
    }

    /// Get current pointer position
    pub fn pointer_position(&self) -> Point {
        self.pointer_position
    }

    pub fn primary_held(&self) -> bool {
        self.primary_held
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Round a physical pointer position to whole pixels
fn to_point(position: PhysicalPosition<f64>) -> Point {
    Point::new(position.x.round() as i32, position.y.round() as i32)
}

/// Convert winit mouse button to quietdoc mouse button
fn convert_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Convert winit key code to quietdoc key
fn convert_key_code(keycode: KeyCode) -> Key {
    match keycode {
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::Escape => Key::Escape,
        other => Key::Other(format!("{:?}", other)),
    }
}

/// Convert winit modifiers to quietdoc modifiers
fn convert_modifiers(modifiers: ModifiersState) -> KeyModifiers {
    KeyModifiers {
        shift: modifiers.shift_key(),
        ctrl: modifiers.control_key(),
        alt: modifiers.alt_key(),
        meta: modifiers.super_key(),
    }
}
