//! Move/resize state machine for the frameless window
//!
//! The controller owns the optional gesture `Session` and is driven by
//! pointer notifications. Every handler runs to completion on the event-loop
//! thread; a session is either absent or complete, never half-built.
//!
//! Transitions:
//!
//! - Idle + primary down in `Top`/`Interior` -> Moving
//! - Idle + primary down in any other region -> Resizing
//! - Moving/Resizing + move with the button held -> geometry update
//! - any + primary up -> Idle
//! - Idle + move with no button held -> cursor update only

use crate::window::cursor::CursorPresenter;
use crate::window::geometry::{Point, Size, WindowRect};
use crate::window::hit_test::{self, Region};
use crate::window::mode::{DisplayMode, ModeChange, ModeConfig};
use crate::window::session::{Session, SessionMode};
use crate::window::{PointerEvent, PointerPhase, WindowSurface};
use log::{debug, trace, warn};

/// Default height of the title bar that reacts to double-clicks
pub const DEFAULT_TITLE_BAR_HEIGHT: i32 = 30;

/// Why the window geometry changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryCause {
    Moved,
    Resized,
}

/// Notifications emitted by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    /// A move or resize gesture began
    SessionStarted { mode: SessionMode, region: Region },

    /// The gesture ended and the controller is idle again
    SessionEnded { mode: SessionMode },

    /// The controller applied a new window rectangle
    GeometryChanged { rect: WindowRect, cause: GeometryCause },

    /// The display mode (and with it the chrome metrics) switched
    ModeChanged(ModeChange),

    /// Maximize was toggled from the title area
    MaximizeToggled,
}

/// Receiver of controller notifications
pub trait InteractionEventHandler {
    /// Handle an interaction event
    fn handle_event(&mut self, event: InteractionEvent);
}

impl<F: FnMut(InteractionEvent)> InteractionEventHandler for F {
    fn handle_event(&mut self, event: InteractionEvent) {
        self(event)
    }
}

/// Turns pointer events into window moves, resizes and cursor updates
pub struct InteractionController {
    /// Chrome metrics per display mode
    modes: ModeConfig,

    /// Active gesture, `None` when idle
    session: Option<Session>,

    /// Cursor feedback
    cursor: CursorPresenter,

    /// Height of the title bar below the top layout margin
    title_bar_height: i32,

    /// Registered listeners
    handlers: Vec<Box<dyn InteractionEventHandler>>,
}

impl InteractionController {
    /// Create an idle controller
    pub fn new(modes: ModeConfig) -> Self {
        Self {
            modes,
            session: None,
            cursor: CursorPresenter::new(),
            title_bar_height: DEFAULT_TITLE_BAR_HEIGHT,
            handlers: Vec::new(),
        }
    }

    pub fn with_title_bar_height(mut self, height: i32) -> Self {
        self.title_bar_height = height;
        self
    }

    /// Register a listener for interaction events
    pub fn add_event_handler(&mut self, handler: Box<dyn InteractionEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn mode_config(&self) -> &ModeConfig {
        &self.modes
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.modes.mode()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mode(&self) -> SessionMode {
        self.session.map_or(SessionMode::Idle, |s| s.mode())
    }

    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    /// Switch display mode on behalf of the mode-toggle command
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Option<ModeChange> {
        let change = self.modes.set_mode(mode)?;
        self.notify(InteractionEvent::ModeChanged(change));
        Some(change)
    }

    pub fn toggle_display_mode(&mut self) -> ModeChange {
        let change = self.modes.toggle();
        self.notify(InteractionEvent::ModeChanged(change));
        change
    }

    /// Window-local y of the bottom of the title area
    ///
    /// The title bar sits below the layout margin, so the area spans the
    /// margin plus the bar itself.
    pub fn title_area_bottom(&self) -> i32 {
        self.modes.layout_margin() + self.title_bar_height
    }

    /// Classify a window-local position with the active border band
    pub fn classify(&self, position: Point, size: Size) -> Region {
        let border = self.modes.effective_border_width(size);
        hit_test::classify(position, size, border)
    }

    /// Dispatch a pointer event by phase
    pub fn handle(&mut self, phase: PointerPhase, event: &PointerEvent, surface: &mut dyn WindowSurface) -> bool {
        match phase {
            PointerPhase::Down => self.on_pointer_down(event, surface),
            PointerPhase::Move => self.on_pointer_move(event, surface),
            PointerPhase::Up => self.on_pointer_up(event, surface),
            PointerPhase::DoubleClick => self.on_double_click(event, surface),
        }
    }

    /// Handle a button press
    ///
    /// Returns whether the event was consumed exclusively, which it never is:
    /// nested content keeps receiving the press.
    pub fn on_pointer_down(&mut self, event: &PointerEvent, surface: &mut dyn WindowSurface) -> bool {
        if !event.is_primary() {
            return false;
        }

        if let Some(stale) = self.session.take() {
            debug!("Discarding {:?} session left without a release", stale.mode());
        }

        let rect = surface.outer_rect();
        if !self.modes.border_fits(rect.size()) {
            warn!(
                "Border width {} does not fit a {}x{} window, using {}",
                self.modes.border_width(),
                rect.width,
                rect.height,
                self.modes.effective_border_width(rect.size())
            );
        }
        let region = self.classify(event.position, rect.size());
        let session = Session::begin(region, event.global, rect);

        debug!(
            "Starting {:?} from {:?} at {:?} (window {:?})",
            session.mode(),
            region,
            event.position,
            rect
        );

        self.session = Some(session);
        self.notify(InteractionEvent::SessionStarted {
            mode: session.mode(),
            region,
        });
        false
    }

    /// Handle pointer motion
    pub fn on_pointer_move(&mut self, event: &PointerEvent, surface: &mut dyn WindowSurface) -> bool {
        match self.session {
            Some(session) if event.primary_held => {
                let current = surface.outer_rect();
                let target = session.target(event.global, current);
                if target != current {
                    self.apply(session, target, surface);
                }
            }
            Some(_) => {
                // The release was lost (e.g. delivered to another window)
                debug!("Pointer moved with no button held, ending session");
                self.end_session(event, surface);
            }
            None if !event.primary_held => {
                let region = self.classify(event.position, surface.outer_rect().size());
                trace!("Hover {:?} -> {:?}", event.position, region);
                self.cursor.present(region, surface);
            }
            None => {}
        }
        false
    }

    /// Handle a button release
    ///
    /// A primary release always returns the controller to idle, wherever the
    /// pointer is. Without a session it only refreshes the cursor.
    pub fn on_pointer_up(&mut self, event: &PointerEvent, surface: &mut dyn WindowSurface) -> bool {
        if event.is_primary() {
            self.end_session(event, surface);
        }
        false
    }

    /// Handle a double-click; in the title area it toggles maximize
    ///
    /// The platform reports the second press of a double-click only as a
    /// double-click, so anywhere else it is handled as an ordinary press.
    pub fn on_double_click(&mut self, event: &PointerEvent, surface: &mut dyn WindowSurface) -> bool {
        if !event.is_primary() {
            return false;
        }
        if event.position.y > self.title_area_bottom() {
            return self.on_pointer_down(event, surface);
        }

        if let Some(session) = self.session.take() {
            self.notify(InteractionEvent::SessionEnded { mode: session.mode() });
        }

        debug!("Title double-click at {:?}, toggling maximize", event.position);
        surface.toggle_maximized();
        self.notify(InteractionEvent::MaximizeToggled);
        false
    }

    fn apply(&mut self, session: Session, target: WindowRect, surface: &mut dyn WindowSurface) {
        let cause = match session {
            Session::Moving { .. } => {
                surface.set_position(target.top_left());
                GeometryCause::Moved
            }
            Session::Resizing { .. } => {
                surface.apply_rect(target);
                GeometryCause::Resized
            }
        };
        trace!("{:?} -> {:?}", cause, target);
        self.notify(InteractionEvent::GeometryChanged { rect: target, cause });
    }

    fn end_session(&mut self, event: &PointerEvent, surface: &mut dyn WindowSurface) {
        if let Some(session) = self.session.take() {
            debug!("Ending {:?} session", session.mode());
            self.notify(InteractionEvent::SessionEnded { mode: session.mode() });
        }

        // Cursor updates are suspended during a gesture; catch up once here
        let region = self.classify(event.position, surface.outer_rect().size());
        self.cursor.present(region, surface);
    }

    fn notify(&mut self, event: InteractionEvent) {
        for handler in self.handlers.iter_mut() {
            handler.handle_event(event);
        }
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(ModeConfig::default())
    }
}
