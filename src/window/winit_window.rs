//! Winit window implementation for quietdoc
//!
//! This module opens the undecorated window, feeds converted winit events to
//! the interaction controller (directly, or through the event router when
//! the pointer is over a nested content region) and implements
//! `WindowSurface` on top of `winit::window::Window`.

use crate::internal_error;
use crate::utils::config::{ChromeConfig, Config, WindowConfig};
use crate::utils::error::{IntoQuietDocError, QuietDocError, Result};
use crate::window::controller::InteractionController;
use crate::window::events::EventHandler;
use crate::window::geometry::{Point, Size, WindowRect};
use crate::window::layout::{ContentLayout, LayoutSpec, LayoutSync};
use crate::window::mode::{DisplayMode, ModeConfig};
use crate::window::resize::{MIN_HEIGHT, MIN_WIDTH};
use crate::window::router::{EventRouter, NestedRegion, NestedRegionId};
use crate::window::{Key, MouseButton, PointerEvent, WindowEvent, WindowSurface};
use log::{debug, error, info, trace};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent as WinitWindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{CursorIcon, Window, WindowId, WindowLevel};

/// Window operations `WinitSurface` needs from the platform
pub trait NativeWindow {
    /// Ask the platform to move the window; may apply later
    fn request_position(&self, top_left: Point);

    /// Ask the platform to resize the window; may apply later
    fn request_size(&self, size: Size);

    /// Where the window's client area is on screen right now
    fn current_position(&self) -> Option<Point>;

    fn show_cursor(&self, cursor: CursorIcon);

    fn toggle_maximized(&self);
}

impl NativeWindow for Window {
    fn request_position(&self, top_left: Point) {
        self.set_outer_position(PhysicalPosition::new(top_left.x, top_left.y));
    }

    fn request_size(&self, size: Size) {
        // A `Some` return means the size was applied synchronously
        let _ = self.request_inner_size(PhysicalSize::new(size.width.max(1) as u32, size.height.max(1) as u32));
    }

    fn current_position(&self) -> Option<Point> {
        self.inner_position().ok().map(|p| Point::new(p.x, p.y))
    }

    fn show_cursor(&self, cursor: CursorIcon) {
        self.set_cursor(cursor);
    }

    fn toggle_maximized(&self) {
        self.set_maximized(!self.is_maximized());
    }
}

/// `WindowSurface` backed by a winit window
///
/// The cached rectangle only ever holds what the platform reported
/// (`Moved`/`Resized`, or the live position read with each pointer event),
/// never a position that was merely requested. Pointer positions arrive
/// relative to the window's actual location, so adding a pending move to
/// them would count it twice.
pub struct WinitSurface<W: NativeWindow = Window> {
    window: Arc<W>,
    rect: Rc<Cell<WindowRect>>,
}

impl<W: NativeWindow> WinitSurface<W> {
    pub fn new(window: Arc<W>, rect: Rc<Cell<WindowRect>>) -> Self {
        Self { window, rect }
    }

    /// Build a pointer event for a window-local position
    ///
    /// Refreshes the cached origin from the live window position first.
    pub fn pointer_event(
        &self,
        position: Point,
        button: Option<MouseButton>,
        primary_held: bool,
    ) -> PointerEvent {
        let mut rect = self.rect.get();
        if let Some(top_left) = self.window.current_position() {
            if top_left != rect.top_left() {
                rect = rect.moved_to(top_left);
                self.rect.set(rect);
            }
        }

        PointerEvent {
            position,
            global: rect.top_left() + position,
            button,
            primary_held,
        }
    }
}

impl<W: NativeWindow> WindowSurface for WinitSurface<W> {
    fn outer_rect(&self) -> WindowRect {
        self.rect.get()
    }

    fn set_position(&mut self, top_left: Point) {
        self.window.request_position(top_left);
    }

    fn apply_rect(&mut self, rect: WindowRect) {
        self.window.request_position(rect.top_left());
        self.window.request_size(rect.size());
    }

    fn set_cursor(&mut self, cursor: CursorIcon) {
        self.window.show_cursor(cursor);
    }

    fn toggle_maximized(&mut self) {
        self.window.toggle_maximized();
    }
}

/// Commands bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleDisplayMode,
    ToggleFileList,
}

impl Command {
    pub fn for_key(key: &Key) -> Option<Self> {
        match key {
            Key::F2 => Some(Command::ToggleFileList),
            Key::F3 => Some(Command::ToggleDisplayMode),
            _ => None,
        }
    }
}

/// Winit-based window implementation
pub struct WinitWindowImpl {
    /// Window settings used at creation
    config: WindowConfig,

    /// The underlying winit window, created on resume
    window: Option<Arc<Window>>,

    /// Last known window rectangle in screen coordinates
    rect: Rc<Cell<WindowRect>>,

    /// Nested region placement, kept current by `LayoutSync`
    layout: Rc<Cell<ContentLayout>>,

    controller: InteractionController,
    router: EventRouter,
    event_handler: EventHandler,

    /// Error that stopped the event loop
    error: Option<QuietDocError>,
}

impl WinitWindowImpl {
    /// Set up the interaction stack for a window described by `config`
    pub fn new(config: &Config, mode: DisplayMode) -> Self {
        let mut window = config.window.clone();
        window.width = window.width.max(MIN_WIDTH as u32);
        window.height = window.height.max(MIN_HEIGHT as u32);
        let rect = Rc::new(Cell::new(WindowRect::new(window.x, window.y, window.width as i32, window.height as i32)));

        let mut controller = Self::build_controller(&config.chrome);
        controller.set_display_mode(mode);

        let layout = Rc::new(Cell::new(ContentLayout::compute(
            LayoutSpec::from(&config.chrome),
            rect.get().size(),
            controller.display_mode(),
            controller.mode_config().metrics(),
            true,
        )));
        controller.add_event_handler(Box::new(LayoutSync::new(Rc::clone(&layout))));

        let router = EventRouter::new(
            [NestedRegionId::ReadingArea, NestedRegionId::FileList, NestedRegionId::StatusStrip]
                .into_iter()
                .map(|id| {
                    let layout = Rc::clone(&layout);
                    let rect = Rc::clone(&rect);
                    NestedRegion::new(id, move || {
                        let window = rect.get();
                        layout.get().screen_offset(id, window).unwrap_or_else(|| window.top_left())
                    })
                }),
        );

        Self {
            config: window,
            window: None,
            rect,
            layout,
            controller,
            router,
            event_handler: EventHandler::new(),
            error: None,
        }
    }

    fn build_controller(chrome: &ChromeConfig) -> InteractionController {
        InteractionController::new(ModeConfig::from_config(chrome)).with_title_bar_height(chrome.title_bar_height)
    }

    /// Run the window event loop
    ///
    /// Returns the window rectangle at exit.
    pub fn run(mut self) -> Result<WindowRect> {
        let event_loop = EventLoop::new().window_err("Failed to create event loop")?;
        event_loop.run_app(&mut self).window_err("Event loop error")?;

        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(self.rect.get()),
        }
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn layout(&self) -> ContentLayout {
        self.layout.get()
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_decorations(false)
            .with_resizable(true)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_min_inner_size(PhysicalSize::new(MIN_WIDTH as u32, MIN_HEIGHT as u32))
            .with_position(PhysicalPosition::new(self.config.x, self.config.y));

        if self.config.always_on_top {
            attributes = attributes.with_window_level(WindowLevel::AlwaysOnTop);
        }

        let window = Arc::new(event_loop.create_window(attributes).window_err("Failed to create window")?);

        // The platform may have adjusted what was asked for
        let size = window.inner_size();
        let top_left = window
            .outer_position()
            .map(|p| Point::new(p.x, p.y))
            .unwrap_or_else(|_| self.rect.get().top_left());
        self.sync_rect(WindowRect::new(top_left.x, top_left.y, size.width as i32, size.height as i32));

        info!("Window created at {:?}", self.rect.get());
        self.window = Some(window);
        Ok(())
    }

    fn surface(&self) -> Result<WinitSurface> {
        let window = self.window.as_ref().ok_or_else(|| internal_error!("Window used before creation"))?;
        Ok(WinitSurface::new(Arc::clone(window), Rc::clone(&self.rect)))
    }

    /// Record a rectangle reported by the platform
    fn sync_rect(&mut self, rect: WindowRect) {
        let previous = self.rect.get();
        self.rect.set(rect);
        if rect.size() != previous.size() {
            self.layout.set(self.layout.get().resized(rect.size()));
        }
    }

    fn dispatch(&mut self, event: WindowEvent, event_loop: &ActiveEventLoop) -> Result<()> {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized { width, height } => {
                let rect = self.rect.get().resized(Size::new(width as i32, height as i32));
                self.sync_rect(rect);
            }
            WindowEvent::Moved { x, y } => {
                let rect = self.rect.get().moved_to(Point::new(x, y));
                self.sync_rect(rect);
            }
            WindowEvent::Pointer {
                phase,
                button,
                position,
                primary_held,
            } => {
                let mut surface = self.surface()?;
                let event = surface.pointer_event(position, button, primary_held);

                match self.layout.get().region_at(position) {
                    Some((id, local)) => {
                        let local_event = PointerEvent { position: local, ..event };
                        self.router.route(id, phase, &local_event, &mut self.controller, &mut surface);
                    }
                    None => {
                        self.controller.handle(phase, &event, &mut surface);
                    }
                }
            }
            WindowEvent::KeyPressed { key, modifiers } => match Command::for_key(&key) {
                Some(command) => self.run_command(command),
                None => trace!("Unbound key {:?} ({:?})", key, modifiers),
            },
            WindowEvent::PointerLeft => {}
        }
        Ok(())
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::ToggleDisplayMode => {
                self.controller.toggle_display_mode();
            }
            Command::ToggleFileList => {
                let layout = self.layout.get();
                debug!("File list {}", if layout.file_list_visible() { "hidden" } else { "shown" });
                self.layout.set(layout.with_file_list(!layout.file_list_visible()));
            }
        }
    }
}

impl ApplicationHandler for WinitWindowImpl {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            error!("{}", err);
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WinitWindowEvent) {
        let Some(event) = self.event_handler.handle_event(&event) else {
            return;
        };

        if let Err(err) = self.dispatch(event, event_loop) {
            error!("{}", err);
            self.error = Some(err);
            event_loop.exit();
        }
    }
}
