//! Forwarding of pointer events from nested content regions
//!
//! Content regions (reading area, file list, status strip) receive pointer
//! events in their own frame. Border detection must still see those events,
//! so the router remaps each one into the top-level window's frame and
//! hands it to the controller. It never consumes the event: the region's
//! own handlers (scrolling, selection) still run afterwards.

use crate::window::controller::InteractionController;
use crate::window::geometry::Point;
use crate::window::{PointerEvent, PointerPhase, WindowSurface};
use log::{trace, warn};

/// Nested content regions that can forward pointer events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestedRegionId {
    ReadingArea,
    FileList,
    StatusStrip,
}

/// A registered nested region: its id and where its origin is on screen
pub struct NestedRegion {
    id: NestedRegionId,
    screen_offset: Box<dyn Fn() -> Point>,
}

impl NestedRegion {
    pub fn new(id: NestedRegionId, screen_offset: impl Fn() -> Point + 'static) -> Self {
        Self {
            id,
            screen_offset: Box::new(screen_offset),
        }
    }

    pub fn id(&self) -> NestedRegionId {
        self.id
    }

    /// Current screen position of the region's origin
    pub fn screen_offset(&self) -> Point {
        (self.screen_offset)()
    }
}

impl std::fmt::Debug for NestedRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NestedRegion").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Remaps nested-region events into the window frame
#[derive(Debug)]
pub struct EventRouter {
    regions: Vec<NestedRegion>,
}

impl EventRouter {
    /// Register the nested regions; the set is fixed from here on
    ///
    /// A second descriptor for an already registered id is ignored.
    pub fn new(regions: impl IntoIterator<Item = NestedRegion>) -> Self {
        let mut registered: Vec<NestedRegion> = Vec::new();
        for region in regions {
            if registered.iter().any(|r| r.id == region.id) {
                warn!("Nested region {:?} registered twice, keeping the first", region.id);
                continue;
            }
            registered.push(region);
        }
        Self { regions: registered }
    }

    pub fn is_registered(&self, id: NestedRegionId) -> bool {
        self.region(id).is_some()
    }

    fn region(&self, id: NestedRegionId) -> Option<&NestedRegion> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Re-express an event received by region `id` in the window frame
    ///
    /// `event.position` is local to the region. The global position is
    /// derived from the region's screen offset, the window-local one from
    /// the window's screen origin.
    pub fn remap(&self, id: NestedRegionId, event: &PointerEvent, window_origin: Point) -> Option<PointerEvent> {
        let region = self.region(id)?;
        let global = region.screen_offset() + event.position;
        Some(PointerEvent {
            position: global - window_origin,
            global,
            ..*event
        })
    }

    /// Forward an event received by region `id` to the controller
    ///
    /// Always returns `false`: the event keeps propagating to the region.
    /// Events from regions that were never registered are dropped here.
    pub fn route(
        &self,
        id: NestedRegionId,
        phase: PointerPhase,
        event: &PointerEvent,
        controller: &mut InteractionController,
        surface: &mut dyn WindowSurface,
    ) -> bool {
        let window_origin = surface.outer_rect().top_left();
        match self.remap(id, event, window_origin) {
            Some(remapped) => {
                trace!("{:?} {:?} {:?} -> {:?}", id, phase, event.position, remapped.position);
                controller.handle(phase, &remapped, surface);
            }
            None => trace!("Ignoring {:?} from unregistered region {:?}", phase, id),
        }
        false
    }
}
