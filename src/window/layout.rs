//! Placement of the nested content regions
//!
//! The layout owner keeps the title bar, file list, reading area and status
//! strip in sync with the window size and the active display mode. Every
//! region sits inside the layout margin, which is never narrower than the
//! hit-test band, so content never overlaps the border handles.

use crate::utils::config::ChromeConfig;
use crate::window::controller::{InteractionEvent, InteractionEventHandler};
use crate::window::geometry::{Point, Size, WindowRect};
use crate::window::mode::{ChromeMetrics, DisplayMode};
use crate::window::router::NestedRegionId;
use log::debug;
use std::cell::Cell;
use std::rc::Rc;

/// Fixed sizes of the chrome pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSpec {
    pub title_bar_height: i32,
    pub status_bar_height: i32,
    pub file_list_width: i32,
}

impl From<&ChromeConfig> for LayoutSpec {
    fn from(config: &ChromeConfig) -> Self {
        Self {
            title_bar_height: config.title_bar_height,
            status_bar_height: config.status_bar_height,
            file_list_width: config.file_list_width,
        }
    }
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self::from(&ChromeConfig::default())
    }
}

/// Window-local rectangles of the content regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLayout {
    spec: LayoutSpec,
    size: Size,
    mode: DisplayMode,
    metrics: ChromeMetrics,
    file_list_visible: bool,
    title_bar: Option<WindowRect>,
    file_list: Option<WindowRect>,
    reading_area: WindowRect,
    status_strip: Option<WindowRect>,
}

impl ContentLayout {
    /// Lay out a window of `size`
    ///
    /// Reduced mode shows the reading area only. In normal mode the title
    /// bar spans the top, the status strip the bottom, and the file list (if
    /// visible) sits left of the reading area.
    pub fn compute(
        spec: LayoutSpec,
        size: Size,
        mode: DisplayMode,
        metrics: ChromeMetrics,
        file_list_visible: bool,
    ) -> Self {
        let m = metrics.layout_margin();
        let inner = WindowRect::new(m, m, (size.width - 2 * m).max(0), (size.height - 2 * m).max(0));

        let mut layout = Self {
            spec,
            size,
            mode,
            metrics,
            file_list_visible,
            title_bar: None,
            file_list: None,
            reading_area: inner,
            status_strip: None,
        };

        if mode == DisplayMode::Reduced {
            return layout;
        }

        let title_h = spec.title_bar_height.min(inner.height);
        let status_h = spec.status_bar_height.min(inner.height - title_h);
        let body_y = inner.y + title_h;
        let body_h = inner.height - title_h - status_h;

        layout.title_bar = Some(WindowRect::new(inner.x, inner.y, inner.width, title_h));
        layout.status_strip = Some(WindowRect::new(inner.x, inner.bottom() - status_h, inner.width, status_h));

        let list_w = if file_list_visible {
            let w = spec.file_list_width.min(inner.width);
            layout.file_list = Some(WindowRect::new(inner.x, body_y, w, body_h));
            w
        } else {
            0
        };
        layout.reading_area = WindowRect::new(inner.x + list_w, body_y, inner.width - list_w, body_h);

        layout
    }

    /// Recompute for a new window size
    pub fn resized(&self, size: Size) -> Self {
        Self::compute(self.spec, size, self.mode, self.metrics, self.file_list_visible)
    }

    /// Recompute for a display mode switch
    pub fn with_mode(&self, mode: DisplayMode, metrics: ChromeMetrics) -> Self {
        Self::compute(self.spec, self.size, mode, metrics, self.file_list_visible)
    }

    pub fn with_file_list(&self, visible: bool) -> Self {
        Self::compute(self.spec, self.size, self.mode, self.metrics, visible)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn file_list_visible(&self) -> bool {
        self.file_list_visible
    }

    pub fn title_bar(&self) -> Option<WindowRect> {
        self.title_bar
    }

    pub fn status_strip_visible(&self) -> bool {
        self.status_strip.is_some()
    }

    /// Rectangle of a nested region, `None` while hidden
    pub fn region_rect(&self, id: NestedRegionId) -> Option<WindowRect> {
        let rect = match id {
            NestedRegionId::ReadingArea => Some(self.reading_area),
            NestedRegionId::FileList => self.file_list,
            NestedRegionId::StatusStrip => self.status_strip,
        };
        rect.filter(|rect| !rect.is_empty())
    }

    /// Nested region under a window-local point, with the point in that
    /// region's own frame
    pub fn region_at(&self, point: Point) -> Option<(NestedRegionId, Point)> {
        [NestedRegionId::StatusStrip, NestedRegionId::FileList, NestedRegionId::ReadingArea]
            .into_iter()
            .find_map(|id| {
                let rect = self.region_rect(id)?;
                rect.contains(point).then(|| (id, point - rect.top_left()))
            })
    }

    /// Screen position of a region's origin for a window at `window`
    pub fn screen_offset(&self, id: NestedRegionId, window: WindowRect) -> Option<Point> {
        self.region_rect(id).map(|rect| window.top_left() + rect.top_left())
    }
}

/// Keeps a shared `ContentLayout` in step with controller notifications
pub struct LayoutSync {
    layout: Rc<Cell<ContentLayout>>,
}

impl LayoutSync {
    pub fn new(layout: Rc<Cell<ContentLayout>>) -> Self {
        Self { layout }
    }
}

impl InteractionEventHandler for LayoutSync {
    fn handle_event(&mut self, event: InteractionEvent) {
        let layout = self.layout.get();
        match event {
            InteractionEvent::GeometryChanged { rect, .. } if rect.size() != layout.size() => {
                debug!("Relayout for {}x{}", rect.width, rect.height);
                self.layout.set(layout.resized(rect.size()));
            }
            InteractionEvent::ModeChanged(change) => {
                debug!("Relayout for {:?} mode", change.to);
                self.layout.set(layout.with_mode(change.to, change.metrics));
            }
            _ => {}
        }
    }
}
