//! Integration tests for the frameless window interaction layer
//!
//! These tests verify:
//! - Border classification across the whole band
//! - Move and resize gestures end to end
//! - Cursor feedback and its suspension during gestures
//! - Display mode round-trips
//! - Forwarding from nested content regions
//! - Configuration files feeding the chrome metrics

use anyhow::Result;
use mockall::mock;
use mockall::predicate::eq;
use quietdoc::window::{
    classify, ContentLayout, DisplayMode, EventRouter, InteractionController, InteractionEvent, LayoutSpec,
    ModeConfig, MouseButton, NestedRegion, NestedRegionId, Point, PointerEvent, PointerPhase, Region, SessionMode,
    Size, WindowRect, WindowSurface,
};
use quietdoc_integration_tests::{mock_events, play, ConfigFixture, FakeSurface};
use std::cell::RefCell;
use std::rc::Rc;
use winit::window::CursorIcon;

mock! {
    pub Surface {}

    impl WindowSurface for Surface {
        fn outer_rect(&self) -> WindowRect;
        fn set_position(&mut self, top_left: Point);
        fn apply_rect(&mut self, rect: WindowRect);
        fn set_cursor(&mut self, cursor: CursorIcon);
        fn toggle_maximized(&mut self);
    }
}

fn window() -> FakeSurface {
    FakeSurface::new(WindowRect::new(100, 100, 500, 400))
}

#[test]
fn test_left_band_classifies_left() {
    let size = Size::new(500, 400);
    for border in [1, 10, 15, 25] {
        for x in 0..=border {
            for y in (border + 1)..(size.height - border) {
                assert_eq!(classify(Point::new(x, y), size, border), Region::Left, "x={} y={} b={}", x, y, border);
            }
        }
    }
}

#[test]
fn test_top_band_classifies_top_and_never_resizes() -> Result<()> {
    let size = Size::new(500, 400);
    let border = 15;
    for y in 0..=border {
        for x in (border + 1)..(size.width - border) {
            assert_eq!(classify(Point::new(x, y), size, border), Region::Top);
        }
    }

    let mut controller = InteractionController::default();
    let mut surface = window();
    for x in [16, 250, 484] {
        let (local, global) = surface.at(x, 3);
        controller.handle(PointerPhase::Down, &PointerEvent::press(MouseButton::Left, local, global), &mut surface);
        assert_eq!(controller.session_mode(), SessionMode::Moving);
        controller.handle(PointerPhase::Up, &PointerEvent::release(MouseButton::Left, local, global), &mut surface);
    }
    Ok(())
}

#[test]
fn test_right_edge_drag_grows_width() {
    let mut controller = InteractionController::default();
    let mut surface = window();
    let origin = surface.rect.top_left();

    let gesture = mock_events::generate_drag_sequence(origin, Point::new(495, 200), Point::new(40, 0), 4);
    let consumed = play(&mut controller, &mut surface, &gesture);

    assert!(!consumed);
    assert!(controller.is_idle());
    assert_eq!(surface.rect, WindowRect::new(100, 100, 540, 400));
}

#[test]
fn test_left_edge_drag_clamps_without_overshoot() {
    let mut controller = InteractionController::default();
    let mut surface = window();
    let origin = surface.rect.top_left();

    let gesture = mock_events::generate_drag_sequence(origin, Point::new(5, 200), Point::new(250, 0), 10);
    play(&mut controller, &mut surface, &gesture);

    // Right edge stays at 600: x is pinned where width reached 300
    assert_eq!(surface.rect, WindowRect::new(300, 100, 300, 400));
}

#[test]
fn test_top_left_corner_clamps_both_axes() {
    let mut controller = InteractionController::default();
    let mut surface = window();
    let origin = surface.rect.top_left();

    let gesture = mock_events::generate_drag_sequence(origin, Point::new(5, 5), Point::new(400, 400), 5);
    play(&mut controller, &mut surface, &gesture);

    assert_eq!(surface.rect, WindowRect::new(300, 300, 300, 200));
}

#[test]
fn test_interior_move_is_size_independent() {
    for rect in [WindowRect::new(100, 100, 500, 400), WindowRect::new(0, 0, 1200, 900)] {
        let mut controller = InteractionController::default();
        let mut surface = FakeSurface::new(rect);

        let (local, global) = surface.at(120, 80);
        controller.handle(PointerPhase::Down, &PointerEvent::press(MouseButton::Left, local, global), &mut surface);

        let target = Point::new(640, 480);
        controller.handle(PointerPhase::Move, &PointerEvent::drag(Point::default(), target), &mut surface);

        assert_eq!(surface.rect.top_left(), Point::new(640 - 120, 480 - 80));
        assert_eq!(surface.rect.size(), rect.size());
    }
}

#[test]
fn test_release_far_outside_window_returns_to_idle() {
    let mut controller = InteractionController::default();
    let mut surface = window();

    let (local, global) = surface.at(495, 395);
    controller.handle(PointerPhase::Down, &PointerEvent::press(MouseButton::Left, local, global), &mut surface);
    assert_eq!(controller.session_mode(), SessionMode::Resizing);

    let far = Point::new(-3000, -3000);
    controller.handle(PointerPhase::Move, &PointerEvent::drag(far, far), &mut surface);
    controller.handle(PointerPhase::Up, &PointerEvent::release(MouseButton::Left, far, far), &mut surface);

    assert!(controller.is_idle());
    // A later hover must not resize anything
    let requests = surface.geometry_requests;
    let (local, global) = surface.at(50, 50);
    controller.handle(PointerPhase::Move, &PointerEvent::hover(local, global), &mut surface);
    assert_eq!(surface.geometry_requests, requests);
}

#[test]
fn test_cursor_feedback_follows_hover() {
    let mut controller = InteractionController::default();
    let mut surface = window();
    let origin = surface.rect.top_left();

    let hovers = mock_events::generate_hover_sequence(
        origin,
        &[
            Point::new(250, 5),
            Point::new(5, 5),
            Point::new(495, 5),
            Point::new(5, 200),
            Point::new(250, 395),
            Point::new(250, 200),
            Point::new(251, 201),
        ],
    );
    play(&mut controller, &mut surface, &hovers);

    // The last hover stays in the interior, so no repeat request
    assert_eq!(
        surface.cursors,
        vec![
            CursorIcon::Move,
            CursorIcon::NwseResize,
            CursorIcon::NeswResize,
            CursorIcon::EwResize,
            CursorIcon::NsResize,
            CursorIcon::Default,
        ]
    );
}

#[test]
fn test_cursor_frozen_during_resize() {
    let mut controller = InteractionController::default();
    let mut surface = window();
    let origin = surface.rect.top_left();

    let gesture = mock_events::generate_drag_sequence(origin, Point::new(250, 395), Point::new(0, 60), 6);
    let (down, rest) = gesture.split_first().unwrap();
    controller.handle(down.0, &down.1, &mut surface);

    let before = surface.cursors.len();
    for (phase, event) in &rest[..rest.len() - 1] {
        controller.handle(*phase, event, &mut surface);
    }
    assert_eq!(surface.cursors.len(), before);

    let (phase, up) = rest[rest.len() - 1];
    controller.handle(phase, &up, &mut surface);
    assert_eq!(surface.cursors.len(), before + 1);
    assert_eq!(surface.rect.height, 460);
}

#[test]
fn test_mode_round_trip_restores_metrics() {
    let mut controller = InteractionController::default();
    let normal = controller.mode_config().metrics();

    controller.toggle_display_mode();
    let reduced = controller.mode_config().metrics();
    assert_eq!(controller.display_mode(), DisplayMode::Reduced);

    controller.toggle_display_mode();
    assert_eq!(controller.display_mode(), DisplayMode::Normal);
    assert_eq!(controller.mode_config().metrics(), normal);

    for metrics in [normal, reduced] {
        assert!(metrics.layout_margin() >= metrics.border_width());
    }
}

#[test]
fn test_router_forwards_without_consuming() {
    let layout = ContentLayout::compute(
        LayoutSpec::default(),
        Size::new(500, 400),
        DisplayMode::Normal,
        ModeConfig::default().metrics(),
        true,
    );
    let mut surface = window();
    let window_rect = surface.rect;

    let router = EventRouter::new([NestedRegionId::ReadingArea, NestedRegionId::StatusStrip].map(|id| {
        NestedRegion::new(id, move || layout.screen_offset(id, window_rect).unwrap_or_default())
    }));

    let mut controller = InteractionController::default();
    let (region, local) = layout.region_at(Point::new(300, 200)).unwrap();
    assert_eq!(region, NestedRegionId::ReadingArea);

    let press = PointerEvent::press(MouseButton::Left, local, Point::default());
    assert!(!router.route(region, PointerPhase::Down, &press, &mut controller, &mut surface));
    assert_eq!(controller.session_mode(), SessionMode::Moving);

    // The remapped press anchors at the window-local point it came from
    let drag = PointerEvent::drag(local, Point::new(100 + 300 + 25, 100 + 200 + 10));
    controller.handle(PointerPhase::Move, &drag, &mut surface);
    assert_eq!(surface.rect.top_left(), Point::new(125, 110));
}

#[test]
fn test_notifications_reach_listeners() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);

    let mut controller = InteractionController::default();
    controller.add_event_handler(Box::new(move |event: InteractionEvent| sink.borrow_mut().push(event)));
    let mut surface = window();
    let origin = surface.rect.top_left();

    play(
        &mut controller,
        &mut surface,
        &mock_events::generate_drag_sequence(origin, Point::new(495, 200), Point::new(30, 0), 3),
    );

    let log = log.borrow();
    assert!(matches!(log.first(), Some(InteractionEvent::SessionStarted { mode: SessionMode::Resizing, .. })));
    assert_eq!(
        log.iter().filter(|e| matches!(e, InteractionEvent::GeometryChanged { .. })).count(),
        3
    );
    assert_eq!(log.last(), Some(&InteractionEvent::SessionEnded { mode: SessionMode::Resizing }));
}

#[test]
fn test_mocked_surface_receives_exact_requests() {
    let mut surface = MockSurface::new();
    surface
        .expect_outer_rect()
        .return_const(WindowRect::new(100, 100, 500, 400));
    surface
        .expect_apply_rect()
        .with(eq(WindowRect::new(100, 100, 540, 400)))
        .times(1)
        .return_const(());
    surface.expect_set_position().never();
    surface
        .expect_set_cursor()
        .with(eq(CursorIcon::EwResize))
        .times(1)
        .return_const(());
    surface.expect_toggle_maximized().never();

    let mut controller = InteractionController::default();
    let down = PointerEvent::press(MouseButton::Left, Point::new(495, 200), Point::new(595, 200 + 100));
    controller.handle(PointerPhase::Down, &down, &mut surface);

    let drag = PointerEvent::drag(Point::new(535, 200), Point::new(635, 300));
    controller.handle(PointerPhase::Move, &drag, &mut surface);

    // The mock keeps reporting the old rect, so the pointer is back in the right band
    let up = PointerEvent::release(MouseButton::Left, Point::new(495, 200), Point::new(635, 300));
    controller.handle(PointerPhase::Up, &up, &mut surface);
    assert!(controller.is_idle());
}

#[test]
fn test_double_click_in_title_area_maximizes() {
    let mut controller = InteractionController::default();
    let mut surface = window();

    let (local, global) = surface.at(250, 12);
    controller.handle(PointerPhase::Down, &PointerEvent::press(MouseButton::Left, local, global), &mut surface);
    controller.handle(PointerPhase::Up, &PointerEvent::release(MouseButton::Left, local, global), &mut surface);
    controller.handle(PointerPhase::DoubleClick, &PointerEvent::press(MouseButton::Left, local, global), &mut surface);
    controller.handle(PointerPhase::Up, &PointerEvent::release(MouseButton::Left, local, global), &mut surface);

    assert!(surface.maximized);
    assert!(controller.is_idle());
}

#[test]
fn test_double_click_area_matches_visible_title_bar() {
    let controller = InteractionController::default();
    let layout = ContentLayout::compute(
        LayoutSpec::default(),
        Size::new(500, 400),
        DisplayMode::Normal,
        controller.mode_config().metrics(),
        true,
    );
    let title_bar = layout.title_bar().unwrap();
    assert_eq!(controller.title_area_bottom(), title_bar.bottom());

    let mut controller = controller;
    let mut surface = window();
    let (local, global) = surface.at(250, title_bar.bottom() - 1);
    controller.handle(PointerPhase::DoubleClick, &PointerEvent::press(MouseButton::Left, local, global), &mut surface);
    assert!(surface.maximized);
}

#[test]
fn test_undersized_config_is_raised_to_minimum() -> Result<()> {
    let fixture = ConfigFixture::with_contents("[window]\nwidth = 120\nheight = 90\n")?;
    let config = fixture.load()?;
    assert_eq!((config.window.width, config.window.height), (300, 200));
    Ok(())
}

#[test]
fn test_config_file_feeds_chrome_metrics() -> Result<()> {
    let fixture = ConfigFixture::with_contents(
        "[chrome.normal]\nborder_width = 8\nlayout_margin = 10\n\n[chrome.reduced]\nborder_width = 20\nlayout_margin = 12\n",
    )?;
    let config = fixture.load()?;
    let modes = ModeConfig::from_config(&config.chrome);

    let normal = modes.metrics_for(DisplayMode::Normal);
    assert_eq!((normal.border_width(), normal.layout_margin()), (8, 10));

    // Margin narrower than the band is widened to match it
    let reduced = modes.metrics_for(DisplayMode::Reduced);
    assert_eq!(reduced.border_width(), 20);
    assert!(reduced.layout_margin() >= 20);
    Ok(())
}

#[test]
fn test_config_save_round_trip() -> Result<()> {
    let fixture = ConfigFixture::empty()?;
    let mut config = fixture.load()?;
    config.window.x = 321;
    config.window.width = 777;
    config.save(Some(fixture.path()))?;

    let reloaded = fixture.load()?;
    assert_eq!(reloaded.window.x, 321);
    assert_eq!(reloaded.window.width, 777);
    Ok(())
}
