//! Navigation Integration Tests

use crate::helpers::{TestPatchbayBuilder, assert_viewport, click, jack_screen, ms};
use kurbo::{Point, Rect, Vec2};
use patchbay::PatchbayError;
use patchbay::input::PointerButton;
use patchbay::layout::PatchGroupSpec;
use patchbay::settings::Settings;
use patchbay::surface::DrawingSurface;
use patchbay::viewport::{PanDirection, Viewport, ZoomDirection};
use std::cell::RefCell;
use std::rc::Rc;

const PRIMARY: PointerButton = PointerButton::Primary;

#[test]
fn test_background_drag_pans_with_pointer() {
    let mut pb = TestPatchbayBuilder::new().build();
    pb.pointer_press(PRIMARY, Point::new(500.0, 250.0), ms(0));
    assert!(pb.interaction().is_panning());

    pb.pointer_move(Point::new(480.0, 240.0), ms(50));
    assert_viewport(pb.viewport(), Viewport::new(20.0, 10.0, 1000.0, 500.0));

    pb.pointer_release(PRIMARY, Point::new(480.0, 240.0), ms(60));
    assert!(pb.interaction().is_idle());
    assert!(pb.tick(ms(1000)).is_empty());
}

#[test]
fn test_move_before_drag_confirm_does_not_pan() {
    let mut pb = TestPatchbayBuilder::new().build();
    pb.pointer_press(PRIMARY, Point::new(500.0, 250.0), ms(0));
    pb.pointer_move(Point::new(400.0, 250.0), ms(20));
    assert_viewport(pb.viewport(), Viewport::new(0.0, 0.0, 1000.0, 500.0));
}

#[test]
fn test_double_click_zooms_in_around_pointer() {
    let mut pb = TestPatchbayBuilder::new().build();
    let at = Point::new(500.0, 250.0);
    pb.pointer_press(PRIMARY, at, ms(0));
    pb.pointer_release(PRIMARY, at, ms(10));
    pb.pointer_press(PRIMARY, at, ms(120));
    pb.pointer_release(PRIMARY, at, ms(130));

    assert_viewport(pb.viewport(), Viewport::new(250.0, 125.0, 500.0, 250.0));
    assert_eq!(pb.surface().screen_to_logical(at).unwrap(), Point::new(500.0, 250.0));
}

#[test]
fn test_secondary_double_click_zooms_out() {
    let mut pb = TestPatchbayBuilder::new().build();
    let at = Point::new(500.0, 250.0);
    let secondary = PointerButton::Secondary;
    pb.pointer_press(secondary, at, ms(0));
    pb.pointer_release(secondary, at, ms(10));
    pb.pointer_press(secondary, at, ms(120));
    pb.pointer_release(secondary, at, ms(130));

    assert_viewport(pb.viewport(), Viewport::new(-500.0, -250.0, 2000.0, 1000.0));
}

#[test]
fn test_double_click_on_jack_zooms_without_patching() {
    let mut pb = TestPatchbayBuilder::new().build();
    let at = jack_screen(&pb, "1-1-0");
    pb.pointer_press(PRIMARY, at, ms(0));
    pb.pointer_release(PRIMARY, at, ms(10));
    pb.pointer_press(PRIMARY, at, ms(100));
    pb.pointer_release(PRIMARY, at, ms(110));
    pb.tick(ms(1000));

    assert!(pb.cables().is_empty());
    assert_viewport(pb.viewport(), Viewport::new(12.5, 37.5, 500.0, 250.0));
}

#[test]
fn test_wheel_burst_zooms_once() {
    let mut pb = TestPatchbayBuilder::new().build();
    let at = Point::new(500.0, 250.0);
    pb.wheel(-1.0, at, ms(0));
    pb.wheel(-3.0, at, ms(30));
    pb.wheel(-2.0, at, ms(60));
    assert_viewport(pb.viewport(), Viewport::new(0.0, 0.0, 1000.0, 500.0));
    assert_eq!(pb.next_deadline(), Some(ms(125)));

    pb.tick(ms(125));
    assert_viewport(pb.viewport(), Viewport::new(250.0, 125.0, 500.0, 250.0));

    pb.wheel(4.0, at, ms(300));
    pb.tick(ms(425));
    assert_viewport(pb.viewport(), Viewport::new(0.0, 0.0, 1000.0, 500.0));
}

#[test]
fn test_pan_buttons_move_a_fifth_of_the_view() {
    let mut pb = TestPatchbayBuilder::new().build();
    pb.pan_button(PanDirection::Left).unwrap();
    assert_viewport(pb.viewport(), Viewport::new(-200.0, 0.0, 1000.0, 500.0));
    pb.pan_button(PanDirection::Up).unwrap();
    assert_viewport(pb.viewport(), Viewport::new(-200.0, -100.0, 1000.0, 500.0));
    pb.pan_button(PanDirection::Right).unwrap();
    pb.pan_button(PanDirection::Down).unwrap();
    assert_viewport(pb.viewport(), Viewport::new(0.0, 0.0, 1000.0, 500.0));
}

#[test]
fn test_pan_step_from_settings() {
    let mut settings = Settings::default();
    settings.view.pan_step = "100".to_string();
    let mut pb = TestPatchbayBuilder::new().with_settings(settings).build();
    pb.pan_button(PanDirection::Right).unwrap();
    assert_viewport(pb.viewport(), Viewport::new(100.0, 0.0, 1000.0, 500.0));

    // A malformed step keeps the one in use
    let mut broken = pb.settings().clone();
    broken.view.pan_step = "far".to_string();
    pb.apply_settings(broken);
    pb.pan_button(PanDirection::Right).unwrap();
    assert_viewport(pb.viewport(), Viewport::new(200.0, 0.0, 1000.0, 500.0));
}

#[test]
fn test_zoom_buttons_use_surface_center() {
    let mut pb = TestPatchbayBuilder::new().build();
    pb.zoom_button(ZoomDirection::In).unwrap();
    assert_viewport(pb.viewport(), Viewport::new(250.0, 125.0, 500.0, 250.0));
    pb.zoom_button(ZoomDirection::Out).unwrap();
    assert_viewport(pb.viewport(), Viewport::new(0.0, 0.0, 1000.0, 500.0));
}

#[test]
fn test_overview_tracks_every_viewport_change() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    let mut pb = TestPatchbayBuilder::new().build();
    pb.on_viewport_changed(move |view| log.borrow_mut().push(*view));

    pb.zoom_button(ZoomDirection::In).unwrap();
    assert_eq!(pb.overview().indicator(), pb.viewport());

    pb.pointer_press(PRIMARY, Point::new(500.0, 250.0), ms(0));
    pb.pointer_move(Point::new(520.0, 250.0), ms(50));
    assert_eq!(pb.overview().indicator(), pb.viewport());
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn test_overview_click_centers_main_view() {
    let mut pb = TestPatchbayBuilder::new().build();
    pb.overview_click(Vec2::new(5.0, 2.0)).unwrap();
    let view = pb.viewport();
    assert_eq!(view.center(), Point::new(100.0, 40.0));
    assert_viewport(view, Viewport::new(-400.0, -210.0, 1000.0, 500.0));
    assert_eq!(pb.overview().indicator(), view);
}

#[test]
fn test_fit_group_frames_it() {
    let mut pb = TestPatchbayBuilder::new()
        .with_row(vec![
            PatchGroupSpec::new("VCO", 2),
            PatchGroupSpec::new("VCF", 2),
        ])
        .build();
    let jack = pb.jacks().by_key("1-2-0").unwrap().position();
    let rect = Rect::new(100.0, 0.0, 200.0, 100.0);
    let view = pb.fit_rectangle(rect).unwrap();
    assert_eq!(view.center(), Point::new(150.0, 50.0));
    assert_viewport(view, Viewport::new(-500.0, -275.0, 1300.0, 650.0));
    assert!(view.to_rect().contains(jack));
}

#[test]
fn test_pointer_reentry_without_buttons_ends_pan() {
    let mut pb = TestPatchbayBuilder::new().build();
    pb.pointer_press(PRIMARY, Point::new(500.0, 250.0), ms(0));
    pb.pointer_move(Point::new(490.0, 250.0), ms(50));
    let panned = pb.viewport();

    pb.pointer_entered(true);
    assert!(pb.interaction().is_panning());

    pb.pointer_entered(false);
    assert!(pb.interaction().is_idle());
    pb.pointer_move(Point::new(300.0, 250.0), ms(80));
    assert_eq!(pb.viewport(), panned);
}

#[test]
fn test_detached_surface_ignores_input_and_rejects_buttons() {
    let mut pb = TestPatchbayBuilder::new().build();
    let before = pb.viewport();
    pb.surface_mut().detach();

    click(&mut pb, Point::new(25.0, 75.0), ms(0));
    assert!(pb.cables().is_empty());
    assert!(matches!(
        pb.zoom_button(ZoomDirection::In),
        Err(PatchbayError::Detached)
    ));
    // Percentage pans need no screen
    pb.pan_button(PanDirection::Left).unwrap();
    assert_eq!(pb.viewport().width, before.width);
}

#[test]
fn test_rejected_viewport_keeps_current_one() {
    let mut pb = TestPatchbayBuilder::new().build();
    let before = pb.viewport();
    assert!(pb.set_viewport(Viewport::new(0.0, 0.0, -1.0, 5.0)).is_err());
    assert!(pb.zoom_in(None, Some(-2.0)).is_err());
    assert_eq!(pb.viewport(), before);
    assert_eq!(pb.overview().indicator(), before);
}

#[test]
fn test_embedder_callbacks_run_alongside_controller() {
    let wheels = Rc::new(RefCell::new(0));
    let counter = wheels.clone();
    let mut pb = TestPatchbayBuilder::new().build();
    pb.configure_pointer(
        patchbay::input::GestureCallbacks::new().on_wheel(move |_| *counter.borrow_mut() += 1),
    );

    pb.wheel(-1.0, Point::new(500.0, 250.0), ms(0));
    pb.tick(ms(200));
    assert_eq!(*wheels.borrow(), 1);
    assert_viewport(pb.viewport(), Viewport::new(250.0, 125.0, 500.0, 250.0));
}
