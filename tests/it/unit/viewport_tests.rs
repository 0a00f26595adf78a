//! Unit tests for the viewport engine.

use crate::helpers::assert_viewport;
use kurbo::{Point, Rect};
use patchbay::PatchbayError;
use patchbay::surface::{DrawingSurface, SvgSurface};
use patchbay::viewport::{PanMovement, Viewport, ViewportEngine, ZoomDirection};
use std::cell::RefCell;
use std::rc::Rc;

fn surface(view: Viewport, width: f64, height: f64) -> SvgSurface {
    SvgSurface::attached(view, Rect::new(0.0, 0.0, width, height))
}

#[test]
fn test_zoom_keeps_anchor_fixed() {
    let mut engine = ViewportEngine::default();
    let mut svg = surface(Viewport::new(100.0, 50.0, 2000.0, 1000.0), 1000.0, 500.0);
    let anchor = Point::new(300.0, 200.0);
    let before = svg.screen_to_logical(anchor).unwrap();
    assert_eq!(before, Point::new(700.0, 450.0));

    let next = engine.zoom_in(&mut svg, Some(anchor), None).unwrap();
    assert_viewport(next, Viewport::new(400.0, 250.0, 1000.0, 500.0));
    assert_eq!(svg.screen_to_logical(anchor).unwrap(), before);
}

#[test]
fn test_zoom_in_then_out_restores_view() {
    let mut engine = ViewportEngine::default();
    let start = Viewport::new(-40.0, 10.0, 800.0, 400.0);
    let mut svg = surface(start, 1000.0, 500.0);
    let anchor = Some(Point::new(123.0, 321.0));
    engine.zoom(&mut svg, ZoomDirection::In, anchor, Some(1.5)).unwrap();
    engine.zoom(&mut svg, ZoomDirection::Out, anchor, Some(1.5)).unwrap();
    assert!(svg.viewport().approx_eq(&start, 1e-9));
}

#[test]
fn test_zoom_defaults_to_surface_center() {
    let mut engine = ViewportEngine::default();
    let mut svg = surface(Viewport::new(0.0, 0.0, 1000.0, 500.0), 1000.0, 500.0);
    let next = engine.zoom_out(&mut svg, None, None).unwrap();
    assert_viewport(next, Viewport::new(-500.0, -250.0, 2000.0, 1000.0));
}

#[test]
fn test_percentage_pan_ignores_screen_size() {
    let view = Viewport::new(10.0, 20.0, 400.0, 300.0);
    let movement = PanMovement::parse("50%", "-50%").unwrap();
    for (width, height) in [(1000.0, 500.0), (320.0, 640.0)] {
        let mut engine = ViewportEngine::default();
        let mut svg = surface(view, width, height);
        let next = engine.pan(&mut svg, movement).unwrap();
        assert_viewport(next, Viewport::new(-190.0, 170.0, 400.0, 300.0));
    }
}

#[test]
fn test_pixel_pan_scales_to_logical_units() {
    let mut engine = ViewportEngine::default();
    let mut svg = surface(Viewport::new(0.0, 0.0, 2000.0, 1000.0), 1000.0, 500.0);
    let next = engine.pan(&mut svg, PanMovement::new(10.0, -5.0)).unwrap();
    assert_viewport(next, Viewport::new(-20.0, 10.0, 2000.0, 1000.0));
}

#[test]
fn test_pixel_pan_needs_attached_surface() {
    let mut engine = ViewportEngine::default();
    let mut svg = SvgSurface::new(Viewport::new(0.0, 0.0, 100.0, 100.0));
    let result = engine.pan(&mut svg, PanMovement::new(10.0, 0.0));
    assert!(matches!(result, Err(PatchbayError::Detached)));

    // Percentages resolve without a screen
    let next = engine
        .pan(&mut svg, PanMovement::parse("10%", "0%").unwrap())
        .unwrap();
    assert_viewport(next, Viewport::new(-10.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_pan_to_centers_point() {
    let mut engine = ViewportEngine::default();
    let mut svg = surface(Viewport::new(0.0, 0.0, 1000.0, 500.0), 1000.0, 500.0);
    let next = engine.pan_to(&mut svg, Point::new(100.0, 100.0)).unwrap();
    assert_viewport(next, Viewport::new(-400.0, -150.0, 1000.0, 500.0));
    assert_eq!(next.center(), Point::new(100.0, 100.0));
}

#[test]
fn test_fit_wide_rectangle() {
    let mut engine = ViewportEngine::default();
    let mut svg = surface(Viewport::new(0.0, 0.0, 1000.0, 500.0), 1000.0, 500.0);
    let next = engine
        .fit_rectangle(&mut svg, Rect::new(0.0, 0.0, 1000.0, 200.0))
        .unwrap();
    assert_viewport(next, Viewport::new(-150.0, -225.0, 1300.0, 650.0));
}

#[test]
fn test_fit_tiny_rectangle_grows_to_minimum() {
    let mut engine = ViewportEngine::default();
    let mut svg = surface(Viewport::new(0.0, 0.0, 1000.0, 500.0), 1000.0, 500.0);
    let next = engine
        .fit_rectangle(&mut svg, Rect::new(5.0, 55.0, 45.0, 95.0))
        .unwrap();
    assert_viewport(next, Viewport::new(-625.0, -250.0, 1300.0, 650.0));
}

#[test]
fn test_rejected_viewport_leaves_surface_alone() {
    let calls = Rc::new(RefCell::new(0));
    let counter = calls.clone();
    let mut engine = ViewportEngine::default();
    engine.on_viewport_changed(move |_| *counter.borrow_mut() += 1);

    let start = Viewport::new(0.0, 0.0, 1000.0, 500.0);
    let mut svg = surface(start, 1000.0, 500.0);

    let result = engine.set_viewport(&mut svg, Viewport::new(0.0, 0.0, 0.0, 500.0));
    assert!(matches!(result, Err(PatchbayError::InvariantViolation(_))));
    let result = engine.zoom_in(&mut svg, None, Some(0.0));
    assert!(matches!(result, Err(PatchbayError::Configuration(_))));
    let result = engine.zoom_in(&mut svg, None, Some(f64::NAN));
    assert!(matches!(result, Err(PatchbayError::Configuration(_))));

    assert_eq!(svg.viewport(), start);
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn test_observer_sees_every_committed_viewport() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    let mut engine = ViewportEngine::default();
    engine.on_viewport_changed(move |view| log.borrow_mut().push(*view));

    let mut svg = surface(Viewport::new(0.0, 0.0, 1000.0, 500.0), 1000.0, 500.0);
    engine.pan_to(&mut svg, Point::new(500.0, 500.0)).unwrap();
    engine.zoom_in(&mut svg, None, None).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1], svg.viewport());
}

#[test]
fn test_viewport_parse_and_display() {
    let view: Viewport = "0, -10 200.5 100".parse().unwrap();
    assert_eq!(view, Viewport::new(0.0, -10.0, 200.5, 100.0));
    assert_eq!(view.to_string(), "0 -10 200.5 100");
    assert!("1 2 3".parse::<Viewport>().is_err());
}
