//! Snapshot tests using the insta crate.
//!
//! Snapshots pin the text the host renders from: `viewBox` strings, cable
//! path data and gesture traces. They are kept inline; update them with
//! `cargo insta test --accept`.

use crate::helpers::{TestPatchbayBuilder, click, jack_screen, ms, run_animations};
use insta::assert_snapshot;
use kurbo::Point;
use patchbay::cable::{Cable, CableId};
use patchbay::input::{Gesture, PointerButton, PointerGestures};
use patchbay::patchbay::JackId;
use patchbay::viewport::{PanDirection, Viewport};

#[test]
fn snapshot_fresh_cable_path() {
    let cable = Cable::begin(CableId(0), "red", JackId(0), Point::new(100.0, 200.0), 300.0);
    assert_snapshot!(cable.path_data(), @"M100,200 Q100,350 100,200");
}

#[test]
fn snapshot_hanging_cable_path() {
    let mut pb = TestPatchbayBuilder::new().build();
    let at = jack_screen(&pb, "1-1-0");
    click(&mut pb, at, ms(0));
    run_animations(&mut pb, 1000);
    assert_snapshot!(pb.cables()[0].path_data(), @"M25,75 Q25,225 25,375");
}

#[test]
fn snapshot_view_box_after_navigation() {
    let mut pb = TestPatchbayBuilder::new().build();
    assert_snapshot!(pb.surface().view_box(), @"0 0 1000 500");

    pb.zoom_in(Some(Point::new(500.0, 250.0)), None).unwrap();
    assert_snapshot!(pb.surface().view_box(), @"250 125 500 250");

    pb.pan_button(PanDirection::Down).unwrap();
    assert_snapshot!(pb.surface().view_box(), @"250 175 500 250");
}

#[test]
fn snapshot_initial_framing() {
    let pb = TestPatchbayBuilder::new().framing_diagram().build();
    assert_snapshot!(pb.surface().view_box(), @"0 0 200 100");
    assert_snapshot!(pb.overview().view_box().to_string(), @"0 0 200 100");
}

#[test]
fn snapshot_viewport_json() {
    let json = serde_json::to_string(&Viewport::new(-12.5, 0.0, 640.0, 360.0)).unwrap();
    assert_snapshot!(json, @r#"{"x":-12.5,"y":0.0,"width":640.0,"height":360.0}"#);
}

#[test]
fn snapshot_click_drag_click_trace() {
    let mut pointer = PointerGestures::default();
    let mut trace = Vec::new();
    let primary = PointerButton::Primary;

    trace.extend(pointer.press(primary, Point::new(0.0, 0.0), ms(0)));
    trace.extend(pointer.release(primary, Point::new(0.0, 0.0), ms(10)));
    trace.extend(pointer.press(primary, Point::new(0.0, 0.0), ms(400)));
    trace.extend(pointer.move_to(Point::new(20.0, 0.0), ms(450)));
    trace.extend(pointer.release(primary, Point::new(20.0, 0.0), ms(460)));
    trace.extend(pointer.tick(ms(2000)));

    let names: Vec<_> = trace.iter().map(Gesture::name).collect();
    assert_snapshot!(names.join("\n"), @r"
    down
    up
    single_click
    down
    drag_start
    drag
    drag_end
    ");
}
