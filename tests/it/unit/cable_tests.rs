//! Unit tests for cable geometry and the swing/drop animation.

use kurbo::{Point, Vec2};
use patchbay::cable::{AnimationScheduler, Cable, CableId, CablePhysics, CableProperty, Dangling};
use patchbay::patchbay::JackId;

fn settle(scheduler: &mut AnimationScheduler, cables: &mut [Cable], max: usize) -> usize {
    let mut frames = 0;
    while !scheduler.is_idle() && frames < max {
        scheduler.tick(cables);
        frames += 1;
    }
    frames
}

fn hanging_cable(scheduler: &mut AnimationScheduler) -> Cable {
    let physics = CablePhysics::default();
    let mut cable = Cable::begin(CableId(0), "red", JackId(0), Point::new(100.0, 100.0), physics.length);
    scheduler.animate_begin(&mut cable, &physics);
    cable
}

#[test]
fn test_new_cable_starts_half_connected() {
    let mut scheduler = AnimationScheduler::new();
    let cable = hanging_cable(&mut scheduler);
    assert!(cable.is_half_connected());
    assert!(cable.is_dangling(Dangling::Start));
    assert!(!cable.is_dangling(Dangling::End));
    assert_eq!(scheduler.active(), 2);
    // The swing jolts the loose end sideways before the first frame
    assert!(cable.end().x < 100.0);
}

#[test]
fn test_loose_end_falls_and_comes_to_rest_under_jack() {
    let mut scheduler = AnimationScheduler::new();
    let mut cables = vec![hanging_cable(&mut scheduler)];

    let frames = settle(&mut scheduler, &mut cables, 1000);
    assert_eq!(frames, 200);
    assert_eq!(cables[0].end(), Point::new(100.0, 400.0));
}

#[test]
fn test_drop_never_overshoots() {
    let mut scheduler = AnimationScheduler::new();
    let mut cables = vec![hanging_cable(&mut scheduler)];
    let mut last = cables[0].end().y;
    for _ in 0..50 {
        scheduler.tick(&mut cables);
        let y = cables[0].end().y;
        assert!(y >= last);
        assert!(y <= 400.0);
        last = y;
    }
    assert_eq!(last, 400.0);
}

#[test]
fn test_completion_pins_end_to_jack_mid_flight() {
    let physics = CablePhysics::default();
    let mut scheduler = AnimationScheduler::new();
    let mut cables = vec![hanging_cable(&mut scheduler)];
    for _ in 0..5 {
        scheduler.tick(&mut cables);
    }

    cables[0].complete(JackId(1), Point::new(300.0, 100.0));
    scheduler.animate_complete(&mut cables[0], &physics);
    assert!(!cables[0].is_half_connected());
    assert!(!cables[0].is_dangling(Dangling::Start));

    settle(&mut scheduler, &mut cables, 1000);
    let cable = &cables[0];
    assert_eq!(cable.end(), Point::new(300.0, 100.0));
    assert_eq!(cable.control().y, 400.0);
    assert!((cable.control().x - 200.0).abs() < 0.5);
}

#[test]
fn test_dragging_stops_animation_in_place() {
    let mut scheduler = AnimationScheduler::new();
    let mut cables = vec![hanging_cable(&mut scheduler)];
    scheduler.tick(&mut cables);

    cables[0].translate(Vec2::new(10.0, 10.0));
    let moved = cables[0].end();
    assert!(!cables[0].is_dangling(Dangling::Start));

    let touched = scheduler.tick(&mut cables);
    assert!(touched.is_empty());
    assert!(scheduler.is_idle());
    assert_eq!(cables[0].end(), moved);
}

#[test]
fn test_cancel_cable_drops_its_tasks() {
    let mut scheduler = AnimationScheduler::new();
    let cable = hanging_cable(&mut scheduler);
    scheduler.cancel_cable(CableId(7));
    assert_eq!(scheduler.active(), 2);
    scheduler.cancel_cable(cable.id());
    assert!(scheduler.is_idle());
}

#[test]
fn test_property_accessors() {
    let mut cable = Cable::begin(CableId(3), "blue", JackId(2), Point::new(0.0, 0.0), 100.0);
    cable.set(CableProperty::ControlX, 12.0);
    cable.set(CableProperty::EndY, 34.0);
    assert_eq!(cable.get(CableProperty::ControlX), 12.0);
    assert_eq!(cable.end(), Point::new(0.0, 34.0));
    assert!(cable.touches_jack(JackId(2)));
    assert!(!cable.touches_jack(JackId(3)));
    assert_eq!(cable.color(), "blue");
}
