//! Touch gesture state machine.
//!
//! Keeps the list of active touches in arrival order and derives taps,
//! one/two-finger movement and pinch/spread from it. The first touch in the
//! list (not the platform's index) is the primary touch for two-finger math.

use super::callbacks::GestureCallbacks;
use super::gesture::{Gesture, TouchPoint};
use crate::constants::{TAP_MS, TAP_SLOP};
use crate::error::{PatchbayError, PatchbayResult};
use crate::timer::{TimerHandle, TimerQueue, millis};
use kurbo::{Point, Vec2};
use std::time::Duration;
use tracing::{debug, trace};

/// Delays and thresholds used by [`TouchGestures`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchTiming {
    /// Touches lifted within this window are taps
    pub tap: Duration,
    /// Cumulative travel (screen pixels) that rules out a tap
    pub tap_slop: f64,
}

impl Default for TouchTiming {
    fn default() -> Self {
        Self {
            tap: millis(TAP_MS),
            tap_slop: TAP_SLOP,
        }
    }
}

/// Mutable record behind the touch state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchGestureState {
    /// Tracked touches, first arrival first
    pub active_touches: Vec<TouchPoint>,
    pub last_pinch_distance: f64,
    pub pinch_center: Point,
    pub last_position: Point,
    pub movement: Vec2,
    /// Distance travelled since the gesture's first touch
    pub travel: f64,
    pub tap_timer: Option<TimerHandle>,
}

/// Fields external code may overwrite through [`TouchGestures::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchStatePatch {
    pub last_position: Option<Point>,
    pub last_pinch_distance: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
enum TouchTimer {
    Tap,
}

/// Touch gesture engine for one interaction surface.
#[derive(Debug)]
pub struct TouchGestures {
    state: TouchGestureState,
    timing: TouchTiming,
    timers: TimerQueue<TouchTimer>,
    callbacks: GestureCallbacks,
}

impl TouchGestures {
    pub fn new(timing: TouchTiming) -> Self {
        Self {
            state: TouchGestureState::default(),
            timing,
            timers: TimerQueue::new(),
            callbacks: GestureCallbacks::new(),
        }
    }

    /// Merge handlers into the configured callbacks.
    pub fn configure(&mut self, callbacks: GestureCallbacks) {
        self.callbacks.merge(callbacks);
    }

    pub fn set_timing(&mut self, timing: TouchTiming) {
        self.timing = timing;
    }

    pub fn state(&self) -> &TouchGestureState {
        &self.state
    }

    pub fn update(&mut self, patch: TouchStatePatch) {
        if let Some(position) = patch.last_position {
            self.state.last_position = position;
        }
        if let Some(distance) = patch.last_pinch_distance {
            self.state.last_pinch_distance = distance;
        }
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn touch_start(&mut self, touches: &[TouchPoint], now: Duration) -> Vec<Gesture> {
        let mut out = self.fire_due(now);
        let Some(first) = touches.first() else {
            return out;
        };

        if self.state.active_touches.is_empty() {
            if let Some(stale) = self.state.tap_timer.take() {
                self.timers.cancel(stale);
            }
            self.state.travel = 0.0;
            let handle = self.timers.schedule(now, self.timing.tap, TouchTimer::Tap);
            self.state.tap_timer = Some(handle);
        }

        for touch in touches {
            match self.find_mut(touch.id) {
                Some(tracked) => tracked.position = touch.position,
                None => self.state.active_touches.push(*touch),
            }
        }
        if let Some(primary) = self.state.active_touches.first() {
            self.state.last_position = primary.position;
        }
        self.rebaseline_pinch();

        self.emit(&mut out, Gesture::TouchStart { position: first.position });
        out
    }

    pub fn touch_move(&mut self, touches: &[TouchPoint], now: Duration) -> Vec<Gesture> {
        let mut out = self.fire_due(now);

        // Event lists are unordered, so the primary touch is looked up by id
        let Some(primary) = self
            .state
            .active_touches
            .iter()
            .position(|tracked| touches.iter().any(|t| t.id == tracked.id))
        else {
            if !touches.is_empty() {
                debug!(count = touches.len(), "move for untracked touches ignored");
            }
            return out;
        };
        let previous = self.state.active_touches[primary].position;

        for touch in touches {
            match self.find_mut(touch.id) {
                Some(tracked) => tracked.position = touch.position,
                None => debug!(id = touch.id, "move for untracked touch ignored"),
            }
        }

        let position = self.state.active_touches[primary].position;
        let movement = position - previous;
        self.state.movement = movement;
        self.state.travel += movement.hypot();
        if self.state.travel > self.timing.tap_slop {
            if let Some(handle) = self.state.tap_timer.take() {
                self.timers.cancel(handle);
                trace!(travel = self.state.travel, "tap abandoned, touch moved");
            }
        }

        match self.state.active_touches.len() {
            1 => self.emit(&mut out, Gesture::MoveSingle { position, movement }),
            2 => {
                let (a, b) = (self.state.active_touches[0], self.state.active_touches[1]);
                let distance = a.position.distance(b.position);
                let center = a.position.midpoint(b.position);
                self.state.pinch_center = center;
                self.emit(&mut out, Gesture::MoveDouble { center, movement });
                if distance > self.state.last_pinch_distance {
                    self.emit(&mut out, Gesture::Spread { center, distance });
                } else if distance < self.state.last_pinch_distance {
                    self.emit(&mut out, Gesture::Pinch { center, distance });
                }
                self.state.last_pinch_distance = distance;
            }
            _ => {}
        }

        self.state.last_position = position;
        out
    }

    pub fn touch_end(&mut self, touches: &[TouchPoint], now: Duration) -> Vec<Gesture> {
        let mut out = self.fire_due(now);

        if let Some(handle) = self.state.tap_timer.take() {
            self.timers.cancel(handle);
            let position = self.state.last_position;
            self.emit(&mut out, Gesture::Tap { position });
        }

        let position = touches.first().map_or(self.state.last_position, |t| t.position);
        self.remove_all(touches);

        self.emit(&mut out, Gesture::TouchEnd { position });
        out
    }

    pub fn touch_cancel(&mut self, touches: &[TouchPoint], now: Duration) -> Vec<Gesture> {
        let mut out = self.fire_due(now);

        if let Some(handle) = self.state.tap_timer.take() {
            self.timers.cancel(handle);
        }
        self.remove_all(touches);

        self.emit(&mut out, Gesture::Cancel);
        out
    }

    /// Fire every timer due at `now`.
    pub fn tick(&mut self, now: Duration) -> Vec<Gesture> {
        self.fire_due(now)
    }

    /// Stop tracking a touch by identifier.
    pub fn remove_touch(&mut self, id: i64) -> PatchbayResult<TouchPoint> {
        let idx = self
            .state
            .active_touches
            .iter()
            .position(|t| t.id == id)
            .ok_or(PatchbayError::UnknownTouch(id))?;
        Ok(self.state.active_touches.remove(idx))
    }

    fn remove_all(&mut self, touches: &[TouchPoint]) {
        for touch in touches {
            if let Err(e) = self.remove_touch(touch.id) {
                debug!("{}", e);
            }
        }
        // Continue single-finger movement from the finger still down
        if let [remaining] = self.state.active_touches.as_slice() {
            self.state.last_position = remaining.position;
        }
        self.rebaseline_pinch();
    }

    fn rebaseline_pinch(&mut self) {
        if let [a, b] = self.state.active_touches.as_slice() {
            self.state.last_pinch_distance = a.position.distance(b.position);
            self.state.pinch_center = a.position.midpoint(b.position);
        }
    }

    fn find_mut(&mut self, id: i64) -> Option<&mut TouchPoint> {
        self.state.active_touches.iter_mut().find(|t| t.id == id)
    }

    fn fire_due(&mut self, now: Duration) -> Vec<Gesture> {
        for (handle, timer) in self.timers.expire(now) {
            match timer {
                TouchTimer::Tap => {
                    if self.state.tap_timer == Some(handle) {
                        self.state.tap_timer = None;
                        debug!("tap window elapsed, treating touch as long press");
                    }
                }
            }
        }
        // Expiring timers never produce gestures on touch surfaces
        Vec::new()
    }

    fn emit(&mut self, out: &mut Vec<Gesture>, gesture: Gesture) {
        trace!(gesture = gesture.name(), touches = self.state.active_touches.len(), "touch gesture");
        self.callbacks.dispatch(&gesture);
        out.push(gesture);
    }
}

impl Default for TouchGestures {
    fn default() -> Self {
        Self::new(TouchTiming::default())
    }
}
