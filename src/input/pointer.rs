//! Pointer gesture state machine.
//!
//! Turns press/move/release/wheel streams into semantic gestures.
//!
//! ## Transitions
//!
//! ```text
//! press            -> Down, arm drag-confirm timer
//! drag-confirm     -> button_down = true (no event)
//! move, !down      -> Move
//! move, down       -> DragStart (once), Drag
//! release, drag    -> DragEnd
//! release, click   -> Up, then DoubleClick (timer pending) or arm single-click timer
//! single-click     -> SingleClick
//! wheel            -> record delta, arm settle timer if idle
//! wheel-settle     -> Wheel(last delta)
//! ```
//!
//! Due timers always fire before the next input event is classified.

use super::callbacks::GestureCallbacks;
use super::gesture::{DefaultAction, Gesture, PointerButton};
use crate::constants::{DOUBLE_CLICK_MS, DRAG_CONFIRM_MS, DRAG_THRESHOLD, WHEEL_SETTLE_MS};
use crate::profile_scope;
use crate::timer::{TimerHandle, TimerQueue, millis};
use kurbo::{Point, Vec2};
use std::time::Duration;
use tracing::trace;

/// Delays and thresholds used by [`PointerGestures`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTiming {
    pub double_click: Duration,
    pub drag_confirm: Duration,
    pub wheel_settle: Duration,
    /// Screen pixels the pointer may travel from the press before a drag starts
    pub drag_threshold: f64,
}

impl Default for PointerTiming {
    fn default() -> Self {
        Self {
            double_click: millis(DOUBLE_CLICK_MS),
            drag_confirm: millis(DRAG_CONFIRM_MS),
            wheel_settle: millis(WHEEL_SETTLE_MS),
            drag_threshold: DRAG_THRESHOLD,
        }
    }
}

/// Mutable record behind the pointer state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerGestureState {
    /// Press confirmed as a potential drag (drag-confirm timer fired)
    pub button_down: bool,
    pub is_dragging: bool,
    /// Press awaiting its release
    pub pressed: Option<(PointerButton, Point)>,
    pub last_position: Option<Point>,
    pub pending_single_click: Option<TimerHandle>,
    pub pending_drag_confirm: Option<TimerHandle>,
    pub last_wheel_delta: f64,
    pub last_wheel_position: Point,
    pub wheel_settle: Option<TimerHandle>,
}

/// Fields external code may overwrite through [`PointerGestures::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerStatePatch {
    /// Setting this to `false` also abandons the press in flight.
    pub button_down: Option<bool>,
    pub is_dragging: Option<bool>,
}

#[derive(Debug, Clone, Copy)]
enum PointerTimer {
    DragConfirm,
    SingleClick { button: PointerButton, position: Point },
    WheelSettle,
}

/// Pointer gesture engine for one interaction surface.
#[derive(Debug)]
pub struct PointerGestures {
    state: PointerGestureState,
    timing: PointerTiming,
    timers: TimerQueue<PointerTimer>,
    callbacks: GestureCallbacks,
}

impl PointerGestures {
    pub fn new(timing: PointerTiming) -> Self {
        Self {
            state: PointerGestureState::default(),
            timing,
            timers: TimerQueue::new(),
            callbacks: GestureCallbacks::new(),
        }
    }

    /// Merge handlers into the configured callbacks.
    pub fn configure(&mut self, callbacks: GestureCallbacks) {
        self.callbacks.merge(callbacks);
    }

    pub fn set_timing(&mut self, timing: PointerTiming) {
        self.timing = timing;
    }

    pub fn timing(&self) -> PointerTiming {
        self.timing
    }

    pub fn state(&self) -> &PointerGestureState {
        &self.state
    }

    /// Overwrite selected state fields.
    pub fn update(&mut self, patch: PointerStatePatch) {
        if let Some(down) = patch.button_down {
            self.state.button_down = down;
            if !down {
                self.state.pressed = None;
                if let Some(handle) = self.state.pending_drag_confirm.take() {
                    self.timers.cancel(handle);
                }
            }
        }
        if let Some(dragging) = patch.is_dragging {
            self.state.is_dragging = dragging;
        }
    }

    /// The secondary button's context menu is always suppressed.
    pub fn context_menu(&self) -> DefaultAction {
        DefaultAction::Prevent
    }

    /// Earliest pending timer deadline, for hosts that schedule their own wakeups.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn press(&mut self, button: PointerButton, position: Point, now: Duration) -> Vec<Gesture> {
        profile_scope!("pointer_press");
        let mut out = self.fire_due(now);

        if let Some(stale) = self.state.pending_drag_confirm.take() {
            self.timers.cancel(stale);
        }
        let handle = self
            .timers
            .schedule(now, self.timing.drag_confirm, PointerTimer::DragConfirm);
        self.state.pending_drag_confirm = Some(handle);
        self.state.pressed = Some((button, position));
        self.state.last_position = Some(position);

        self.emit(&mut out, Gesture::Down { button, position });
        out
    }

    pub fn move_to(&mut self, position: Point, now: Duration) -> Vec<Gesture> {
        let mut out = self.fire_due(now);

        let movement = self
            .state
            .last_position
            .map_or(Vec2::ZERO, |last| position - last);
        self.state.last_position = Some(position);

        if !self.state.button_down {
            self.emit(&mut out, Gesture::Move { position, movement });
            return out;
        }

        if !self.state.is_dragging {
            let Some((button, origin)) = self.state.pressed else {
                return out;
            };
            if origin.distance(position) <= self.timing.drag_threshold {
                return out;
            }
            self.state.is_dragging = true;
            self.emit(&mut out, Gesture::DragStart { button, position: origin });
        }
        self.emit(&mut out, Gesture::Drag { position, movement });
        out
    }

    pub fn release(&mut self, button: PointerButton, position: Point, now: Duration) -> Vec<Gesture> {
        profile_scope!("pointer_release");
        let mut out = self.fire_due(now);

        match self.state.pressed {
            Some((pressed, _)) if pressed == button => {}
            _ => {
                trace!(?button, "release without matching press ignored");
                return out;
            }
        }

        if let Some(handle) = self.state.pending_drag_confirm.take() {
            self.timers.cancel(handle);
        }
        self.state.button_down = false;
        self.state.pressed = None;
        self.state.last_position = Some(position);

        if self.state.is_dragging {
            self.state.is_dragging = false;
            self.emit(&mut out, Gesture::DragEnd { position });
            return out;
        }

        self.emit(&mut out, Gesture::Up { button, position });

        if let Some(pending) = self.state.pending_single_click.take() {
            self.timers.cancel(pending);
            self.emit(&mut out, Gesture::DoubleClick { button, position });
        } else {
            let handle = self.timers.schedule(
                now,
                self.timing.double_click,
                PointerTimer::SingleClick { button, position },
            );
            self.state.pending_single_click = Some(handle);
        }
        out
    }

    pub fn wheel(&mut self, delta_y: f64, position: Point, now: Duration) -> Vec<Gesture> {
        let out = self.fire_due(now);

        self.state.last_wheel_delta = delta_y;
        self.state.last_wheel_position = position;
        if self.state.wheel_settle.is_none() {
            let handle = self
                .timers
                .schedule(now, self.timing.wheel_settle, PointerTimer::WheelSettle);
            self.state.wheel_settle = Some(handle);
        }
        out
    }

    /// Fire every timer due at `now`.
    pub fn tick(&mut self, now: Duration) -> Vec<Gesture> {
        self.fire_due(now)
    }

    fn fire_due(&mut self, now: Duration) -> Vec<Gesture> {
        let mut out = Vec::new();
        for (handle, timer) in self.timers.expire(now) {
            match timer {
                PointerTimer::DragConfirm => {
                    if self.state.pending_drag_confirm == Some(handle) {
                        self.state.pending_drag_confirm = None;
                        self.state.button_down = self.state.pressed.is_some();
                    }
                }
                PointerTimer::SingleClick { button, position } => {
                    if self.state.pending_single_click == Some(handle) {
                        self.state.pending_single_click = None;
                        self.emit(&mut out, Gesture::SingleClick { button, position });
                    }
                }
                PointerTimer::WheelSettle => {
                    if self.state.wheel_settle == Some(handle) {
                        self.state.wheel_settle = None;
                        let gesture = Gesture::Wheel {
                            delta_y: self.state.last_wheel_delta,
                            position: self.state.last_wheel_position,
                        };
                        self.emit(&mut out, gesture);
                    }
                }
            }
        }
        out
    }

    fn emit(&mut self, out: &mut Vec<Gesture>, gesture: Gesture) {
        trace!(gesture = gesture.name(), "pointer gesture");
        self.callbacks.dispatch(&gesture);
        out.push(gesture);
    }
}

impl Default for PointerGestures {
    fn default() -> Self {
        Self::new(PointerTiming::default())
    }
}
