//! Raw input entry points and the gesture -> action wiring.
//!
//! Every entry point forwards to the matching gesture engine, then applies
//! the returned gestures in order. Failures from gesture-driven viewport
//! changes are logged and abandon only that gesture.

use super::{HitTarget, Patchbay};
use crate::error::PatchbayResult;
use crate::input::{
    DefaultAction, Gesture, GestureCallbacks, PointerButton, PointerStatePatch, TouchPoint,
};
use crate::surface::DrawingSurface;
use crate::viewport::{PanMovement, ZoomDirection};
use kurbo::{Point, Vec2};
use std::time::Duration;
use tracing::{trace, warn};

impl<S: DrawingSurface> Patchbay<S> {
    /// Merge extra handlers into the pointer engine's callbacks.
    pub fn configure_pointer(&mut self, callbacks: GestureCallbacks) {
        self.pointer.configure(callbacks);
    }

    /// Merge extra handlers into the touch engine's callbacks.
    pub fn configure_touch(&mut self, callbacks: GestureCallbacks) {
        self.touch.configure(callbacks);
    }

    pub fn pointer_press(&mut self, button: PointerButton, position: Point, now: Duration) -> Vec<Gesture> {
        let gestures = self.pointer.press(button, position, now);
        self.apply(&gestures);
        gestures
    }

    pub fn pointer_move(&mut self, position: Point, now: Duration) -> Vec<Gesture> {
        let gestures = self.pointer.move_to(position, now);
        self.apply(&gestures);
        gestures
    }

    pub fn pointer_release(&mut self, button: PointerButton, position: Point, now: Duration) -> Vec<Gesture> {
        let gestures = self.pointer.release(button, position, now);
        self.apply(&gestures);
        gestures
    }

    pub fn wheel(&mut self, delta_y: f64, position: Point, now: Duration) -> Vec<Gesture> {
        let gestures = self.pointer.wheel(delta_y, position, now);
        self.apply(&gestures);
        gestures
    }

    pub fn context_menu(&self) -> DefaultAction {
        self.pointer.context_menu()
    }

    /// The pointer came back into the window. With no button held, whatever
    /// press was in flight ended outside and is dropped.
    pub fn pointer_entered(&mut self, buttons_held: bool) {
        if buttons_held {
            return;
        }
        self.pointer.update(PointerStatePatch {
            button_down: Some(false),
            is_dragging: Some(false),
        });
        self.interaction.reset();
    }

    pub fn touch_start(&mut self, touches: &[TouchPoint], now: Duration) -> Vec<Gesture> {
        let gestures = self.touch.touch_start(touches, now);
        self.apply(&gestures);
        gestures
    }

    pub fn touch_move(&mut self, touches: &[TouchPoint], now: Duration) -> Vec<Gesture> {
        let gestures = self.touch.touch_move(touches, now);
        self.apply(&gestures);
        gestures
    }

    pub fn touch_end(&mut self, touches: &[TouchPoint], now: Duration) -> Vec<Gesture> {
        let gestures = self.touch.touch_end(touches, now);
        self.apply(&gestures);
        gestures
    }

    pub fn touch_cancel(&mut self, touches: &[TouchPoint], now: Duration) -> Vec<Gesture> {
        let gestures = self.touch.touch_cancel(touches, now);
        self.apply(&gestures);
        gestures
    }

    /// Fire every gesture timer due at `now`.
    pub fn tick(&mut self, now: Duration) -> Vec<Gesture> {
        let mut gestures = self.pointer.tick(now);
        gestures.extend(self.touch.tick(now));
        self.apply(&gestures);
        gestures
    }

    /// Earliest pending gesture timer across both engines.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.pointer.next_deadline(), self.touch.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn apply(&mut self, gestures: &[Gesture]) {
        for gesture in gestures {
            self.handle(gesture);
        }
    }

    fn handle(&mut self, gesture: &Gesture) {
        trace!(gesture = gesture.name(), "handle");
        match *gesture {
            Gesture::Down {
                button: PointerButton::Primary,
                position,
            }
            | Gesture::TouchStart { position } => self.press_at(position),

            Gesture::Drag { movement, .. } | Gesture::MoveSingle { movement, .. } => {
                self.drag_by(movement)
            }

            Gesture::TouchEnd { .. } => self.touch_lifted(),

            Gesture::DragEnd { .. }
            | Gesture::Up {
                button: PointerButton::Primary,
                ..
            } => self.interaction.reset(),

            Gesture::Cancel => {
                if self.interaction.is_dragging_cable() {
                    self.interaction.reset();
                }
            }

            Gesture::SingleClick {
                button: PointerButton::Primary,
                position,
            }
            | Gesture::Tap { position } => self.click_at(position),

            Gesture::DoubleClick { button, position } => {
                let direction = match button {
                    PointerButton::Primary => ZoomDirection::In,
                    PointerButton::Secondary => ZoomDirection::Out,
                };
                self.gesture_zoom(direction, position, None);
            }

            Gesture::Wheel { delta_y, position } => {
                if delta_y > 0.0 {
                    self.gesture_zoom(ZoomDirection::Out, position, None);
                } else if delta_y < 0.0 {
                    self.gesture_zoom(ZoomDirection::In, position, None);
                }
            }

            Gesture::Spread { center, .. } => {
                let factor = self.settings.touch.zoom_factor;
                self.gesture_zoom(ZoomDirection::In, center, Some(factor));
            }

            Gesture::Pinch { center, .. } => {
                let factor = self.settings.touch.zoom_factor;
                self.gesture_zoom(ZoomDirection::Out, center, Some(factor));
            }

            _ => {}
        }
    }

    /// A press starts dragging the cable under it, or panning.
    fn press_at(&mut self, screen: Point) {
        let cable = self
            .surface
            .screen_to_logical(screen)
            .ok()
            .and_then(|logical| self.cable_at(logical));
        match cable {
            Some(cable) => self.interaction.start_dragging_cable(cable),
            None => self.interaction.start_panning(),
        }
    }

    /// A finger still down keeps the gesture going: a cable drag stays a
    /// cable drag, anything else continues as a pan.
    fn touch_lifted(&mut self) {
        if self.touch.state().active_touches.is_empty() {
            self.interaction.reset();
        } else if !self.interaction.is_dragging_cable() {
            self.interaction.start_panning();
        }
    }

    fn drag_by(&mut self, movement: Vec2) {
        if let Some(cable) = self.interaction.dragged_cable() {
            let result = self
                .surface
                .delta_to_logical(movement)
                .and_then(|delta| self.move_cable(cable, delta));
            log_abandoned("cable drag", result);
        } else if self.interaction.is_panning() {
            let result = self.pan(PanMovement::pixels(movement));
            log_abandoned("pan", result);
        }
    }

    /// A click on a jack or cable patches or unpatches.
    fn click_at(&mut self, screen: Point) {
        let target = match self.hit_test_screen(screen) {
            Ok(target) => target,
            Err(e) => {
                warn!("Ignoring click at {:?}: {}", screen, e);
                return;
            }
        };
        match target {
            HitTarget::Jack(jack) => {
                let result = self.begin_or_complete_cable(jack, None);
                log_abandoned("patch", result);
            }
            HitTarget::Cable(cable) => {
                let result = self.remove_cable(cable);
                log_abandoned("unpatch", result);
            }
            HitTarget::Background => {}
        }
    }

    fn gesture_zoom(&mut self, direction: ZoomDirection, anchor: Point, factor: Option<f64>) {
        let result = self
            .viewport
            .zoom(&mut self.surface, direction, Some(anchor), factor);
        log_abandoned("zoom", result);
    }
}

fn log_abandoned<T>(action: &str, result: PatchbayResult<T>) {
    if let Err(e) = result {
        warn!("Abandoned {}: {}", action, e);
    }
}
