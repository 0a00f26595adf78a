//! Named handler slots for semantic gestures.
//!
//! Every slot starts empty, which behaves as a no-op. Registering a partial
//! set of handlers with [`GestureCallbacks::merge`] only replaces the slots
//! the new set fills, so overriding `on_tap` never erases `on_pinch`.

use super::gesture::Gesture;
use std::fmt;

/// A boxed gesture handler.
pub type GestureHandler = Box<dyn FnMut(&Gesture)>;

macro_rules! gesture_slots {
    ($($slot:ident => $doc:literal),* $(,)?) => {
        /// One optional handler per semantic gesture.
        #[derive(Default)]
        pub struct GestureCallbacks {
            $($slot: Option<GestureHandler>,)*
        }

        impl GestureCallbacks {
            $(
                #[doc = $doc]
                pub fn $slot(mut self, handler: impl FnMut(&Gesture) + 'static) -> Self {
                    self.$slot = Some(Box::new(handler));
                    self
                }
            )*

            /// Take every slot `other` fills; empty slots in `other` leave ours untouched.
            pub fn merge(&mut self, other: GestureCallbacks) {
                $(
                    if let Some(handler) = other.$slot {
                        self.$slot = Some(handler);
                    }
                )*
            }

            /// Names of the slots currently holding a handler.
            pub fn configured(&self) -> Vec<&'static str> {
                let mut names = Vec::new();
                $(
                    if self.$slot.is_some() {
                        names.push(stringify!($slot));
                    }
                )*
                names
            }
        }
    };
}

gesture_slots! {
    on_down => "Handle a button press.",
    on_up => "Handle a button release that ended no drag.",
    on_move => "Handle hover movement.",
    on_single_click => "Handle a click that no second click followed in time.",
    on_double_click => "Handle the second click of a pair.",
    on_drag_start => "Handle the first movement of a drag.",
    on_drag => "Handle drag movement.",
    on_drag_end => "Handle the release that ends a drag.",
    on_wheel => "Handle a settled wheel burst.",
    on_touch_start => "Handle touches arriving.",
    on_move_single => "Handle one-finger movement.",
    on_move_double => "Handle two-finger movement.",
    on_pinch => "Handle two fingers moving closer.",
    on_spread => "Handle two fingers moving apart.",
    on_tap => "Handle a touch lifted before the long-press threshold.",
    on_touch_end => "Handle touches lifting.",
    on_cancel => "Handle the platform canceling touches.",
}

impl GestureCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke the slot matching `gesture`, if one is set.
    pub fn dispatch(&mut self, gesture: &Gesture) {
        let slot = match gesture {
            Gesture::Down { .. } => &mut self.on_down,
            Gesture::Up { .. } => &mut self.on_up,
            Gesture::Move { .. } => &mut self.on_move,
            Gesture::SingleClick { .. } => &mut self.on_single_click,
            Gesture::DoubleClick { .. } => &mut self.on_double_click,
            Gesture::DragStart { .. } => &mut self.on_drag_start,
            Gesture::Drag { .. } => &mut self.on_drag,
            Gesture::DragEnd { .. } => &mut self.on_drag_end,
            Gesture::Wheel { .. } => &mut self.on_wheel,
            Gesture::TouchStart { .. } => &mut self.on_touch_start,
            Gesture::MoveSingle { .. } => &mut self.on_move_single,
            Gesture::MoveDouble { .. } => &mut self.on_move_double,
            Gesture::Pinch { .. } => &mut self.on_pinch,
            Gesture::Spread { .. } => &mut self.on_spread,
            Gesture::Tap { .. } => &mut self.on_tap,
            Gesture::TouchEnd { .. } => &mut self.on_touch_end,
            Gesture::Cancel => &mut self.on_cancel,
        };
        if let Some(handler) = slot {
            handler(gesture);
        }
    }
}

impl fmt::Debug for GestureCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureCallbacks")
            .field("configured", &self.configured())
            .finish()
    }
}
