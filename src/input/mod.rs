//! Pointer and touch input handling for the diagram surface.
//!
//! This module turns raw, noisy input into a small vocabulary of semantic
//! gestures (click, double-click, drag, wheel, tap, pinch, spread).
//!
//! ## Architecture
//!
//! Each surface owns one [`PointerGestures`] and one [`TouchGestures`]
//! engine. Engines are fed primitive events stamped with the current time,
//! return the gestures they classified, and also hand every gesture to the
//! [`GestureCallbacks`] configured on them.
//!
//! ## Modules
//!
//! - `gesture` - Semantic gesture vocabulary
//! - `callbacks` - Named handler slots with non-destructive merge
//! - `pointer` - Mouse/pen press, drag, click and wheel disambiguation
//! - `touch` - Multi-touch tap, movement and pinch/spread detection
//! - `state` - Controller interaction state (idle, panning, dragging a cable)
//! - `coords` - Screen/logical coordinate conversion

pub mod coords;
mod callbacks;
mod gesture;
mod pointer;
mod state;
mod touch;

pub use callbacks::{GestureCallbacks, GestureHandler};
pub use gesture::{DefaultAction, Gesture, PointerButton, TouchPoint};
pub use pointer::{PointerGestureState, PointerGestures, PointerStatePatch, PointerTiming};
pub use state::InteractionState;
pub use touch::{TouchGestureState, TouchGestures, TouchStatePatch, TouchTiming};
