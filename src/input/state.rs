//! Interaction state machine for the diagram controller.
//!
//! Replaces loose "pressed" / "dragging a cable" booleans with one enum.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Panning              (press or touch on empty diagram space)
//! Idle -> DraggingCable        (press or touch on a cable body)
//!
//! Any -> Idle                  (drag end, release, touch end, pointer re-entry)
//! DraggingCable -> Idle        (touch cancel)
//! ```

use crate::cable::CableId;

/// What a press or touch currently drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    /// No active interaction
    #[default]
    Idle,

    /// Dragging empty space pans the viewport
    Panning,

    /// Dragging moves a cable's free end or belly
    DraggingCable {
        /// Cable under the pointer when the press began
        cable: CableId,
    },
}

impl InteractionState {
    /// Returns true if the viewport follows drag movement
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning)
    }

    /// Returns true if a cable follows drag movement
    pub fn is_dragging_cable(&self) -> bool {
        matches!(self, Self::DraggingCable { .. })
    }

    /// Get the cable being dragged, if any
    pub fn dragged_cable(&self) -> Option<CableId> {
        match self {
            Self::DraggingCable { cable } => Some(*cable),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn start_panning(&mut self) {
        *self = Self::Panning;
    }

    pub fn start_dragging_cable(&mut self, cable: CableId) {
        *self = Self::DraggingCable { cable };
    }
}
