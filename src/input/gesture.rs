//! Semantic gesture vocabulary shared by the pointer and touch engines.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer buttons the engines give meaning to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` index. Middle and auxiliary buttons are ignored.
    pub fn from_dom_button(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Primary),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// One contact point of a touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: i64,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: i64, x: f64, y: f64) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

/// What the host should do with the platform's default handling of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAction {
    Allow,
    Prevent,
}

/// A classified gesture. Positions are in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Button pressed (emitted immediately, before any disambiguation)
    Down { button: PointerButton, position: Point },
    /// Button released without a drag
    Up { button: PointerButton, position: Point },
    /// Pointer moved with no confirmed press (hover)
    Move { position: Point, movement: Vec2 },
    /// First drag movement after a confirmed press
    DragStart { button: PointerButton, position: Point },
    Drag { position: Point, movement: Vec2 },
    DragEnd { position: Point },
    SingleClick { button: PointerButton, position: Point },
    DoubleClick { button: PointerButton, position: Point },
    /// Coalesced wheel burst carrying its last delta
    Wheel { delta_y: f64, position: Point },
    TouchStart { position: Point },
    MoveSingle { position: Point, movement: Vec2 },
    MoveDouble { center: Point, movement: Vec2 },
    /// Two touches moved closer together
    Pinch { center: Point, distance: f64 },
    /// Two touches moved further apart
    Spread { center: Point, distance: f64 },
    Tap { position: Point },
    TouchEnd { position: Point },
    Cancel,
}

impl Gesture {
    /// Short name used in trace output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Down { .. } => "down",
            Self::Up { .. } => "up",
            Self::Move { .. } => "move",
            Self::DragStart { .. } => "drag_start",
            Self::Drag { .. } => "drag",
            Self::DragEnd { .. } => "drag_end",
            Self::SingleClick { .. } => "single_click",
            Self::DoubleClick { .. } => "double_click",
            Self::Wheel { .. } => "wheel",
            Self::TouchStart { .. } => "touch_start",
            Self::MoveSingle { .. } => "move_single",
            Self::MoveDouble { .. } => "move_double",
            Self::Pinch { .. } => "pinch",
            Self::Spread { .. } => "spread",
            Self::Tap { .. } => "tap",
            Self::TouchEnd { .. } => "touch_end",
            Self::Cancel => "cancel",
        }
    }
}
