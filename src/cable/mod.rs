//! Patch cables: geometry, rendering and the free-end physics.
//!
//! A cable is a quadratic curve from its start jack through a control point
//! to its end. While the end has no jack the cable is half-connected and its
//! loose end swings and falls; once completed, the belly (control point)
//! swings and sags instead.

mod animation;

pub use animation::{AnimationScheduler, AnimationTask, CablePhysics, Step};

use crate::patchbay::JackId;
use kurbo::{ParamCurveNearest, Point, QuadBez, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a cable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CableId(pub u64);

impl fmt::Display for CableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cable-{}", self.0)
    }
}

/// The flag guarding a running animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dangling {
    /// Set while a freshly started cable's loose end settles
    Start,
    /// Set while a completed cable's belly settles
    End,
}

/// A single animatable coordinate of a cable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CableProperty {
    EndX,
    EndY,
    ControlX,
    ControlY,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cable {
    id: CableId,
    color: String,
    start: Point,
    start_jack: JackId,
    end: Point,
    end_jack: Option<JackId>,
    control: Point,
    dangling_start: bool,
    dangling_end: bool,
}

impl Cable {
    /// A half-connected cable hanging from `jack` at `position`.
    ///
    /// Both ends start on the jack; the control point sits half a cable length below.
    pub fn begin(id: CableId, color: impl Into<String>, jack: JackId, position: Point, length: f64) -> Self {
        Self {
            id,
            color: color.into(),
            start: position,
            start_jack: jack,
            end: position,
            end_jack: None,
            control: Point::new(position.x, position.y + length / 2.0),
            dangling_start: false,
            dangling_end: false,
        }
    }

    /// Attach the free end to `jack` and bring the belly between the two ends.
    pub fn complete(&mut self, jack: JackId, position: Point) {
        self.dangling_start = false;
        self.end = position;
        self.end_jack = Some(jack);
        self.control = Point::new(
            (self.start.x + self.end.x) / 2.0,
            self.start.y.max(self.end.y),
        );
    }

    pub fn id(&self) -> CableId {
        self.id
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn control(&self) -> Point {
        self.control
    }

    pub fn start_jack(&self) -> JackId {
        self.start_jack
    }

    pub fn end_jack(&self) -> Option<JackId> {
        self.end_jack
    }

    /// The end has no jack yet.
    pub fn is_half_connected(&self) -> bool {
        self.end_jack.is_none()
    }

    pub fn is_dangling(&self, which: Dangling) -> bool {
        match which {
            Dangling::Start => self.dangling_start,
            Dangling::End => self.dangling_end,
        }
    }

    pub fn set_dangling(&mut self, which: Dangling, value: bool) {
        match which {
            Dangling::Start => self.dangling_start = value,
            Dangling::End => self.dangling_end = value,
        }
    }

    /// Clear both flags, which stops every animation of this cable.
    pub fn settle(&mut self) {
        self.dangling_start = false;
        self.dangling_end = false;
    }

    pub fn touches_jack(&self, jack: JackId) -> bool {
        self.start_jack == jack || self.end_jack == Some(jack)
    }

    pub fn get(&self, property: CableProperty) -> f64 {
        match property {
            CableProperty::EndX => self.end.x,
            CableProperty::EndY => self.end.y,
            CableProperty::ControlX => self.control.x,
            CableProperty::ControlY => self.control.y,
        }
    }

    pub fn set(&mut self, property: CableProperty, value: f64) {
        match property {
            CableProperty::EndX => self.end.x = value,
            CableProperty::EndY => self.end.y = value,
            CableProperty::ControlX => self.control.x = value,
            CableProperty::ControlY => self.control.y = value,
        }
    }

    /// Manual movement: always pre-empts the physics.
    ///
    /// Moves the free end of a half-connected cable, otherwise the control point.
    pub fn translate(&mut self, movement: Vec2) {
        self.settle();
        if self.is_half_connected() {
            self.end += movement;
        } else {
            self.control += movement;
        }
    }

    pub fn curve(&self) -> QuadBez {
        QuadBez::new(self.start, self.control, self.end)
    }

    /// SVG path data, `M{start} Q{control} {end}`.
    pub fn path_data(&self) -> String {
        format!(
            "M{},{} Q{},{} {},{}",
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
        )
    }

    /// True if `point` lies within `tolerance` of the cable's curve.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let nearest = self.curve().nearest(point, 1e-6);
        nearest.distance_sq <= tolerance * tolerance
    }
}
