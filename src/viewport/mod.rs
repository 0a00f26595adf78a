//! Viewport (viewBox) model and the transform engine that mutates it.
//!
//! A [`Viewport`] is the logical rectangle currently visible on the drawing
//! surface. Only [`ViewportEngine`] mutates it; every mutation is validated
//! and reported to a single registered observer, which is how the overview
//! indicator stays in sync.
//!
//! The text form is the SVG `viewBox` notation: four numbers, `x y width height`.
//! Parsing accepts commas and/or whitespace between them.

mod engine;
mod pan;

pub use engine::{ViewportEngine, ViewportObserver, ViewportOptions, ZoomDirection};
pub use pan::{PanAmount, PanDirection, PanMovement};

use crate::error::{PatchbayError, PatchbayResult};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The logical rectangle currently visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }

    /// Width and height strictly positive, every field finite.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Return `self` if it satisfies the viewport invariant.
    pub fn validate(self) -> PatchbayResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(PatchbayError::InvariantViolation(self))
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Component-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &Viewport, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for Viewport {
    type Err = PatchbayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<f64>()
                    .map_err(|_| PatchbayError::Configuration(format!("viewBox value `{part}`")))
            })
            .collect::<PatchbayResult<Vec<f64>>>()?;

        match values.as_slice() {
            [x, y, width, height] => Viewport::new(*x, *y, *width, *height).validate(),
            _ => Err(PatchbayError::Configuration(format!(
                "viewBox needs 4 values, got `{s}`"
            ))),
        }
    }
}
