//! Pan commands: absolute screen amounts or percentages of the viewport.

use crate::error::{PatchbayError, PatchbayResult};
use kurbo::Vec2;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// Movement along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanAmount {
    /// Screen pixels; scaled by `viewport_width / screen_width` when applied
    Pixels(f64),
    /// Percentage of the current viewport dimension on that axis
    Percent(f64),
}

impl PanAmount {
    /// Logical distance for a viewport `dimension`. `scale` is logical units
    /// per screen pixel and is only needed for pixel amounts.
    pub fn resolve(self, dimension: f64, scale: Option<f64>) -> PatchbayResult<f64> {
        match self {
            Self::Percent(percent) => Ok(dimension * percent * 0.01),
            Self::Pixels(pixels) => scale
                .map(|scale| pixels * scale)
                .ok_or(PatchbayError::Detached),
        }
    }

    pub fn is_pixels(&self) -> bool {
        matches!(self, Self::Pixels(_))
    }

    fn value(&self) -> f64 {
        match self {
            Self::Pixels(v) | Self::Percent(v) => *v,
        }
    }

    fn checked(self) -> PatchbayResult<Self> {
        if self.value().is_finite() {
            Ok(self)
        } else {
            Err(PatchbayError::Configuration(self.to_string()))
        }
    }
}

impl From<f64> for PanAmount {
    fn from(pixels: f64) -> Self {
        Self::Pixels(pixels)
    }
}

impl Neg for PanAmount {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Pixels(v) => Self::Pixels(-v),
            Self::Percent(v) => Self::Percent(-v),
        }
    }
}

impl fmt::Display for PanAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(v) => write!(f, "{v}"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl FromStr for PanAmount {
    type Err = PatchbayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let illegal = || PatchbayError::Configuration(s.to_string());
        let amount = match value.strip_suffix('%') {
            Some(number) => Self::Percent(number.trim().parse().map_err(|_| illegal())?),
            None => Self::Pixels(value.parse().map_err(|_| illegal())?),
        };
        amount.checked().map_err(|_| illegal())
    }
}

/// Movement on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanMovement {
    pub x: PanAmount,
    pub y: PanAmount,
}

impl PanMovement {
    pub fn new(x: impl Into<PanAmount>, y: impl Into<PanAmount>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Screen-pixel movement, e.g. a drag delta.
    pub fn pixels(delta: Vec2) -> Self {
        Self::new(delta.x, delta.y)
    }

    /// Parse both axes from text (`"12"`, `"-20%"`).
    pub fn parse(x: &str, y: &str) -> PatchbayResult<Self> {
        Ok(Self {
            x: x.parse()?,
            y: y.parse()?,
        })
    }

    /// Reject non-finite amounts.
    pub fn validate(self) -> PatchbayResult<Self> {
        Ok(Self {
            x: self.x.checked()?,
            y: self.y.checked()?,
        })
    }

    pub fn needs_screen_scale(&self) -> bool {
        self.x.is_pixels() || self.y.is_pixels()
    }
}

/// Pan buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    /// Movement for one press. Content follows the arrow: "Up" reveals what
    /// is above, so the viewport origin decreases.
    pub fn movement(self, step: PanAmount) -> PanMovement {
        // A percentage zero resolves without screen bounds
        let zero = PanAmount::Percent(0.0);
        match self {
            Self::Up => PanMovement { x: zero, y: step },
            Self::Down => PanMovement { x: zero, y: -step },
            Self::Left => PanMovement { x: step, y: zero },
            Self::Right => PanMovement { x: -step, y: zero },
        }
    }
}
