//! Overview (minimap) state.
//!
//! The overview shows the whole diagram shrunk by a fixed scale, with an
//! indicator rectangle tracking the main viewport. Its own viewBox is the
//! full diagram, so the indicator is stored in logical units.

use crate::constants::OVERVIEW_SCALE;
use crate::viewport::Viewport;
use kurbo::{Point, Rect, Size, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    diagram: Rect,
    scale: f64,
    indicator: Viewport,
}

impl Overview {
    pub fn new(diagram: Rect, scale: f64) -> Self {
        let diagram = diagram.abs();
        Self {
            diagram,
            scale,
            indicator: Viewport::from_rect(diagram),
        }
    }

    /// Logical units per overview pixel.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn diagram(&self) -> Rect {
        self.diagram
    }

    pub fn set_diagram(&mut self, diagram: Rect) {
        self.diagram = diagram.abs();
    }

    /// On-screen size in pixels.
    pub fn size(&self) -> Size {
        Size::new(
            self.diagram.width() / self.scale,
            self.diagram.height() / self.scale,
        )
    }

    /// The overview's own viewBox: the full diagram.
    pub fn view_box(&self) -> Viewport {
        Viewport::new(0.0, 0.0, self.diagram.width(), self.diagram.height())
    }

    /// Rectangle showing what the main surface currently displays.
    pub fn indicator(&self) -> Viewport {
        self.indicator
    }

    pub fn position(&mut self, viewport: &Viewport) {
        self.indicator = *viewport;
    }

    /// Logical point under a click at `offset` pixels from the overview's
    /// top-left corner.
    pub fn logical_point(&self, offset: Vec2) -> Point {
        (offset * self.scale).to_point()
    }
}

impl Default for Overview {
    fn default() -> Self {
        Self::new(Rect::ZERO, OVERVIEW_SCALE)
    }
}
