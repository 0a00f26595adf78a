//! Drawing surface contract consumed by the viewport engine and controller.
//!
//! The rendering layer owns the real surface (an `<svg>` element, a canvas,
//! a test double). The core only needs its viewport, its on-screen bounds and
//! a screen-to-logical transform.

use crate::error::{PatchbayError, PatchbayResult};
use crate::input::coords::{CoordinateContext, CoordinateConverter};
use crate::viewport::Viewport;
use kurbo::{Point, Rect, Vec2};

/// A surface the diagram is drawn on.
pub trait DrawingSurface {
    /// Current logical viewport.
    fn viewport(&self) -> Viewport;

    /// Replace the viewport. Only the viewport engine calls this.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Screen rectangle in pixels, `None` until the surface is attached.
    fn bounds(&self) -> Option<Rect>;

    /// Map a screen position into logical coordinates.
    fn screen_to_logical(&self, screen: Point) -> PatchbayResult<Point> {
        let bounds = self.bounds().ok_or(PatchbayError::Detached)?;
        let viewport = self.viewport();
        let ctx = CoordinateContext::new(&bounds, &viewport);
        Ok(CoordinateConverter::screen_to_logical(screen, &ctx))
    }

    /// Map a screen-space movement into logical units.
    fn delta_to_logical(&self, delta: Vec2) -> PatchbayResult<Vec2> {
        let bounds = self.bounds().ok_or(PatchbayError::Detached)?;
        let viewport = self.viewport();
        let ctx = CoordinateContext::new(&bounds, &viewport);
        Ok(CoordinateConverter::delta_screen_to_logical(delta, &ctx))
    }
}

/// In-memory surface with SVG `viewBox` semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgSurface {
    viewport: Viewport,
    bounds: Option<Rect>,
}

impl SvgSurface {
    /// A detached surface showing `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            bounds: None,
        }
    }

    /// A surface already laid out at `bounds`.
    pub fn attached(viewport: Viewport, bounds: Rect) -> Self {
        Self {
            viewport,
            bounds: Some(bounds),
        }
    }

    pub fn attach(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    pub fn detach(&mut self) {
        self.bounds = None;
    }

    pub fn is_attached(&self) -> bool {
        self.bounds.is_some()
    }

    /// The `viewBox` attribute value.
    pub fn view_box(&self) -> String {
        self.viewport.to_string()
    }
}

impl DrawingSurface for SvgSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn bounds(&self) -> Option<Rect> {
        self.bounds
    }
}
