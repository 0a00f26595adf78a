//! Coordinate conversion between screen pixels and logical diagram units.
//!
//! The mapping follows SVG's default `preserveAspectRatio="xMidYMid meet"`:
//! the viewport is scaled uniformly to fit the screen rectangle and centered
//! along the axis with spare room.

use crate::viewport::Viewport;
use kurbo::{Point, Rect, Vec2};

/// Context needed for coordinate conversions
pub struct CoordinateContext<'a> {
    /// Screen rectangle of the drawing surface, in pixels
    pub bounds: &'a Rect,
    pub viewport: &'a Viewport,
}

impl<'a> CoordinateContext<'a> {
    #[inline]
    pub fn new(bounds: &'a Rect, viewport: &'a Viewport) -> Self {
        Self { bounds, viewport }
    }

    /// Pixels per logical unit and the letterbox offset inside the bounds.
    #[inline]
    fn fit(&self) -> (f64, Vec2) {
        let scale = (self.bounds.width() / self.viewport.width)
            .min(self.bounds.height() / self.viewport.height);
        let offset = Vec2::new(
            (self.bounds.width() - self.viewport.width * scale) / 2.0,
            (self.bounds.height() - self.viewport.height * scale) / 2.0,
        );
        (scale, offset)
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert a screen position to a logical position
    #[inline]
    pub fn screen_to_logical(screen: Point, ctx: &CoordinateContext<'_>) -> Point {
        let (scale, offset) = ctx.fit();
        Point::new(
            (screen.x - ctx.bounds.x0 - offset.x) / scale + ctx.viewport.x,
            (screen.y - ctx.bounds.y0 - offset.y) / scale + ctx.viewport.y,
        )
    }

    /// Convert a logical position to a screen position
    #[inline]
    pub fn logical_to_screen(logical: Point, ctx: &CoordinateContext<'_>) -> Point {
        let (scale, offset) = ctx.fit();
        Point::new(
            (logical.x - ctx.viewport.x) * scale + offset.x + ctx.bounds.x0,
            (logical.y - ctx.viewport.y) * scale + offset.y + ctx.bounds.y0,
        )
    }

    /// Convert a delta from screen to logical units (for drag operations)
    #[inline]
    pub fn delta_screen_to_logical(delta: Vec2, ctx: &CoordinateContext<'_>) -> Vec2 {
        let (scale, _) = ctx.fit();
        delta / scale
    }

    /// Convert a delta from logical units to screen pixels
    #[inline]
    pub fn delta_logical_to_screen(delta: Vec2, ctx: &CoordinateContext<'_>) -> Vec2 {
        let (scale, _) = ctx.fit();
        delta * scale
    }
}
