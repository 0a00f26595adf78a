//! Viewport transforms - anchored zoom, pan, pan-to and fit-rectangle.

use super::{PanMovement, Viewport};
use crate::constants::{FIT_MARGIN, FIT_MIN_DIMENSION, ZOOM_FACTOR};
use crate::error::{PatchbayError, PatchbayResult};
use crate::surface::DrawingSurface;
use kurbo::{Point, Rect};
use std::fmt;
use tracing::{trace, warn};

/// Observer invoked with the new viewport after every mutation.
pub type ViewportObserver = Box<dyn FnMut(&Viewport)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Tunables for [`ViewportEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportOptions {
    /// Default factor for `zoom_in` / `zoom_out`
    pub zoom_factor: f64,
    /// Smallest dimension `fit_rectangle` frames
    pub fit_min_dimension: f64,
    /// Multiplier applied around a fitted rectangle
    pub fit_margin: f64,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            zoom_factor: ZOOM_FACTOR,
            fit_min_dimension: FIT_MIN_DIMENSION,
            fit_margin: FIT_MARGIN,
        }
    }
}

/// The only writer of a surface's viewport.
pub struct ViewportEngine {
    options: ViewportOptions,
    observer: Option<ViewportObserver>,
}

impl ViewportEngine {
    pub fn new(options: ViewportOptions) -> Self {
        Self {
            options,
            observer: None,
        }
    }

    pub fn options(&self) -> ViewportOptions {
        self.options
    }

    pub fn set_options(&mut self, options: ViewportOptions) {
        self.options = options;
    }

    /// Register the observer, replacing any previous one.
    pub fn on_viewport_changed(&mut self, observer: impl FnMut(&Viewport) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Replace the viewport outright (initial framing, restoring a saved view).
    pub fn set_viewport<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        viewport: Viewport,
    ) -> PatchbayResult<Viewport> {
        self.commit(surface, viewport)
    }

    /// Scale the viewport around `anchor` (screen pixels, default: surface center).
    ///
    /// The logical point under the anchor stays under the anchor.
    pub fn zoom<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        direction: ZoomDirection,
        anchor: Option<Point>,
        factor: Option<f64>,
    ) -> PatchbayResult<Viewport> {
        let factor = factor.unwrap_or(self.options.zoom_factor);
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PatchbayError::Configuration(format!("zoom factor {factor}")));
        }
        let z = match direction {
            ZoomDirection::Out => factor,
            ZoomDirection::In => 1.0 / factor,
        };

        let anchor = match anchor {
            Some(anchor) => anchor,
            None => surface.bounds().ok_or(PatchbayError::Detached)?.center(),
        };
        let target = surface.screen_to_logical(anchor)?;
        let view = surface.viewport();

        let next = Viewport::new(
            new_origin(target.x, z, view.x),
            new_origin(target.y, z, view.y),
            view.width * z,
            view.height * z,
        );
        trace!(?direction, factor, %next, "zoom");
        self.commit(surface, next)
    }

    pub fn zoom_in<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        anchor: Option<Point>,
        factor: Option<f64>,
    ) -> PatchbayResult<Viewport> {
        self.zoom(surface, ZoomDirection::In, anchor, factor)
    }

    pub fn zoom_out<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        anchor: Option<Point>,
        factor: Option<f64>,
    ) -> PatchbayResult<Viewport> {
        self.zoom(surface, ZoomDirection::Out, anchor, factor)
    }

    /// Move the viewport opposite to `movement`, so content follows the pointer.
    ///
    /// Pixel amounts are scaled by `viewport_width / screen_width`; percentages
    /// resolve against the viewport's own width/height.
    pub fn pan<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        movement: PanMovement,
    ) -> PatchbayResult<Viewport> {
        let movement = movement.validate()?;
        let view = surface.viewport();
        let scale = if movement.needs_screen_scale() {
            let bounds = surface.bounds().ok_or(PatchbayError::Detached)?;
            Some(view.width / bounds.width())
        } else {
            None
        };

        let dx = movement.x.resolve(view.width, scale)?;
        let dy = movement.y.resolve(view.height, scale)?;
        let next = Viewport::new(view.x - dx, view.y - dy, view.width, view.height);
        trace!(dx, dy, %next, "pan");
        self.commit(surface, next)
    }

    /// Center the viewport on a logical point, keeping its size.
    pub fn pan_to<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        point: Point,
    ) -> PatchbayResult<Viewport> {
        let view = surface.viewport();
        let next = Viewport::new(
            point.x - view.width / 2.0,
            point.y - view.height / 2.0,
            view.width,
            view.height,
        );
        self.commit(surface, next)
    }

    /// Frame `target` with a margin, keeping the current aspect ratio.
    ///
    /// Tiny targets are first grown so their longer side reaches the minimum
    /// dimension, which stops a single jack from filling the screen.
    pub fn fit_rectangle<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        target: Rect,
    ) -> PatchbayResult<Viewport> {
        let target = target.abs();
        let view = surface.viewport();
        let ViewportOptions {
            fit_min_dimension: minimum,
            fit_margin: margin,
            ..
        } = self.options;

        let (mut width, mut height) = (target.width(), target.height());
        if width < minimum && height < minimum {
            if width > height {
                width = minimum;
            } else {
                height = minimum;
            }
        }

        let fitted_width = if width > height {
            width * margin
        } else {
            view.width * height * margin / view.height
        };
        let fitted_height = if height >= width {
            height * margin
        } else {
            view.height * width * margin / view.width
        };

        let center = target.center();
        let next = Viewport::new(
            center.x - fitted_width / 2.0,
            center.y - fitted_height / 2.0,
            fitted_width,
            fitted_height,
        );
        self.commit(surface, next)
    }

    fn commit<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        next: Viewport,
    ) -> PatchbayResult<Viewport> {
        let next = next.validate().inspect_err(|e| warn!("{}", e))?;
        surface.set_viewport(next);
        if let Some(observer) = self.observer.as_mut() {
            observer(&next);
        }
        Ok(next)
    }
}

impl Default for ViewportEngine {
    fn default() -> Self {
        Self::new(ViewportOptions::default())
    }
}

impl fmt::Debug for ViewportEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportEngine")
            .field("options", &self.options)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

/// New origin that keeps `anchor` fixed while scaling by `z`.
#[inline]
fn new_origin(anchor: f64, z: f64, old_origin: f64) -> f64 {
    anchor + z * (old_origin - anchor)
}
