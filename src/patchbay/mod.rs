//! The diagram controller.
//!
//! [`Patchbay`] owns one drawing surface and everything that acts on it:
//! the pointer and touch gesture engines, the viewport engine, the jacks,
//! the cables and their animations, and the overview. Raw input goes in
//! through the methods in `gestures`; the classified gestures are turned
//! into cable and viewport actions here.
//!
//! ## Patching
//!
//! ```text
//! Idle -> AwaitingSecondEndpoint(cable)   (click a free jack)
//! AwaitingSecondEndpoint -> Idle          (click a second free jack)
//! AwaitingSecondEndpoint -> Idle          (the pending cable is removed)
//! ```
//!
//! Clicking a patched jack or a cable body removes that cable.

mod gestures;
mod jacks;

pub use jacks::{Jack, JackId, JackRegistry};

use crate::cable::{AnimationScheduler, Cable, CableId, CablePhysics};
use crate::constants::PAN_STEP_PERCENT;
use crate::error::{PatchbayError, PatchbayResult};
use crate::input::{InteractionState, PointerGestures, TouchGestures};
use crate::layout::DiagramLayout;
use crate::overview::Overview;
use crate::perf::FrameMonitor;
use crate::settings::Settings;
use crate::surface::DrawingSurface;
use crate::viewport::{
    PanAmount, PanDirection, PanMovement, Viewport, ViewportEngine, ZoomDirection,
};
use kurbo::{Point, Rect, Vec2};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Whether a cable is waiting for its second jack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatchState {
    #[default]
    Idle,
    AwaitingSecondEndpoint(CableId),
}

impl PatchState {
    pub fn pending_cable(&self) -> Option<CableId> {
        match self {
            Self::Idle => None,
            Self::AwaitingSecondEndpoint(cable) => Some(*cable),
        }
    }
}

/// A cable, or the jack one of its ends is plugged into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CableTarget {
    Cable(CableId),
    Jack(JackId),
}

impl From<CableId> for CableTarget {
    fn from(cable: CableId) -> Self {
        Self::Cable(cable)
    }
}

impl From<JackId> for CableTarget {
    fn from(jack: JackId) -> Self {
        Self::Jack(jack)
    }
}

/// What a click on a jack did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchAction {
    Started(CableId),
    Completed(CableId),
    Removed(CableId),
}

/// What lies under a logical point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Jack(JackId),
    Cable(CableId),
    Background,
}

pub struct Patchbay<S: DrawingSurface> {
    surface: S,
    pointer: PointerGestures,
    touch: TouchGestures,
    viewport: ViewportEngine,
    animations: AnimationScheduler,
    physics: CablePhysics,
    jacks: JackRegistry,
    cables: Vec<Cable>,
    next_cable: u64,
    patch_state: PatchState,
    interaction: InteractionState,
    overview: Rc<RefCell<Overview>>,
    settings: Settings,
    pan_step: PanAmount,
    frames: FrameMonitor,
}

impl<S: DrawingSurface> Patchbay<S> {
    /// A controller over `surface` showing `jacks` on a diagram of `diagram` bounds.
    ///
    /// The viewport starts framing the whole diagram when it has a size.
    pub fn new(surface: S, jacks: JackRegistry, diagram: Rect, settings: Settings) -> Self {
        let overview = Rc::new(RefCell::new(Overview::new(
            diagram,
            settings.view.overview_scale,
        )));

        let mut patchbay = Self {
            surface,
            pointer: PointerGestures::new(settings.pointer_timing()),
            touch: TouchGestures::new(settings.touch_timing()),
            viewport: ViewportEngine::new(settings.viewport_options()),
            animations: AnimationScheduler::new(),
            physics: settings.cable_physics(),
            jacks,
            cables: Vec::new(),
            next_cable: 0,
            patch_state: PatchState::Idle,
            interaction: InteractionState::Idle,
            overview,
            settings: Settings::default(),
            pan_step: PanAmount::Percent(PAN_STEP_PERCENT),
            frames: FrameMonitor::new(),
        };
        patchbay.apply_settings(settings);
        patchbay.observe_viewport(|_| {});

        let initial = Viewport::from_rect(diagram);
        if initial.is_valid() {
            if let Err(e) = patchbay.viewport.set_viewport(&mut patchbay.surface, initial) {
                warn!("Keeping surface viewport, could not frame diagram: {}", e);
            }
        }
        patchbay
    }

    /// A controller over a laid-out diagram.
    pub fn from_layout(surface: S, layout: &DiagramLayout, settings: Settings) -> Self {
        Self::new(surface, JackRegistry::from_layout(layout), layout.bounds, settings)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access for layout changes (attach, resize).
    /// Viewport changes must go through the controller.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    pub fn jacks(&self) -> &JackRegistry {
        &self.jacks
    }

    pub fn cables(&self) -> &[Cable] {
        &self.cables
    }

    pub fn cable(&self, id: CableId) -> Option<&Cable> {
        self.cables.iter().find(|c| c.id() == id)
    }

    pub fn patch_state(&self) -> PatchState {
        self.patch_state
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    pub fn overview(&self) -> Ref<'_, Overview> {
        self.overview.borrow()
    }

    pub fn pointer(&self) -> &PointerGestures {
        &self.pointer
    }

    pub fn touch(&self) -> &TouchGestures {
        &self.touch
    }

    pub fn animations(&self) -> &AnimationScheduler {
        &self.animations
    }

    /// Timing of the animation loop.
    pub fn frames(&self) -> &FrameMonitor {
        &self.frames
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Push new settings into every engine. Running animations keep the
    /// physics they started with.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.pointer.set_timing(settings.pointer_timing());
        self.touch.set_timing(settings.touch_timing());
        self.viewport.set_options(settings.viewport_options());
        self.physics = settings.cable_physics();
        self.overview
            .borrow_mut()
            .set_scale(settings.view.overview_scale);
        match settings.pan_step() {
            Ok(step) => self.pan_step = step,
            Err(e) => warn!("Keeping pan step {}: {}", self.pan_step, e),
        }
        self.settings = settings;
        debug!("Applied settings");
    }

    /// Register a viewport observer. The overview indicator is always kept
    /// in sync before `observer` runs.
    pub fn on_viewport_changed(&mut self, observer: impl FnMut(&Viewport) + 'static) {
        self.observe_viewport(observer);
    }

    fn observe_viewport(&mut self, mut observer: impl FnMut(&Viewport) + 'static) {
        let overview = Rc::clone(&self.overview);
        self.viewport.on_viewport_changed(move |view| {
            overview.borrow_mut().position(view);
            observer(view);
        });
    }

    // ------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------

    /// Jacks win over cable bodies; among cables the most recent is on top.
    pub fn hit_test(&self, logical: Point) -> HitTarget {
        if let Some(jack) = self.jacks.hit_test(logical) {
            return HitTarget::Jack(jack);
        }
        self.cable_at(logical)
            .map(HitTarget::Cable)
            .unwrap_or(HitTarget::Background)
    }

    /// Topmost cable whose stroke covers `logical`.
    pub fn cable_at(&self, logical: Point) -> Option<CableId> {
        crate::profile_scope!("cable_hit_test");
        let tolerance = self.settings.cables.stroke_width / 2.0;
        self.cables
            .iter()
            .rev()
            .find(|cable| cable.hit_test(logical, tolerance))
            .map(Cable::id)
    }

    /// Hit test a screen position.
    pub fn hit_test_screen(&self, screen: Point) -> PatchbayResult<HitTarget> {
        let logical = self.surface.screen_to_logical(screen)?;
        Ok(self.hit_test(logical))
    }

    // ------------------------------------------------------------------
    // Cables
    // ------------------------------------------------------------------

    /// Click on a jack.
    ///
    /// A patched jack loses its cable. A free jack starts a new cable, or
    /// completes the pending one. `color` defaults to the configured cable
    /// color and only applies to new cables.
    pub fn begin_or_complete_cable(
        &mut self,
        jack: JackId,
        color: Option<&str>,
    ) -> PatchbayResult<PatchAction> {
        let target = self.jacks.lookup(jack)?;
        let position = target.position();

        if target.is_patched() {
            return self.remove_cable(jack).map(PatchAction::Removed);
        }

        if let PatchState::AwaitingSecondEndpoint(id) = self.patch_state {
            let Some(cable) = self.cables.iter_mut().find(|c| c.id() == id) else {
                self.patch_state = PatchState::Idle;
                return Err(PatchbayError::UnknownCable(id));
            };
            cable.complete(jack, position);
            self.animations.animate_complete(cable, &self.physics);
            let color = cable.color().to_string();
            self.jacks.lookup_mut(jack)?.patch(&color);
            self.patch_state = PatchState::Idle;
            info!(cable = %id, %jack, "Completed cable");
            return Ok(PatchAction::Completed(id));
        }

        let id = CableId(self.next_cable);
        self.next_cable += 1;
        let color = color.unwrap_or(&self.settings.cables.default_color).to_string();
        let mut cable = Cable::begin(id, color.as_str(), jack, position, self.physics.length);
        self.animations.animate_begin(&mut cable, &self.physics);
        self.cables.push(cable);
        self.jacks.lookup_mut(jack)?.patch(&color);
        self.patch_state = PatchState::AwaitingSecondEndpoint(id);
        info!(cable = %id, %jack, %color, "Started cable");
        Ok(PatchAction::Started(id))
    }

    /// Remove a cable and free its jacks.
    pub fn remove_cable(&mut self, target: impl Into<CableTarget>) -> PatchbayResult<CableId> {
        let index = match target.into() {
            CableTarget::Cable(id) => self
                .cables
                .iter()
                .position(|c| c.id() == id)
                .ok_or(PatchbayError::UnknownCable(id))?,
            CableTarget::Jack(jack) => {
                self.jacks.lookup(jack)?;
                self.cables
                    .iter()
                    .position(|c| c.touches_jack(jack))
                    .ok_or(PatchbayError::Unpatched(jack))?
            }
        };

        let mut cable = self.cables.remove(index);
        let id = cable.id();
        cable.settle();
        self.animations.cancel_cable(id);
        for jack in std::iter::once(cable.start_jack()).chain(cable.end_jack()) {
            if let Ok(jack) = self.jacks.lookup_mut(jack) {
                jack.unpatch();
            }
        }

        if self.patch_state.pending_cable() == Some(id) {
            self.patch_state = PatchState::Idle;
        }
        if self.interaction.dragged_cable() == Some(id) {
            self.interaction.reset();
        }
        info!(cable = %id, "Removed cable");
        Ok(id)
    }

    /// Move a cable by a logical offset. Stops its animations.
    pub fn move_cable(&mut self, id: CableId, movement: Vec2) -> PatchbayResult<()> {
        let cable = self
            .cables
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(PatchbayError::UnknownCable(id))?;
        cable.translate(movement);
        Ok(())
    }

    /// Step every cable animation once. Returns the cables whose path changed.
    pub fn animate_frame(&mut self) -> Vec<CableId> {
        crate::profile_scope!("animate_frame");
        self.frames.start_frame();
        let touched = self.animations.tick(&mut self.cables);
        self.frames.finish_frame(touched.len());
        touched
    }

    pub fn is_animating(&self) -> bool {
        !self.animations.is_idle()
    }

    // ------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------

    pub fn set_viewport(&mut self, viewport: Viewport) -> PatchbayResult<Viewport> {
        self.viewport.set_viewport(&mut self.surface, viewport)
    }

    pub fn zoom_in(&mut self, anchor: Option<Point>, factor: Option<f64>) -> PatchbayResult<Viewport> {
        self.viewport.zoom_in(&mut self.surface, anchor, factor)
    }

    pub fn zoom_out(&mut self, anchor: Option<Point>, factor: Option<f64>) -> PatchbayResult<Viewport> {
        self.viewport.zoom_out(&mut self.surface, anchor, factor)
    }

    pub fn pan(&mut self, movement: PanMovement) -> PatchbayResult<Viewport> {
        self.viewport.pan(&mut self.surface, movement)
    }

    pub fn pan_to(&mut self, point: Point) -> PatchbayResult<Viewport> {
        self.viewport.pan_to(&mut self.surface, point)
    }

    pub fn fit_rectangle(&mut self, rect: Rect) -> PatchbayResult<Viewport> {
        self.viewport.fit_rectangle(&mut self.surface, rect)
    }

    /// One press of a pan button.
    pub fn pan_button(&mut self, direction: PanDirection) -> PatchbayResult<Viewport> {
        self.pan(direction.movement(self.pan_step))
    }

    /// One press of a zoom button, around the surface center.
    pub fn zoom_button(&mut self, direction: ZoomDirection) -> PatchbayResult<Viewport> {
        self.viewport.zoom(&mut self.surface, direction, None, None)
    }

    /// Click on the overview at `offset` pixels from its top-left corner.
    pub fn overview_click(&mut self, offset: Vec2) -> PatchbayResult<Viewport> {
        let point = self.overview.borrow().logical_point(offset);
        self.pan_to(point)
    }
}

impl<S: DrawingSurface + std::fmt::Debug> std::fmt::Debug for Patchbay<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Patchbay")
            .field("surface", &self.surface)
            .field("jacks", &self.jacks)
            .field("cables", &self.cables.len())
            .field("patch_state", &self.patch_state)
            .field("interaction", &self.interaction)
            .finish()
    }
}
