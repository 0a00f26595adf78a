//! Kinetic cable animation, stepped once per rendered frame.
//!
//! Each [`AnimationTask`] owns its progress and moves one coordinate of one
//! cable. Tasks are guarded by a dangling flag on the cable: clearing the flag
//! (manual move, completion, removal) ends every task it guards on the next
//! step without touching the cable.

use super::{Cable, CableId, CableProperty, Dangling};
use crate::constants::{
    CABLE_LENGTH, DROP_ACCELERATION, DROP_MASS, END_SWING_MASS, START_SWING_MASS,
    SWING_AMPLITUDE, SWING_FRAMES, SWING_SNAP_DISTANCE,
};
use std::f64::consts::{E, TAU};
use tracing::trace;

/// Physical constants for the cable simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CablePhysics {
    /// Rest length used to place the control point and drop targets
    pub length: f64,
    pub drop_acceleration: f64,
    pub drop_mass: f64,
    pub swing_amplitude: f64,
    pub swing_frames: u32,
    /// Horizontal endpoint distance under which a finished swing snaps to its target
    pub swing_snap_distance: f64,
    pub start_swing_mass: f64,
    pub end_swing_mass: f64,
}

impl Default for CablePhysics {
    fn default() -> Self {
        Self {
            length: CABLE_LENGTH,
            drop_acceleration: DROP_ACCELERATION,
            drop_mass: DROP_MASS,
            swing_amplitude: SWING_AMPLITUDE,
            swing_frames: SWING_FRAMES,
            swing_snap_distance: SWING_SNAP_DISTANCE,
            start_swing_mass: START_SWING_MASS,
            end_swing_mass: END_SWING_MASS,
        }
    }
}

/// Outcome of a single animation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
enum Motion {
    Drop {
        velocity: f64,
        acceleration: f64,
    },
    Swing {
        frame: u32,
        frames: u32,
        amplitude: f64,
        mass: f64,
        snap_distance: f64,
    },
}

/// One running animation of one cable coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTask {
    cable: CableId,
    property: CableProperty,
    guard: Dangling,
    target: f64,
    motion: Motion,
}

impl AnimationTask {
    /// Accelerate toward `target` and clamp on arrival.
    pub fn drop(
        cable: CableId,
        property: CableProperty,
        guard: Dangling,
        target: f64,
        acceleration: f64,
        mass: f64,
    ) -> Self {
        Self {
            cable,
            property,
            guard,
            target,
            motion: Motion::Drop {
                velocity: 0.0,
                acceleration: acceleration * mass,
            },
        }
    }

    /// Damped oscillation around `target` for `frames` steps.
    #[allow(clippy::too_many_arguments)]
    pub fn swing(
        cable: CableId,
        property: CableProperty,
        guard: Dangling,
        target: f64,
        amplitude: f64,
        mass: f64,
        frames: u32,
        snap_distance: f64,
    ) -> Self {
        Self {
            cable,
            property,
            guard,
            target,
            motion: Motion::Swing {
                frame: 0,
                frames,
                amplitude,
                mass,
                snap_distance,
            },
        }
    }

    pub fn cable(&self) -> CableId {
        self.cable
    }

    pub fn property(&self) -> CableProperty {
        self.property
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_swing(&self) -> bool {
        matches!(self.motion, Motion::Swing { .. })
    }

    /// Applied once when the task starts. A swing opens with a jolt.
    fn begin(&self, cable: &mut Cable) {
        if let Motion::Swing { amplitude, .. } = self.motion {
            let value = cable.get(self.property);
            cable.set(self.property, value - amplitude * E);
        }
    }

    /// Advance one frame.
    pub fn step(&mut self, cable: &mut Cable) -> Step {
        if !cable.is_dangling(self.guard) {
            return Step::Done;
        }

        match &mut self.motion {
            Motion::Drop {
                velocity,
                acceleration,
            } => {
                if *acceleration <= 0.0 {
                    cable.set(self.property, self.target);
                    return Step::Done;
                }
                *velocity += *acceleration;
                let value = cable.get(self.property) + *velocity;
                if value < self.target {
                    cable.set(self.property, value);
                    Step::Continue
                } else {
                    cable.set(self.property, self.target);
                    Step::Done
                }
            }
            Motion::Swing {
                frame,
                frames,
                amplitude,
                mass,
                snap_distance,
            } => {
                let t = f64::from(*frame) / TAU;
                let value = self.target + *amplitude * t.sin() * (-t * *mass).exp();
                cable.set(self.property, value);
                *frame += 1;
                if *frame < *frames {
                    return Step::Continue;
                }
                if (cable.start().x - cable.end().x).abs() < *snap_distance {
                    cable.set(self.property, self.target);
                }
                Step::Done
            }
        }
    }
}

/// Runs every active [`AnimationTask`], one step per frame.
#[derive(Debug, Clone, Default)]
pub struct AnimationScheduler {
    tasks: Vec<AnimationTask>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `task` on `cable`, replacing any task already animating the same
    /// coordinate of the same kind.
    pub fn start(&mut self, cable: &mut Cable, task: AnimationTask) {
        self.tasks.retain(|t| {
            !(t.cable == task.cable && t.property == task.property && t.is_swing() == task.is_swing())
        });
        cable.set_dangling(task.guard, true);
        task.begin(cable);
        self.tasks.push(task);
    }

    /// A new half-connected cable: the loose end swings under its jack and falls.
    pub fn animate_begin(&mut self, cable: &mut Cable, physics: &CablePhysics) {
        let id = cable.id();
        let start = cable.start();
        self.start(
            cable,
            AnimationTask::swing(
                id,
                CableProperty::EndX,
                Dangling::Start,
                start.x,
                physics.swing_amplitude,
                physics.start_swing_mass,
                physics.swing_frames,
                physics.swing_snap_distance,
            ),
        );
        self.start(
            cable,
            AnimationTask::drop(
                id,
                CableProperty::EndY,
                Dangling::Start,
                start.y + physics.length,
                physics.drop_acceleration,
                physics.drop_mass,
            ),
        );
    }

    /// A completed cable: the belly swings to the midpoint and sags.
    pub fn animate_complete(&mut self, cable: &mut Cable, physics: &CablePhysics) {
        let id = cable.id();
        let (start, end) = (cable.start(), cable.end());
        self.start(
            cable,
            AnimationTask::swing(
                id,
                CableProperty::ControlX,
                Dangling::End,
                (start.x + end.x) / 2.0,
                physics.swing_amplitude,
                physics.end_swing_mass,
                physics.swing_frames,
                physics.swing_snap_distance,
            ),
        );
        self.start(
            cable,
            AnimationTask::drop(
                id,
                CableProperty::ControlY,
                Dangling::End,
                start.y.max(end.y) + physics.length,
                physics.drop_acceleration,
                physics.drop_mass,
            ),
        );
    }

    /// Step every task once. Returns the cables that were touched this frame.
    pub fn tick(&mut self, cables: &mut [Cable]) -> Vec<CableId> {
        let mut touched = Vec::new();
        self.tasks.retain_mut(|task| {
            let Some(cable) = cables.iter_mut().find(|c| c.id() == task.cable) else {
                trace!(cable = %task.cable, "animation target removed");
                return false;
            };
            let before = cable.get(task.property);
            let step = task.step(cable);
            if cable.get(task.property) != before && !touched.contains(&task.cable) {
                touched.push(task.cable);
            }
            step == Step::Continue
        });
        touched
    }

    /// Drop every task belonging to `cable`.
    pub fn cancel_cable(&mut self, cable: CableId) {
        self.tasks.retain(|t| t.cable != cable);
    }

    pub fn active(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[AnimationTask] {
        &self.tasks
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}
