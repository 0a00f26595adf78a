//! Cable animation frame timing.
//!
//! [`FrameMonitor`] watches the per-frame animation step and logs frames
//! that blow the budget. Hot paths (gesture dispatch, hit testing) are wrapped
//! in [`profile_scope!`](crate::profile_scope), which only costs anything
//! when the crate is built with `--features profiling`.

use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::warn;

pub use crate::constants::TARGET_FRAME_MS;

/// Frames kept for the rolling mean and worst frame.
const WINDOW: usize = 60;

/// A frame is over budget past this multiple of the target.
const OVER_BUDGET_FACTOR: u32 = 2;

/// Log the enclosing scope when it runs longer than a limit. Compiled out
/// without the `profiling` feature.
///
/// ```ignore
/// fn cable_at(&self, p: Point) -> Option<CableId> {
///     profile_scope!("cable_hit_test");
///     // ...
/// }
/// ```
#[macro_export]
macro_rules! profile_scope {
    ($label:expr) => {
        #[cfg(feature = "profiling")]
        let _scope = $crate::perf::SlowScope::new($label, 1.0);
        #[cfg(not(feature = "profiling"))]
        let _ = $label;
    };
    ($label:expr, $limit_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _scope = $crate::perf::SlowScope::new($label, $limit_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($label, $limit_ms);
    };
}

pub use profile_scope;

/// Summary of recent animation frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    /// Frames recorded since creation or the last reset
    pub frames: u64,
    pub over_budget: u64,
    /// Mean over the rolling window
    pub mean_ms: f64,
    /// Slowest frame in the rolling window
    pub worst_ms: f64,
    /// Most cables moved by a single frame
    pub busiest_frame: usize,
}

impl FrameReport {
    /// Frames per second the mean frame time would allow, 0 with no data.
    pub fn fps(&self) -> f64 {
        if self.mean_ms > 0.0 { 1000.0 / self.mean_ms } else { 0.0 }
    }
}

/// Rolling timing of the cable animation loop.
#[derive(Debug, Clone)]
pub struct FrameMonitor {
    window: VecDeque<Duration>,
    open: Option<Instant>,
    budget: Duration,
    frames: u64,
    over_budget: u64,
    busiest_frame: usize,
}

impl Default for FrameMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameMonitor {
    pub fn new() -> Self {
        Self::with_budget(Duration::from_secs_f64(TARGET_FRAME_MS / 1000.0))
    }

    pub fn with_budget(budget: Duration) -> Self {
        Self {
            window: VecDeque::with_capacity(WINDOW),
            open: None,
            budget,
            frames: 0,
            over_budget: 0,
            busiest_frame: 0,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn start_frame(&mut self) {
        self.open = Some(Instant::now());
    }

    /// Close the frame opened by [`start_frame`](Self::start_frame).
    /// `None` when no frame was open.
    pub fn finish_frame(&mut self, cables_moved: usize) -> Option<Duration> {
        let elapsed = self.open.take()?.elapsed();
        self.record(elapsed, cables_moved);
        Some(elapsed)
    }

    /// Record a frame timed by the caller.
    pub fn record(&mut self, frame: Duration, cables_moved: usize) {
        if self.window.len() == WINDOW {
            self.window.pop_front();
        }
        self.window.push_back(frame);
        self.frames += 1;
        self.busiest_frame = self.busiest_frame.max(cables_moved);

        if frame > self.budget * OVER_BUDGET_FACTOR {
            self.over_budget += 1;
            warn!(
                frame_ms = format!("{:.2}", as_ms(frame)),
                budget_ms = format!("{:.2}", as_ms(self.budget)),
                cables_moved,
                "Animation frame over budget"
            );
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames currently in the rolling window.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn report(&self) -> FrameReport {
        let mean_ms = if self.window.is_empty() {
            0.0
        } else {
            self.window.iter().map(|d| as_ms(*d)).sum::<f64>() / self.window.len() as f64
        };
        FrameReport {
            frames: self.frames,
            over_budget: self.over_budget,
            mean_ms,
            worst_ms: self.window.iter().max().map_or(0.0, |d| as_ms(*d)),
            busiest_frame: self.busiest_frame,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::with_budget(self.budget);
    }
}

/// Guard that logs its scope on drop when it ran past `limit_ms`.
#[derive(Debug)]
pub struct SlowScope {
    label: &'static str,
    started: Instant,
    limit_ms: f64,
}

impl SlowScope {
    pub fn new(label: &'static str, limit_ms: f64) -> Self {
        Self {
            label,
            started: Instant::now(),
            limit_ms,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn elapsed_ms(&self) -> f64 {
        as_ms(self.started.elapsed())
    }
}

impl Drop for SlowScope {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms > self.limit_ms {
            warn!(
                scope = self.label,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                "Slow scope"
            );
        }
    }
}

#[inline]
fn as_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
