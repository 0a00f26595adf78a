//! User settings, stored as JSON under the platform config directory.
//!
//! Every field has a default, so partial files are fine. A missing file
//! yields the defaults; a malformed one is logged and also yields the
//! defaults.

use crate::cable::CablePhysics;
use crate::constants::*;
use crate::error::PatchbayResult;
use crate::input::{PointerTiming, TouchTiming};
use crate::settings_watcher::default_settings_path;
use crate::timer::millis;
use crate::viewport::{PanAmount, ViewportOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub timing: TimingSettings,
    pub view: ViewSettings,
    pub touch: TouchSettings,
    pub cables: CableSettings,
}

/// Pointer gesture windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub double_click_ms: u64,
    pub drag_confirm_ms: u64,
    pub wheel_settle_ms: u64,
    pub drag_threshold: f64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            double_click_ms: DOUBLE_CLICK_MS,
            drag_confirm_ms: DRAG_CONFIRM_MS,
            wheel_settle_ms: WHEEL_SETTLE_MS,
            drag_threshold: DRAG_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub zoom_factor: f64,
    pub fit_min_dimension: f64,
    pub fit_margin: f64,
    /// Pan button step, a number of pixels or a percentage like `"20%"`
    pub pan_step: String,
    pub overview_scale: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            zoom_factor: ZOOM_FACTOR,
            fit_min_dimension: FIT_MIN_DIMENSION,
            fit_margin: FIT_MARGIN,
            pan_step: format!("{PAN_STEP_PERCENT}%"),
            overview_scale: OVERVIEW_SCALE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchSettings {
    pub tap_ms: u64,
    pub tap_slop: f64,
    /// Zoom factor per pinch/spread sample
    pub zoom_factor: f64,
}

impl Default for TouchSettings {
    fn default() -> Self {
        Self {
            tap_ms: TAP_MS,
            tap_slop: TAP_SLOP,
            zoom_factor: TOUCH_ZOOM_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CableSettings {
    pub default_color: String,
    pub length: f64,
    pub stroke_width: f64,
    pub drop_acceleration: f64,
    pub drop_mass: f64,
    pub swing_amplitude: f64,
    pub swing_frames: u32,
    pub swing_snap_distance: f64,
    pub start_swing_mass: f64,
    pub end_swing_mass: f64,
}

impl Default for CableSettings {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_CABLE_COLOR.to_string(),
            length: CABLE_LENGTH,
            stroke_width: CABLE_STROKE_WIDTH,
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

impl Settings {
    /// Load from the default location.
    pub fn load() -> Self {
        match default_settings_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No config directory, using default settings");
                Self::default()
            }
        }
    }

    /// Load from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(settings) => settings,
            Err(crate::error::PatchbayError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("Failed to load settings from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from `path`, reporting every failure.
    pub fn try_load_from(path: &Path) -> PatchbayResult<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save to the default location.
    pub fn save(&self) -> PatchbayResult<()> {
        match default_settings_path() {
            Some(path) => self.save_to(&path),
            None => Err(std::io::Error::new(ErrorKind::NotFound, "no config directory").into()),
        }
    }

    /// Write pretty JSON to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> PatchbayResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn pointer_timing(&self) -> PointerTiming {
        PointerTiming {
            double_click: millis(self.timing.double_click_ms),
            drag_confirm: millis(self.timing.drag_confirm_ms),
            wheel_settle: millis(self.timing.wheel_settle_ms),
            drag_threshold: self.timing.drag_threshold,
        }
    }

    pub fn touch_timing(&self) -> TouchTiming {
        TouchTiming {
            tap: millis(self.touch.tap_ms),
            tap_slop: self.touch.tap_slop,
        }
    }

    pub fn viewport_options(&self) -> ViewportOptions {
        ViewportOptions {
            zoom_factor: self.view.zoom_factor,
            fit_min_dimension: self.view.fit_min_dimension,
            fit_margin: self.view.fit_margin,
        }
    }

    pub fn cable_physics(&self) -> CablePhysics {
        let c = &self.cables;
        CablePhysics {
            length: c.length,
            drop_acceleration: c.drop_acceleration,
            drop_mass: c.drop_mass,
            swing_amplitude: c.swing_amplitude,
            swing_frames: c.swing_frames,
            swing_snap_distance: c.swing_snap_distance,
            start_swing_mass: c.start_swing_mass,
            end_swing_mass: c.end_swing_mass,
        }
    }

    /// Parsed pan button step.
    pub fn pan_step(&self) -> PatchbayResult<PanAmount> {
        self.view.pan_step.parse()
    }
}
