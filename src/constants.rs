//! Interaction-wide constants.
//!
//! Centralizes timing windows, zoom/pan factors and cable physics values.
//! Every value here is also the default of the matching field in
//! [`Settings`](crate::settings::Settings).

// ============================================================================
// Gesture Timing
// ============================================================================

/// Window in which a second click turns into a double-click, in milliseconds
pub const DOUBLE_CLICK_MS: u64 = 300;

/// Delay after a press before movement counts as a drag, in milliseconds
pub const DRAG_CONFIRM_MS: u64 = 40;

/// Quiet period that closes a burst of wheel events, in milliseconds
pub const WHEEL_SETTLE_MS: u64 = 125;

/// A touch lifted before this many milliseconds is a tap; held longer it is a long press
pub const TAP_MS: u64 = 250;

/// Pointer travel (screen pixels) tolerated before a confirmed press becomes a drag
pub const DRAG_THRESHOLD: f64 = 0.0;

/// Cumulative touch travel (screen pixels) that cancels a pending tap
pub const TAP_SLOP: f64 = 10.0;

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Zoom factor for double-click, wheel and the zoom buttons
pub const ZOOM_FACTOR: f64 = 2.0;

/// Zoom factor applied per pinch/spread sample
pub const TOUCH_ZOOM_FACTOR: f64 = 1.1;

/// Smallest logical dimension `fit_rectangle` will frame
pub const FIT_MIN_DIMENSION: f64 = 500.0;

/// Margin multiplier `fit_rectangle` applies to the framed rectangle
pub const FIT_MARGIN: f64 = 1.3;

/// Percentage of the viewport moved by one press of a pan button
pub const PAN_STEP_PERCENT: f64 = 20.0;

/// Logical units per overview pixel
pub const OVERVIEW_SCALE: f64 = 20.0;

// ============================================================================
// Layout
// ============================================================================

/// Width of one jack column in logical units
pub const COLUMN_WIDTH: f64 = 50.0;

/// Height of one patch group row in logical units
pub const ROW_HEIGHT: f64 = 100.0;

/// Jack radius in logical units
pub const JACK_RADIUS: f64 = 20.0;

/// Fill of an unpatched jack
pub const UNPATCHED_JACK_COLOR: &str = "black";

// ============================================================================
// Cables
// ============================================================================

/// How far below its jack a dangling cable end settles
pub const CABLE_LENGTH: f64 = 300.0;

/// Color used when a cable is started without an explicit color
pub const DEFAULT_CABLE_COLOR: &str = "red";

/// Rendered cable stroke width; half of it is the body hit tolerance
pub const CABLE_STROKE_WIDTH: f64 = 20.0;

/// Velocity gained per drop step before the mass factor is applied
pub const DROP_ACCELERATION: f64 = 2.0;

/// Peak horizontal displacement of a swinging cable
pub const SWING_AMPLITUDE: f64 = 50.0;

/// Number of frames a swing runs before it settles
pub const SWING_FRAMES: u32 = 200;

/// Endpoints closer than this (horizontally) snap exactly onto target after a swing
pub const SWING_SNAP_DISTANCE: f64 = 5.0;

/// Damping of the swing of a freshly started cable's loose end
pub const START_SWING_MASS: f64 = 0.1;

/// Damping of the swing of a completed cable's belly
pub const END_SWING_MASS: f64 = 0.2;

/// Mass factor of every drop
pub const DROP_MASS: f64 = 1.0;

// ============================================================================
// Frame Budget
// ============================================================================

/// Target frame time for 60 FPS
pub const TARGET_FRAME_MS: f64 = 16.67;
