//! Patchbay: interaction core for zoomable patch diagrams.
//!
//! Raw pointer and touch input is classified into gestures, gestures drive
//! an SVG-style viewport and patch cables between jacks, and loose cable
//! ends are animated with a small swing/drop simulation. Rendering is left
//! to the host, which supplies a [`surface::DrawingSurface`].

pub mod cable;
pub mod constants;
pub mod error;
pub mod input;
pub mod layout;
pub mod overview;
pub mod patchbay;
pub mod perf;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod surface;
pub mod timer;
pub mod viewport;

pub use error::{PatchbayError, PatchbayResult};
pub use patchbay::Patchbay;
