//! Error types for patchbay operations
//!
//! Gesture classification never fails; these errors come from viewport
//! mutations, controller lookups and settings I/O.

use crate::cable::CableId;
use crate::patchbay::JackId;
use crate::viewport::Viewport;
use thiserror::Error;

/// Errors that can occur while driving the patchbay
#[derive(Error, Debug)]
pub enum PatchbayError {
    /// Malformed pan amount or zoom factor
    #[error("illegal command: {0}")]
    Configuration(String),

    /// Touch identifier that is not being tracked
    #[error("unknown touch identifier: {0}")]
    UnknownTouch(i64),

    /// Cable id that does not exist
    #[error("unknown cable: {0}")]
    UnknownCable(CableId),

    /// Jack id that does not exist
    #[error("unknown jack: {0}")]
    UnknownJack(JackId),

    /// Jack that has no cable attached
    #[error("no cable on {0}")]
    Unpatched(JackId),

    /// A viewport with non-positive or non-finite size
    #[error("rejected viewport {0}: width and height must be positive")]
    InvariantViolation(Viewport),

    /// The surface has no screen bounds yet
    #[error("surface is not attached")]
    Detached,

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error from serde_json
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File watcher error from notify
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),
}

/// Result type alias for patchbay operations
pub type PatchbayResult<T> = Result<T, PatchbayError>;

impl PatchbayError {
    /// Lookup failures are recoverable; callers usually log and carry on.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Self::UnknownTouch(_)
                | Self::UnknownCable(_)
                | Self::UnknownJack(_)
                | Self::Unpatched(_)
        )
    }
}
