//! Animation errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// The run cycle this work belonged to was cancelled
    #[error("animation cycle was cancelled")]
    Cancelled,

    #[error("animation '{name}' has zero length")]
    ZeroLength { name: String },

    #[error("animation '{name}' has a zero frame rate")]
    ZeroRate { name: String },

    #[error("owner is not registered with the scheduler")]
    UnknownOwner,
}

impl AnimationError {
    /// Cancellation is part of normal flow, not a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AnimationError::Cancelled)
    }
}
