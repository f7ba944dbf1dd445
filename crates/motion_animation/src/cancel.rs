//! Cancellation tokens for animation run cycles
//!
//! A [`CancellationTokenSource`] is created per run cycle; tokens handed out
//! from it observe a single shared flag.

use crate::error::AnimationError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Owner side of a cancellation flag
#[derive(Debug, Default)]
pub struct CancellationTokenSource {
    flag: Arc<AtomicBool>,
}

impl CancellationTokenSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out an observer of this source
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            flag: self.flag.clone(),
        }
    }

    /// Idempotent
    pub fn cancel(&self) {
        if !self.flag.swap(true, Ordering::AcqRel) {
            tracing::debug!("cancellation requested");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Observer side of a cancellation flag
#[derive(Clone, Debug)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A token that is never cancelled
    pub fn none() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Returns `Err(AnimationError::Cancelled)` once the source is cancelled
    pub fn check(&self) -> Result<(), AnimationError> {
        if self.is_cancelled() {
            Err(AnimationError::Cancelled)
        } else {
            Ok(())
        }
    }
}
