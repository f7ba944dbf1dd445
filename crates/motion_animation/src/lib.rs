//! Motion Playground Animation System
//!
//! Frame-ticked tweening in the style of a host UI framework: timelines of
//! eased segments are committed onto an owner under a name, loop or run once,
//! and can be aborted by name.
//!
//! # Features
//!
//! - **Easing**: The curves used by the playground presets
//! - **Timelines**: Segments over normalized sub-ranges of a cycle
//! - **Scheduler**: Named animations per owner with commit/abort/repeat
//! - **Cancellation**: One token source per run cycle
//! - **Presets**: The fixed pulse/rotate/slide/fade/bounce table

pub mod cancel;
pub mod easing;
pub mod error;
pub mod presets;
pub mod scheduler;
pub mod timeline;

pub use cancel::{CancellationToken, CancellationTokenSource};
pub use easing::Easing;
pub use error::AnimationError;
pub use presets::{cycle_duration_ms, AnimatedProperty, PresetKind, MIN_SPEED_MULTIPLIER};
pub use scheduler::{Animation, AnimationId, AnimationScheduler, CommitOptions, OwnerId};
pub use timeline::{Segment, Timeline};
