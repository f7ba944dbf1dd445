//! Animation scheduler
//!
//! Owns every committed animation and advances them each frame. Animations
//! are committed onto an owner under a name; committing a name that is
//! already running on the same owner replaces it, and any subset of names can
//! be aborted independently.

use crate::easing::Easing;
use crate::error::AnimationError;
use crate::timeline::Timeline;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct OwnerId;
    pub struct AnimationId;
}

/// Value callback, invoked with the sampled timeline value
pub type ValueCallback = Box<dyn FnMut(f32)>;

/// Finished callback, invoked with the last value and whether it was aborted
pub type FinishedCallback = Box<dyn FnOnce(f32, bool)>;

/// Timing parameters for a commit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CommitOptions {
    /// Minimum interval between value callbacks, in milliseconds
    pub rate_ms: u32,
    /// Length of one cycle, in milliseconds
    pub length_ms: u32,
    /// Easing applied to cycle progress before the timeline is sampled
    pub easing: Easing,
    /// Restart after each cycle until aborted
    pub repeat: bool,
}

impl Default for CommitOptions {
    fn default() -> Self {
        Self {
            rate_ms: 16,
            length_ms: 250,
            easing: Easing::Linear,
            repeat: false,
        }
    }
}

/// A timeline bound to its callbacks, ready to be committed
pub struct Animation {
    timeline: Timeline,
    on_value: ValueCallback,
    on_finished: Option<FinishedCallback>,
}

impl Animation {
    pub fn new<F>(timeline: Timeline, on_value: F) -> Self
    where
        F: FnMut(f32) + 'static,
    {
        Self {
            timeline,
            on_value: Box::new(on_value),
            on_finished: None,
        }
    }

    pub fn on_finished<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(f32, bool) + 'static,
    {
        self.on_finished = Some(Box::new(callback));
        self
    }

    /// Value the timeline produces at a raw cycle progress under `easing`
    pub fn value_at(&self, progress: f32, easing: Easing) -> f32 {
        self.timeline.sample(easing.apply(progress.clamp(0.0, 1.0)))
    }
}

struct ScheduledAnimation {
    owner: OwnerId,
    name: String,
    animation: Animation,
    options: CommitOptions,
    elapsed_ms: f32,
    since_frame_ms: f32,
    iteration: u32,
    last_value: f32,
}

impl ScheduledAnimation {
    fn emit(&mut self, progress: f32) {
        let value = self.animation.value_at(progress, self.options.easing);
        self.last_value = value;
        (self.animation.on_value)(value);
    }

    fn finish(self, aborted: bool) {
        if let Some(callback) = self.animation.on_finished {
            callback(self.last_value, aborted);
        }
    }
}

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler {
    owners: SlotMap<OwnerId, String>,
    animations: SlotMap<AnimationId, ScheduledAnimation>,
    by_name: FxHashMap<(OwnerId, String), AnimationId>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            owners: SlotMap::with_key(),
            animations: SlotMap::with_key(),
            by_name: FxHashMap::default(),
        }
    }

    /// Register a visual element that animations can be committed onto
    pub fn register_owner(&mut self, label: impl Into<String>) -> OwnerId {
        self.owners.insert(label.into())
    }

    /// Drop an owner, aborting everything still running on it
    pub fn unregister_owner(&mut self, owner: OwnerId) {
        self.abort_all(owner);
        self.owners.remove(owner);
    }

    pub fn owner_label(&self, owner: OwnerId) -> Option<&str> {
        self.owners.get(owner).map(String::as_str)
    }

    /// Start `animation` on `owner` under `name`.
    ///
    /// A running animation with the same owner and name is aborted first.
    pub fn commit(
        &mut self,
        owner: OwnerId,
        name: &str,
        animation: Animation,
        options: CommitOptions,
    ) -> Result<AnimationId, AnimationError> {
        if !self.owners.contains_key(owner) {
            return Err(AnimationError::UnknownOwner);
        }
        if options.length_ms == 0 {
            return Err(AnimationError::ZeroLength {
                name: name.to_string(),
            });
        }
        if options.rate_ms == 0 {
            return Err(AnimationError::ZeroRate {
                name: name.to_string(),
            });
        }

        self.abort(owner, name);

        let last_value = animation.value_at(0.0, options.easing);
        let id = self.animations.insert(ScheduledAnimation {
            owner,
            name: name.to_string(),
            animation,
            options,
            elapsed_ms: 0.0,
            since_frame_ms: 0.0,
            iteration: 0,
            last_value,
        });
        self.by_name.insert((owner, name.to_string()), id);

        tracing::debug!(
            owner = self.owners.get(owner).map(String::as_str).unwrap_or(""),
            name,
            length_ms = options.length_ms,
            repeat = options.repeat,
            "animation committed"
        );
        Ok(id)
    }

    /// Abort a named animation. Returns whether one was running.
    pub fn abort(&mut self, owner: OwnerId, name: &str) -> bool {
        let Some(id) = self.by_name.remove(&(owner, name.to_string())) else {
            return false;
        };
        let Some(scheduled) = self.animations.remove(id) else {
            return false;
        };
        tracing::debug!(name, iteration = scheduled.iteration, "animation aborted");
        scheduled.finish(true);
        true
    }

    /// Abort every animation on an owner. Returns how many were running.
    pub fn abort_all(&mut self, owner: OwnerId) -> usize {
        let names = self.running_names(owner);
        names.iter().filter(|name| self.abort(owner, name)).count()
    }

    pub fn is_running(&self, owner: OwnerId, name: &str) -> bool {
        self.by_name.contains_key(&(owner, name.to_string()))
    }

    /// Names running on an owner, sorted
    pub fn running_names(&self, owner: OwnerId) -> SmallVec<[String; 4]> {
        let mut names: SmallVec<[String; 4]> = self
            .animations
            .values()
            .filter(|a| a.owner == owner)
            .map(|a| a.name.clone())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn running_count(&self, owner: OwnerId) -> usize {
        self.animations.values().filter(|a| a.owner == owner).count()
    }

    /// Completed cycles of a named animation
    pub fn iteration(&self, owner: OwnerId, name: &str) -> Option<u32> {
        let id = self.by_name.get(&(owner, name.to_string()))?;
        self.animations.get(*id).map(|a| a.iteration)
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Advance every animation by `dt_ms`.
    ///
    /// Value callbacks fire once `rate_ms` has accumulated since the previous
    /// one, and always on the frame that closes a cycle. Repeating animations
    /// wrap into the next cycle; one-shot animations complete and are removed.
    pub fn tick(&mut self, dt_ms: f32) {
        if dt_ms <= 0.0 {
            return;
        }

        let mut completed: SmallVec<[AnimationId; 4]> = SmallVec::new();

        for (id, scheduled) in self.animations.iter_mut() {
            let length = scheduled.options.length_ms as f32;
            scheduled.elapsed_ms += dt_ms;
            scheduled.since_frame_ms += dt_ms;

            let cycle_closed = scheduled.elapsed_ms >= length;
            if cycle_closed || scheduled.since_frame_ms >= scheduled.options.rate_ms as f32 {
                scheduled.since_frame_ms = 0.0;
                let progress = if cycle_closed {
                    1.0
                } else {
                    scheduled.elapsed_ms / length
                };
                scheduled.emit(progress);
            }

            if cycle_closed {
                if scheduled.options.repeat {
                    let wrapped = (scheduled.elapsed_ms / length).floor();
                    scheduled.iteration = scheduled
                        .iteration
                        .saturating_add(wrapped.min(u32::MAX as f32) as u32);
                    scheduled.elapsed_ms -= wrapped * length;
                } else {
                    completed.push(id);
                }
            }
        }

        for id in completed {
            if let Some(scheduled) = self.animations.remove(id) {
                self.by_name
                    .remove(&(scheduled.owner, scheduled.name.clone()));
                tracing::debug!(name = %scheduled.name, "animation completed");
                scheduled.finish(false);
            }
        }
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
