//! Timeline composition for a single animated value
//!
//! A timeline is a list of segments, each covering a normalized sub-range
//! `[begin, end]` of one cycle and tweening between two values with its own
//! easing. Sampling at a cycle progress returns the value of the segment that
//! covers it.

use crate::easing::Easing;
use smallvec::SmallVec;

/// One eased tween over part of a cycle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Start of the segment (0.0 to 1.0)
    pub begin: f32,
    /// End of the segment (0.0 to 1.0)
    pub end: f32,
    pub from: f32,
    pub to: f32,
    pub easing: Easing,
}

impl Segment {
    fn value_at(&self, progress: f32) -> f32 {
        let span = self.end - self.begin;
        let local = if span <= f32::EPSILON {
            1.0
        } else {
            ((progress - self.begin) / span).clamp(0.0, 1.0)
        };
        let eased = self.easing.apply(local);
        self.from + (self.to - self.from) * eased
    }
}

/// Ordered set of segments driving one value
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    segments: SmallVec<[Segment; 4]>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single tween over the whole cycle
    pub fn tween(from: f32, to: f32, easing: Easing) -> Self {
        Self::new().segment(0.0, 1.0, from, to, easing)
    }

    /// Add a segment. Segments are kept sorted by `begin`.
    pub fn segment(mut self, begin: f32, end: f32, from: f32, to: f32, easing: Easing) -> Self {
        let begin = begin.clamp(0.0, 1.0);
        let end = end.clamp(begin, 1.0);
        let at = self.segments.partition_point(|s| s.begin <= begin);
        self.segments.insert(
            at,
            Segment {
                begin,
                end,
                from,
                to,
                easing,
            },
        );
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Value at a cycle progress (0.0 to 1.0).
    ///
    /// On a shared boundary the later segment wins. Before the first segment
    /// the first `from` holds; after the last the last `to` holds.
    pub fn sample(&self, progress: f32) -> f32 {
        let Some(first) = self.segments.first() else {
            return 0.0;
        };

        let progress = progress.clamp(0.0, 1.0);
        if progress < first.begin {
            return first.from;
        }

        let idx = self.segments.partition_point(|s| s.begin <= progress);
        // idx >= 1 because first.begin <= progress
        self.segments[idx - 1].value_at(progress)
    }
}
