//! Visibility gate
//!
//! A frame is trusted only when every required joint is confidently seen.
//! No partial credit: one low-confidence joint fails the whole frame.
//!
//! The rep state machine consults this gate only while awaiting visibility.
//! Once a rep cycle has started, a momentary tracking glitch must not stall
//! the count, so mid-rep frames are never re-gated.

use super::pose::{Joint, PoseFrame};
use crate::config::VISIBILITY_THRESHOLD;

#[derive(Clone, Copy, Debug)]
pub struct VisibilityGate {
    /// Visibility must be strictly above this
    threshold: f32,
}

impl VisibilityGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// True iff every confidence is strictly above the threshold
    pub fn all_visible(&self, confidences: impl IntoIterator<Item = f32>) -> bool {
        confidences.into_iter().all(|c| c > self.threshold)
    }

    /// True iff all 8 required joints of the frame pass
    pub fn is_visible(&self, frame: &PoseFrame) -> bool {
        self.all_visible(frame.visibilities().map(|(_, v)| v))
    }

    /// First required joint that fails the gate, for diagnostics
    pub fn first_occluded(&self, frame: &PoseFrame) -> Option<Joint> {
        frame
            .visibilities()
            .find(|&(_, v)| v <= self.threshold)
            .map(|(joint, _)| joint)
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new(VISIBILITY_THRESHOLD)
    }
}
