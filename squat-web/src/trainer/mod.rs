//! Trainer module - squat rep detection and form feedback
//!
//! Re-exports only. All logic in submodules.

mod angles;
mod feedback;
mod milestone;
mod pose;
mod rep_machine;
mod session;
mod visibility;

#[cfg(test)]
mod test_support;

pub use angles::{bilateral_mean, calculate_angle, checked_angle, JointAngles};
pub use feedback::{ExercisePhase, FeedbackCode};
pub use milestone::{MilestoneEmitter, MilestoneEvent};
pub use pose::{Joint, JointSample, PoseFrame, POSE_LANDMARK_COUNT};
pub use rep_machine::{transition, FrameFacts, RepStateMachine, Thresholds, Transition};
pub use session::{FrameReport, SquatSession};
pub use visibility::VisibilityGate;
