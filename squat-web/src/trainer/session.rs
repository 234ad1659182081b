//! Squat session - one frame in, one report out
//!
//! Ties the angle calculator, visibility gate, rep state machine, milestone
//! emitter and particle effects together. A session is driven by a single
//! sequential loop; it is not meant to be shared.

use tracing::{debug, warn};

use super::angles::JointAngles;
use super::feedback::{ExercisePhase, FeedbackCode};
use super::milestone::{MilestoneEmitter, MilestoneEvent};
use super::pose::PoseFrame;
use super::rep_machine::{FrameFacts, RepStateMachine, Thresholds};
use super::visibility::VisibilityGate;
use crate::config::TrainerConfig;
use crate::effects::ParticleSystem;

/// Everything the display layer needs for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub phase: ExercisePhase,
    pub rep_count: u32,
    pub feedback: FeedbackCode,
    /// None when no usable body was found
    pub angles: Option<JointAngles>,
    /// Present only on the frame a milestone fires
    pub milestone: Option<MilestoneEvent>,
    /// Milestone message to show this frame (the latest one, while its countdown runs)
    pub milestone_message: Option<String>,
}

impl FrameReport {
    pub fn knee_angle(&self) -> f32 {
        self.angles.map_or(0.0, |a| a.knee)
    }

    pub fn back_angle(&self) -> f32 {
        self.angles.map_or(0.0, |a| a.back)
    }
}

pub struct SquatSession {
    config: TrainerConfig,
    gate: VisibilityGate,
    machine: RepStateMachine,
    milestones: MilestoneEmitter,
    particles: ParticleSystem,
    frames: u64,
}

impl SquatSession {
    pub fn new(config: TrainerConfig) -> Self {
        Self::with_particles(config, ParticleSystem::new())
    }

    pub fn with_particles(config: TrainerConfig, particles: ParticleSystem) -> Self {
        Self {
            gate: VisibilityGate::new(config.visibility_threshold),
            machine: RepStateMachine::new(Thresholds::from_config(&config)),
            milestones: MilestoneEmitter::new(
                config.milestone_interval,
                config.milestone_display_frames,
            ),
            particles,
            config,
            frames: 0,
        }
    }

    /// Process one frame. `None` means the pose provider found no body.
    pub fn process(&mut self, frame: Option<&PoseFrame>) -> FrameReport {
        self.frames += 1;
        self.particles.tick();

        let measured = frame.and_then(|frame| match JointAngles::measure(frame) {
            Ok(angles) => Some((angles, self.gate.is_visible(frame))),
            Err(err) => {
                warn!(frame = self.frames, error = %err, "rejecting frame");
                None
            }
        });

        let facts = measured.map(|(angles, visible)| FrameFacts {
            knee_angle: angles.knee,
            back_angle: angles.back,
            visible,
        });
        let transition = self.machine.step(facts.as_ref());
        if transition.feedback == FeedbackCode::NeedsVisibility {
            if let Some(joint) = frame.and_then(|frame| self.gate.first_occluded(frame)) {
                debug!(frame = self.frames, ?joint, "waiting on occluded joint");
            }
        }

        let milestone = if transition.rep_completed {
            self.milestones.on_rep(self.machine.rep_count())
        } else {
            None
        };
        if milestone.is_some() {
            self.particles
                .spawn(self.config.milestone_particles, self.config.frame_center());
        }

        let report = FrameReport {
            phase: transition.next,
            rep_count: self.machine.rep_count(),
            feedback: transition.feedback,
            angles: measured.map(|(angles, _)| angles),
            milestone,
            milestone_message: self.milestones.active().map(MilestoneEvent::message),
        };

        self.milestones.tick();
        report
    }

    pub fn phase(&self) -> ExercisePhase {
        self.machine.phase()
    }

    pub fn rep_count(&self) -> u32 {
        self.machine.rep_count()
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn milestone_active(&self) -> bool {
        self.milestones.is_active()
    }

    /// Frames processed so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Default for SquatSession {
    fn default() -> Self {
        Self::new(TrainerConfig::default())
    }
}
