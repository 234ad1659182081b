//! Rep state machine
//!
//! Converts per-frame angle and visibility facts into an exercise phase, a
//! feedback code and a rep count.
//!
//! ```text
//! AwaitingVisibility ──visible & knee>160──▶ Standing ──knee<140──▶ Descending
//!          ▲                                    ▲                       │
//!          └──────── no landmarks (any) ────────┴──── knee>160 (+1) ────┘
//! ```
//!
//! The gap between the standing (160°) and descend (140°) thresholds is the
//! hysteresis band: knee jitter around either boundary cannot bounce the
//! machine between Standing and Descending.

use tracing::{debug, info};

use super::feedback::{ExercisePhase, FeedbackCode};
use crate::config::TrainerConfig;

/// What one frame tells the state machine
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameFacts {
    pub knee_angle: f32,
    pub back_angle: f32,
    /// Visibility gate verdict (read only while awaiting visibility)
    pub visible: bool,
}

/// Angle thresholds in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub standing_knee: f32,
    pub descend_knee: f32,
    pub full_squat_knee: f32,
    pub straight_back: f32,
}

impl Thresholds {
    pub fn from_config(config: &TrainerConfig) -> Self {
        Self {
            standing_knee: config.standing_knee_angle,
            descend_knee: config.descend_knee_angle,
            full_squat_knee: config.full_squat_knee_angle,
            straight_back: config.straight_back_angle,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::from_config(&TrainerConfig::default())
    }
}

/// Result of one transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: ExercisePhase,
    pub feedback: FeedbackCode,
    /// Set only on Descending → Standing
    pub rep_completed: bool,
}

impl Transition {
    fn to(next: ExercisePhase, feedback: FeedbackCode) -> Self {
        Self {
            next,
            feedback,
            rep_completed: false,
        }
    }
}

/// The transition function. Total over every input; `None` means no body
/// was detected this frame.
pub fn transition(
    phase: ExercisePhase,
    facts: Option<&FrameFacts>,
    thresholds: &Thresholds,
) -> Transition {
    use ExercisePhase::*;

    let facts = match facts {
        Some(facts) => facts,
        None => return Transition::to(AwaitingVisibility, FeedbackCode::NoBodyDetected),
    };
    let knee = facts.knee_angle;

    match phase {
        AwaitingVisibility => {
            if facts.visible && knee > thresholds.standing_knee {
                Transition::to(Standing, FeedbackCode::StandStraight)
            } else {
                Transition::to(AwaitingVisibility, FeedbackCode::NeedsVisibility)
            }
        }
        Standing => {
            if knee < thresholds.descend_knee {
                Transition::to(Descending, FeedbackCode::GoLower)
            } else if facts.back_angle > thresholds.straight_back {
                Transition::to(Standing, FeedbackCode::StandStraight)
            } else {
                Transition::to(Standing, FeedbackCode::StraightenBack)
            }
        }
        Descending => {
            if knee > thresholds.standing_knee {
                Transition {
                    next: Standing,
                    feedback: FeedbackCode::RepCounted,
                    rep_completed: true,
                }
            } else if knee < thresholds.full_squat_knee {
                Transition::to(Descending, FeedbackCode::FullSquat)
            } else {
                Transition::to(Descending, FeedbackCode::GoLower)
            }
        }
    }
}

/// Owns the phase and rep counter of one session
#[derive(Debug)]
pub struct RepStateMachine {
    phase: ExercisePhase,
    reps: u32,
    thresholds: Thresholds,
}

impl RepStateMachine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            phase: ExercisePhase::AwaitingVisibility,
            reps: 0,
            thresholds,
        }
    }

    pub fn phase(&self) -> ExercisePhase {
        self.phase
    }

    pub fn rep_count(&self) -> u32 {
        self.reps
    }

    /// Advance one frame
    pub fn step(&mut self, facts: Option<&FrameFacts>) -> Transition {
        let result = transition(self.phase, facts, &self.thresholds);

        if result.next != self.phase {
            debug!(from = ?self.phase, to = ?result.next, feedback = ?result.feedback, "phase transition");
        }
        if result.rep_completed {
            self.reps += 1;
            info!(reps = self.reps, "rep counted");
        }

        self.phase = result.next;
        result
    }
}

impl Default for RepStateMachine {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn facts(knee: f32, back: f32, visible: bool) -> FrameFacts {
        FrameFacts {
            knee_angle: knee,
            back_angle: back,
            visible,
        }
    }

    fn check(phase: ExercisePhase, knee: f32, back: f32, visible: bool) -> (ExercisePhase, FeedbackCode) {
        let t = transition(phase, Some(&facts(knee, back, visible)), &Thresholds::default());
        (t.next, t.feedback)
    }

    #[test]
    fn test_transition_table() {
        use ExercisePhase::*;
        use FeedbackCode::*;

        assert_eq!(check(AwaitingVisibility, 170.0, 170.0, true), (Standing, StandStraight));
        assert_eq!(check(AwaitingVisibility, 170.0, 170.0, false), (AwaitingVisibility, NeedsVisibility));
        assert_eq!(check(AwaitingVisibility, 150.0, 170.0, true), (AwaitingVisibility, NeedsVisibility));
        assert_eq!(check(AwaitingVisibility, 160.0, 170.0, true), (AwaitingVisibility, NeedsVisibility));

        assert_eq!(check(Standing, 130.0, 170.0, true), (Descending, GoLower));
        assert_eq!(check(Standing, 140.0, 170.0, true), (Standing, StandStraight));
        assert_eq!(check(Standing, 150.0, 160.0, true), (Standing, StraightenBack));
        assert_eq!(check(Standing, 170.0, 120.0, false), (Standing, StraightenBack));

        assert_eq!(check(Descending, 170.0, 170.0, false), (Standing, RepCounted));
        assert_eq!(check(Descending, 160.0, 170.0, true), (Descending, GoLower));
        assert_eq!(check(Descending, 90.0, 170.0, true), (Descending, GoLower));
        assert_eq!(check(Descending, 80.0, 170.0, true), (Descending, FullSquat));
    }

    #[test]
    fn test_absent_landmarks_reset_every_phase() {
        for phase in ExercisePhase::ALL {
            let t = transition(phase, None, &Thresholds::default());
            assert_eq!(t.next, ExercisePhase::AwaitingVisibility);
            assert_eq!(t.feedback, FeedbackCode::NoBodyDetected);
            assert!(!t.rep_completed);
        }
    }

    #[test]
    fn test_rep_completes_only_from_descending() {
        let mut machine = RepStateMachine::default();
        machine.step(Some(&facts(170.0, 170.0, true)));
        machine.step(Some(&facts(175.0, 170.0, true)));
        assert_eq!(machine.rep_count(), 0);

        machine.step(Some(&facts(130.0, 170.0, true)));
        machine.step(Some(&facts(80.0, 170.0, true)));
        let t = machine.step(Some(&facts(170.0, 170.0, true)));
        assert!(t.rep_completed);
        assert_eq!(machine.rep_count(), 1);
        assert_eq!(machine.phase(), ExercisePhase::Standing);
    }

    #[test]
    fn test_no_body_keeps_count() {
        let mut machine = RepStateMachine::default();
        for knee in [170.0, 130.0, 170.0, 130.0] {
            machine.step(Some(&facts(knee, 170.0, true)));
        }
        assert_eq!(machine.phase(), ExercisePhase::Descending);

        let t = machine.step(None);
        assert_eq!(t.feedback, FeedbackCode::NoBodyDetected);
        assert_eq!(machine.phase(), ExercisePhase::AwaitingVisibility);
        assert_eq!(machine.rep_count(), 1);
    }

    #[test]
    fn test_jitter_inside_hysteresis_band_holds_phase() {
        let mut machine = RepStateMachine::default();
        machine.step(Some(&facts(170.0, 170.0, true)));
        for knee in [158.0, 145.0, 152.0, 141.0, 159.0] {
            machine.step(Some(&facts(knee, 170.0, true)));
            assert_eq!(machine.phase(), ExercisePhase::Standing);
        }

        machine.step(Some(&facts(130.0, 170.0, true)));
        for knee in [145.0, 155.0, 141.0, 160.0] {
            machine.step(Some(&facts(knee, 170.0, true)));
            assert_eq!(machine.phase(), ExercisePhase::Descending);
        }
        assert_eq!(machine.rep_count(), 0);
    }

    fn phase_strategy() -> impl Strategy<Value = ExercisePhase> {
        prop_oneof![
            Just(ExercisePhase::AwaitingVisibility),
            Just(ExercisePhase::Standing),
            Just(ExercisePhase::Descending),
        ]
    }

    fn facts_strategy() -> impl Strategy<Value = Option<FrameFacts>> {
        proptest::option::of(
            (0.0f32..=180.0, 0.0f32..=180.0, any::<bool>())
                .prop_map(|(knee, back, visible)| facts(knee, back, visible)),
        )
    }

    proptest! {
        #[test]
        fn prop_transition_is_deterministic(
            phase in phase_strategy(),
            input in facts_strategy(),
        ) {
            let thresholds = Thresholds::default();
            let first = transition(phase, input.as_ref(), &thresholds);
            let second = transition(phase, input.as_ref(), &thresholds);
            prop_assert_eq!(first, second);
            prop_assert_eq!(first.rep_completed, phase == ExercisePhase::Descending && first.next == ExercisePhase::Standing);
        }

        #[test]
        fn prop_rep_count_is_monotonic(
            inputs in proptest::collection::vec(facts_strategy(), 0..200),
        ) {
            let mut machine = RepStateMachine::default();
            let mut previous = machine.rep_count();
            for input in &inputs {
                let t = machine.step(input.as_ref());
                let current = machine.rep_count();
                prop_assert!(current >= previous);
                prop_assert_eq!(current - previous, u32::from(t.rep_completed));
                previous = current;
            }
        }
    }
}
