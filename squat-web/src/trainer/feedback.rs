//! Exercise phases and feedback codes, with their display attributes

/// Feedback box colors (RGBA)
mod colors {
    pub const ALERT_RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PROMPT_ORANGE: [f32; 4] = [1.0, 0.647, 0.0, 1.0];
    pub const GOOD_GREEN: [f32; 4] = [0.0, 0.588, 0.0, 1.0];
    pub const COUNTED_BLUE: [f32; 4] = [0.0, 0.392, 0.784, 1.0];
    pub const NEUTRAL_NAVY: [f32; 4] = [0.0, 0.0, 0.502, 1.0];
}

/// Current stage of a squat repetition
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExercisePhase {
    #[default]
    AwaitingVisibility,
    Standing,
    Descending,
}

impl ExercisePhase {
    pub const ALL: [ExercisePhase; 3] = [
        ExercisePhase::AwaitingVisibility,
        ExercisePhase::Standing,
        ExercisePhase::Descending,
    ];

    /// Text for the status box
    pub fn label(&self) -> &'static str {
        match self {
            ExercisePhase::AwaitingVisibility => "GET READY",
            ExercisePhase::Standing => "UP",
            ExercisePhase::Descending => "DOWN",
        }
    }
}

/// Per-frame explanation of the state machine's decision
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedbackCode {
    NeedsVisibility,
    StandStraight,
    StraightenBack,
    GoLower,
    FullSquat,
    RepCounted,
    NoBodyDetected,
}

impl FeedbackCode {
    pub fn label(&self) -> &'static str {
        match self {
            FeedbackCode::NeedsVisibility => "GET VISIBLE",
            FeedbackCode::StandStraight => "STAND STRAIGHT",
            FeedbackCode::StraightenBack => "STRAIGHTEN BACK",
            FeedbackCode::GoLower => "GO LOWER",
            FeedbackCode::FullSquat => "FULL SQUAT!",
            FeedbackCode::RepCounted => "REP COUNTED!",
            FeedbackCode::NoBodyDetected => "NO BODY DETECTED",
        }
    }

    /// Feedback box color
    pub fn color(&self) -> [f32; 4] {
        match self {
            FeedbackCode::StraightenBack => colors::ALERT_RED,
            FeedbackCode::GoLower => colors::PROMPT_ORANGE,
            FeedbackCode::FullSquat => colors::GOOD_GREEN,
            FeedbackCode::RepCounted => colors::COUNTED_BLUE,
            FeedbackCode::NeedsVisibility
            | FeedbackCode::StandStraight
            | FeedbackCode::NoBodyDetected => colors::NEUTRAL_NAVY,
        }
    }

    /// Whether the feedback points out a form problem
    pub fn is_correction(&self) -> bool {
        matches!(self, FeedbackCode::StraightenBack | FeedbackCode::GoLower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_labels() {
        assert_eq!(ExercisePhase::default(), ExercisePhase::AwaitingVisibility);
        assert_eq!(ExercisePhase::Standing.label(), "UP");
        assert_eq!(ExercisePhase::Descending.label(), "DOWN");
    }

    #[test]
    fn test_colors_follow_category() {
        assert_eq!(FeedbackCode::StraightenBack.color(), colors::ALERT_RED);
        assert_eq!(FeedbackCode::FullSquat.color(), colors::GOOD_GREEN);
        assert_eq!(FeedbackCode::NoBodyDetected.color(), FeedbackCode::StandStraight.color());
        assert_ne!(FeedbackCode::RepCounted.color(), FeedbackCode::GoLower.color());
    }
}
