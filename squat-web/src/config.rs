//! Session configuration
//!
//! Calibration constants for the rep state machine plus milestone and frame
//! settings. Defaults are the tuned values; a TOML document can override any
//! subset of them before a session starts.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainerError};

/// Knee angle above which the legs count as fully extended
pub const STANDING_KNEE_ANGLE: f32 = 160.0;

/// Knee angle below which a standing person counts as descending
pub const DESCEND_KNEE_ANGLE: f32 = 140.0;

/// Knee angle below which the squat counts as full depth
pub const FULL_SQUAT_KNEE_ANGLE: f32 = 90.0;

/// Back angle above which the torso counts as upright
pub const STRAIGHT_BACK_ANGLE: f32 = 160.0;

/// Every required joint must be strictly above this visibility
pub const VISIBILITY_THRESHOLD: f32 = 0.8;

/// Upper bound on particles spawned by one milestone burst
pub const MAX_MILESTONE_PARTICLES: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub visibility_threshold: f32,
    pub standing_knee_angle: f32,
    pub descend_knee_angle: f32,
    pub full_squat_knee_angle: f32,
    pub straight_back_angle: f32,
    /// Reps between milestones
    pub milestone_interval: u32,
    /// Frames a milestone message stays on screen (~3s at 20fps)
    pub milestone_display_frames: u32,
    pub milestone_particles: usize,
    pub frame_width: f32,
    pub frame_height: f32,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: VISIBILITY_THRESHOLD,
            standing_knee_angle: STANDING_KNEE_ANGLE,
            descend_knee_angle: DESCEND_KNEE_ANGLE,
            full_squat_knee_angle: FULL_SQUAT_KNEE_ANGLE,
            straight_back_angle: STRAIGHT_BACK_ANGLE,
            milestone_interval: 15,
            milestone_display_frames: 60,
            milestone_particles: 50,
            frame_width: 640.0,
            frame_height: 480.0,
        }
    }
}

impl TrainerConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that the thresholds keep the hysteresis band intact
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.visibility_threshold) {
            return Err(TrainerError::Config(format!(
                "visibility_threshold must be in [0, 1), got {}",
                self.visibility_threshold
            )));
        }

        let ordered = self.full_squat_knee_angle < self.descend_knee_angle
            && self.descend_knee_angle < self.standing_knee_angle
            && self.standing_knee_angle <= 180.0;
        if !ordered {
            return Err(TrainerError::Config(format!(
                "knee thresholds must satisfy full_squat < descend < standing <= 180, got {} / {} / {}",
                self.full_squat_knee_angle, self.descend_knee_angle, self.standing_knee_angle
            )));
        }

        if !(0.0..=180.0).contains(&self.straight_back_angle) {
            return Err(TrainerError::Config(format!(
                "straight_back_angle must be in [0, 180], got {}",
                self.straight_back_angle
            )));
        }

        if self.milestone_interval == 0 {
            return Err(TrainerError::Config("milestone_interval must be positive".into()));
        }

        if self.milestone_particles > MAX_MILESTONE_PARTICLES {
            return Err(TrainerError::Config(format!(
                "milestone_particles must be at most {}, got {}",
                MAX_MILESTONE_PARTICLES, self.milestone_particles
            )));
        }

        let positive = |size: f32| size.is_finite() && size > 0.0;
        if !positive(self.frame_width) || !positive(self.frame_height) {
            return Err(TrainerError::Config(format!(
                "frame size must be finite and positive, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }

        Ok(())
    }

    /// Center of the frame in pixels, where milestone particles burst from
    pub fn frame_center(&self) -> (f32, f32) {
        (self.frame_width / 2.0, self.frame_height / 2.0)
    }

    /// Frame size in whole pixels, at least 1×1, for sizing the canvas
    pub fn frame_extent(&self) -> (u32, u32) {
        let pixels = |size: f32| (size.round() as u32).max(1);
        (pixels(self.frame_width), pixels(self.frame_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TrainerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.milestone_interval, 15);
        assert_eq!(config.milestone_display_frames, 60);
        assert_eq!(config.milestone_particles, 50);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TrainerConfig::from_toml_str("milestone_interval = 10\n").unwrap();
        assert_eq!(config.milestone_interval, 10);
        assert_eq!(config.standing_knee_angle, STANDING_KNEE_ANGLE);
        assert_eq!(config.visibility_threshold, VISIBILITY_THRESHOLD);
    }

    #[test]
    fn test_rejects_collapsed_hysteresis() {
        let result = TrainerConfig::from_toml_str(
            "standing_knee_angle = 140.0\ndescend_knee_angle = 150.0\n",
        );
        assert!(matches!(result, Err(TrainerError::Config(_))));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let result = TrainerConfig::from_toml_str("milestone_interval = 0\n");
        assert!(matches!(result, Err(TrainerError::Config(_))));
    }

    #[test]
    fn test_rejects_non_finite_frame_size() {
        let result = TrainerConfig::from_toml_str("frame_width = nan\n");
        assert!(matches!(result, Err(TrainerError::Config(_))));

        let result = TrainerConfig::from_toml_str("frame_height = inf\n");
        assert!(matches!(result, Err(TrainerError::Config(_))));

        let result = TrainerConfig::from_toml_str("frame_width = 0.0\n");
        assert!(matches!(result, Err(TrainerError::Config(_))));
    }

    #[test]
    fn test_caps_milestone_particles() {
        let at_cap = format!("milestone_particles = {}\n", MAX_MILESTONE_PARTICLES);
        assert!(TrainerConfig::from_toml_str(&at_cap).is_ok());

        let over = format!("milestone_particles = {}\n", MAX_MILESTONE_PARTICLES + 1);
        assert!(matches!(
            TrainerConfig::from_toml_str(&over),
            Err(TrainerError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = TrainerConfig::from_toml_str("milestone_interval = \"many\"\n");
        assert!(matches!(result, Err(TrainerError::ConfigParse(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = TrainerConfig {
            frame_width: 1280.0,
            frame_height: 720.0,
            ..TrainerConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(TrainerConfig::from_toml_str(&text).unwrap(), config);
        assert_eq!(config.frame_center(), (640.0, 360.0));
    }

    #[test]
    fn test_frame_extent_rounds_to_pixels() {
        assert_eq!(TrainerConfig::default().frame_extent(), (640, 480));

        let config = TrainerConfig {
            frame_width: 959.6,
            frame_height: 0.2,
            ..TrainerConfig::default()
        };
        assert_eq!(config.frame_extent(), (960, 1));
    }
}
