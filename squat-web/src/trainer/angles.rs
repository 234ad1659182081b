//! Joint angle calculation
//!
//! Knee angle is measured at the knee (hip→knee→ankle) and back angle at
//! the hip (shoulder→hip→knee). Both are averaged over the left and right
//! side so a single badly tracked limb only moves the result halfway.

use super::pose::{Joint, PoseFrame};
use crate::error::{Result, TrainerError};

/// Rays shorter than this (normalized units) have no usable direction
const MIN_RAY_LENGTH: f32 = 1e-6;

/// Calculate the angle ABC in degrees, in [0, 180]
///
/// Takes the difference of the polar angles of rays B→C and B→A (atan2 keeps
/// vertical and horizontal rays stable) and reflects anything over 180°.
///
/// Precondition: A and C must not coincide with B. The result is meaningless
/// (but finite) for coincident points; use [`checked_angle`] to reject them.
pub fn calculate_angle(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> f32 {
    let radians = (c.1 - b.1).atan2(c.0 - b.0) - (a.1 - b.1).atan2(a.0 - b.0);
    let angle = radians.to_degrees().abs();

    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Angle at `vertex` between `from` and `to`, rejecting degenerate geometry
pub fn checked_angle(frame: &PoseFrame, from: Joint, vertex: Joint, to: Joint) -> Result<f32> {
    let a = frame.position(from)?;
    let b = frame.position(vertex)?;
    let c = frame.position(to)?;

    if ray_length(b, a) < MIN_RAY_LENGTH || ray_length(b, c) < MIN_RAY_LENGTH {
        return Err(TrainerError::DegenerateGeometry { vertex });
    }

    Ok(calculate_angle(a, b, c))
}

fn ray_length(from: (f32, f32), to: (f32, f32)) -> f32 {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    (dx * dx + dy * dy).sqrt()
}

/// Mean of a left-side and right-side measurement
pub fn bilateral_mean(left: f32, right: f32) -> f32 {
    (left + right) / 2.0
}

/// The two angles the rep state machine reads each frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointAngles {
    /// Hip-knee-ankle, averaged over both legs
    pub knee: f32,
    /// Shoulder-hip-knee, averaged over both sides
    pub back: f32,
}

impl JointAngles {
    pub fn new(knee: f32, back: f32) -> Self {
        Self { knee, back }
    }

    /// Measure knee and back angles from a pose frame
    pub fn measure(frame: &PoseFrame) -> Result<Self> {
        let left_knee = checked_angle(frame, Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle)?;
        let right_knee =
            checked_angle(frame, Joint::RightHip, Joint::RightKnee, Joint::RightAnkle)?;
        let left_back =
            checked_angle(frame, Joint::LeftShoulder, Joint::LeftHip, Joint::LeftKnee)?;
        let right_back =
            checked_angle(frame, Joint::RightShoulder, Joint::RightHip, Joint::RightKnee)?;

        Ok(Self {
            knee: bilateral_mean(left_knee, right_knee),
            back: bilateral_mean(left_back, right_back),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::pose::JointSample;
    use crate::trainer::test_support::pose_with_angles;
    use proptest::prelude::*;

    #[test]
    fn test_straight_leg() {
        let hip = (0.5, 0.2);
        let knee = (0.5, 0.5);
        let ankle = (0.5, 0.8);
        let angle = calculate_angle(hip, knee, ankle);
        assert!((angle - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_right_angle() {
        let hip = (0.2, 0.5);
        let knee = (0.5, 0.5);
        let ankle = (0.5, 0.8);
        let angle = calculate_angle(hip, knee, ankle);
        assert!((angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_reflex_difference_is_reflected() {
        // Raw atan2 difference here is 270°, the joint angle is 90°
        let a = (0.0, -1.0);
        let b = (0.0, 0.0);
        let c = (-1.0, 0.0);
        let angle = calculate_angle(a, b, c);
        assert!((angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_measure_averages_both_sides() {
        let mut frame = pose_with_angles(170.0, 170.0);
        // Bend only the left knee to a right angle
        let knee = frame.joint(Joint::LeftKnee);
        frame.set_joint(
            Joint::LeftAnkle,
            JointSample::new(knee.x + 0.2, knee.y, 1.0),
        );
        let angles = JointAngles::measure(&frame).unwrap();

        let left = calculate_angle(
            frame.joint(Joint::LeftHip).position(),
            knee.position(),
            frame.joint(Joint::LeftAnkle).position(),
        );
        assert!((left - 90.0).abs() < 1e-2);
        assert!((angles.knee - (90.0 + 170.0) / 2.0).abs() < 1e-2);
        assert!((angles.back - 170.0).abs() < 1e-2);
    }

    #[test]
    fn test_measure_rejects_coincident_joints() {
        let mut frame = pose_with_angles(170.0, 170.0);
        frame.set_joint(Joint::RightAnkle, frame.joint(Joint::RightKnee));

        assert!(matches!(
            JointAngles::measure(&frame),
            Err(TrainerError::DegenerateGeometry { vertex: Joint::RightKnee })
        ));
    }

    proptest! {
        #[test]
        fn prop_right_angle_corner(
            bx in -1.0f32..1.0,
            by in -1.0f32..1.0,
            len_a in 0.05f32..1.0,
            len_c in 0.05f32..1.0,
            theta in 0.0f32..std::f32::consts::TAU,
        ) {
            let a = (bx + len_a * theta.cos(), by + len_a * theta.sin());
            let rotated = theta + std::f32::consts::FRAC_PI_2;
            let c = (bx + len_c * rotated.cos(), by + len_c * rotated.sin());
            let angle = calculate_angle(a, (bx, by), c);
            prop_assert!((angle - 90.0).abs() < 0.05, "angle = {}", angle);
        }

        #[test]
        fn prop_opposite_rays_are_straight(
            bx in -1.0f32..1.0,
            by in -1.0f32..1.0,
            len_a in 0.05f32..1.0,
            len_c in 0.05f32..1.0,
            theta in 0.0f32..std::f32::consts::TAU,
        ) {
            let a = (bx + len_a * theta.cos(), by + len_a * theta.sin());
            let c = (bx - len_c * theta.cos(), by - len_c * theta.sin());
            let angle = calculate_angle(a, (bx, by), c);
            prop_assert!((angle - 180.0).abs() < 0.05, "angle = {}", angle);
        }

        #[test]
        fn prop_angle_in_range(
            a in (-1.0f32..1.0, -1.0f32..1.0),
            b in (-1.0f32..1.0, -1.0f32..1.0),
            c in (-1.0f32..1.0, -1.0f32..1.0),
        ) {
            let angle = calculate_angle(a, b, c);
            prop_assert!((0.0..=180.0).contains(&angle));
        }
    }
}
