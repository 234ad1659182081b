//! Synthetic poses for tests

use super::pose::{Joint, JointSample, PoseFrame};

const SEGMENT: f32 = 0.2;

/// A symmetric pose whose knee and back angles are exactly the given values
pub fn pose_with_angles(knee_deg: f32, back_deg: f32) -> PoseFrame {
    pose_with_visibility(knee_deg, back_deg, 0.95)
}

pub fn pose_with_visibility(knee_deg: f32, back_deg: f32, visibility: f32) -> PoseFrame {
    let knee = knee_deg.to_radians();
    let back = back_deg.to_radians();

    PoseFrame::from_fn(|joint| {
        let x = match joint {
            Joint::LeftShoulder | Joint::LeftHip | Joint::LeftKnee | Joint::LeftAnkle => 0.4,
            _ => 0.6,
        };
        let hip = (x, 0.5);
        let knee_pos = (x, hip.1 + SEGMENT);

        let (px, py) = match joint {
            Joint::LeftHip | Joint::RightHip => hip,
            Joint::LeftKnee | Joint::RightKnee => knee_pos,
            // Rotate the knee→hip ray (straight up) by the knee angle
            Joint::LeftAnkle | Joint::RightAnkle => (
                knee_pos.0 + SEGMENT * knee.sin(),
                knee_pos.1 - SEGMENT * knee.cos(),
            ),
            // Rotate the hip→knee ray (straight down) by the back angle
            Joint::LeftShoulder | Joint::RightShoulder => (
                hip.0 + SEGMENT * back.sin(),
                hip.1 + SEGMENT * back.cos(),
            ),
        };
        JointSample::new(px, py, visibility)
    })
}
