//! Head-turn estimation from eye/ear asymmetry.
//!
//! When the head turns, the ear on the far side slides behind the head: its
//! score drops and its distance to the matching eye shrinks in the image. The
//! ratio of the two ear-eye distances is used directly as a gaze offset in
//! eye-separation units. It is a stable approximation, not a geometric inverse.

use glam::Vec3;

use crate::config::{LookAtWeights, ThresholdConfig};
use crate::pose::{PoseVector, TrackedPart};
use crate::rig::AvatarRig;

const FACE: [TrackedPart; 3] = [TrackedPart::Nose, TrackedPart::LeftEye, TrackedPart::RightEye];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeEstimate {
    pub direction: LookDirection,
    /// Signed ear-eye length ratio; negative when looking right.
    pub x_ratio: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GazeOutcome {
    Committed {
        target: Vec3,
        x_ratio: f32,
        deflected: bool,
    },
    /// Face not confidently visible, or geometry unusable. Previous gaze holds.
    Skipped,
}

pub fn estimate_gaze(pose: &PoseVector, thresholds: &ThresholdConfig) -> Option<GazeEstimate> {
    let accuracy = thresholds.accuracy;
    if !pose.all_valid(&FACE, accuracy) {
        return None;
    }

    let left_ear = pose.get(TrackedPart::LeftEar);
    let right_ear = pose.get(TrackedPart::RightEar);
    if !left_ear.is_valid(accuracy) && !right_ear.is_valid(accuracy) {
        return None;
    }

    let left_len = (left_ear.position - pose.get(TrackedPart::LeftEye).position).length();
    let right_len = (right_ear.position - pose.get(TrackedPart::RightEye).position).length();

    let right_ear_hidden = left_ear.is_valid(accuracy) && right_ear.score < thresholds.ear_occluded;
    let direction = if right_ear_hidden || left_len > right_len {
        LookDirection::Right
    } else {
        LookDirection::Left
    };

    let x_ratio = match direction {
        LookDirection::Right => -(left_len / right_len),
        LookDirection::Left => right_len / left_len,
    };

    // An ear sitting exactly on its eye gives an infinite or undefined ratio.
    if !x_ratio.is_finite() {
        return None;
    }

    Some(GazeEstimate { direction, x_ratio })
}

/// Look-at point between the avatar's eyes, pushed sideways for large turns.
/// The dead zone includes its boundary: `|x_ratio| == deflection` stays centred.
pub fn look_at_target(left_eye: Vec3, right_eye: Vec3, x_ratio: f32, deflection: f32) -> (Vec3, bool) {
    let mut target = (left_eye + right_eye) / 2.0;
    let deflected = x_ratio.abs() > deflection;
    if deflected {
        target.x += (left_eye - right_eye).length() * x_ratio;
    }
    (target, deflected)
}

pub fn update_gaze<R: AvatarRig + ?Sized>(
    pose: &PoseVector,
    rig: &mut R,
    thresholds: &ThresholdConfig,
    weights: LookAtWeights,
) -> GazeOutcome {
    let Some(estimate) = estimate_gaze(pose, thresholds) else {
        return GazeOutcome::Skipped;
    };
    let Some((left_eye, right_eye)) = rig.eye_positions() else {
        log::debug!("rig has no eye bones, gaze left unchanged");
        return GazeOutcome::Skipped;
    };

    let (target, deflected) =
        look_at_target(left_eye, right_eye, estimate.x_ratio, thresholds.gaze_deflection);

    rig.set_look_at_weights(weights);
    rig.set_look_at_position(target);
    log::trace!(
        "gaze {:?} ratio {:.3} -> {:?}",
        estimate.direction,
        estimate.x_ratio,
        target
    );

    GazeOutcome::Committed {
        target,
        x_ratio: estimate.x_ratio,
        deflected,
    }
}
