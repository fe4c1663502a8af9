use glam::Vec3;

use crate::config::{PlacementConfig, ThresholdConfig};
use crate::error::{Result, RetargetError};
use crate::pose::{PartVector, PoseVector, TrackedPart};
use crate::rig::{AvatarRig, IkGoal, IkHint};

/// Which source arm drives which avatar targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmMapping {
    pub elbow: TrackedPart,
    pub wrist: TrackedPart,
    pub hint: IkHint,
    pub goal: IkGoal,
}

/// The camera faces the performer, so their left arm is the avatar's right.
pub const MIRRORED_ARMS: [ArmMapping; 2] = [
    ArmMapping {
        elbow: TrackedPart::LeftElbow,
        wrist: TrackedPart::LeftWrist,
        hint: IkHint::RightElbow,
        goal: IkGoal::RightHand,
    },
    ArmMapping {
        elbow: TrackedPart::RightElbow,
        wrist: TrackedPart::RightWrist,
        hint: IkHint::LeftElbow,
        goal: IkGoal::LeftHand,
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Committed(Vec3),
    LowConfidence,
    Degenerate,
}

impl Placement {
    pub fn is_committed(&self) -> bool {
        matches!(self, Placement::Committed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmReport {
    pub hint: IkHint,
    pub goal: IkGoal,
    pub elbow: Placement,
    pub hand: Placement,
}

/// Extrapolates the hand past the wrist along the forearm.
pub fn hand_position(elbow: Vec3, wrist: Vec3, extension: f32, goal: IkGoal) -> Result<Vec3> {
    let forearm = wrist - elbow;
    let arm_length = forearm.length();
    if arm_length <= f32::EPSILON {
        return Err(RetargetError::DegenerateGeometry { goal });
    }
    Ok(wrist + forearm / arm_length * arm_length * extension)
}

pub fn place_elbow<R: AvatarRig + ?Sized>(
    elbow: &PartVector,
    hint: IkHint,
    rig: &mut R,
    thresholds: &ThresholdConfig,
    placement: &PlacementConfig,
) -> Placement {
    if !elbow.is_valid(thresholds.accuracy) {
        return Placement::LowConfidence;
    }

    let mut world = rig.screen_to_world(elbow.at_depth(placement.camera_depth));
    world.z = rig.ik_hint_position(hint).z;

    rig.set_ik_hint_position_weight(hint, 1.0);
    rig.set_ik_hint_position(hint, world);
    log::trace!("{:?} hint -> {:?}", hint, world);
    Placement::Committed(world)
}

/// Only the wrist score gates the hand: a shaky elbow still lets a
/// confident wrist through.
pub fn place_hand<R: AvatarRig + ?Sized>(
    elbow: &PartVector,
    wrist: &PartVector,
    goal: IkGoal,
    rig: &mut R,
    thresholds: &ThresholdConfig,
    placement: &PlacementConfig,
) -> Placement {
    if !wrist.is_valid(thresholds.accuracy) {
        return Placement::LowConfidence;
    }

    let hand = match hand_position(elbow.position, wrist.position, placement.hand_extension, goal) {
        Ok(hand) => hand,
        Err(err) => {
            log::debug!("skipping hand placement: {}", err);
            return Placement::Degenerate;
        }
    };

    let mut world = rig.screen_to_world(hand.with_z(placement.camera_depth));
    world.z = rig.ik_goal_position(goal).z;

    rig.set_ik_goal_position_weight(goal, 1.0);
    rig.set_ik_goal_position(goal, world);
    log::trace!("{:?} goal -> {:?}", goal, world);
    Placement::Committed(world)
}

pub fn update_arms<R: AvatarRig + ?Sized>(
    pose: &PoseVector,
    rig: &mut R,
    thresholds: &ThresholdConfig,
    placement: &PlacementConfig,
) -> [ArmReport; 2] {
    MIRRORED_ARMS.map(|arm| {
        let elbow = pose.get(arm.elbow);
        let wrist = pose.get(arm.wrist);
        ArmReport {
            hint: arm.hint,
            goal: arm.goal,
            elbow: place_elbow(elbow, arm.hint, &mut *rig, thresholds, placement),
            hand: place_hand(elbow, wrist, arm.goal, &mut *rig, thresholds, placement),
        }
    })
}
