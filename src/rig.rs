use glam::Vec3;

use crate::config::LookAtWeights;

/// Secondary IK targets that bias how a limb bends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IkHint {
    LeftElbow,
    RightElbow,
}

/// Primary IK targets a limb has to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IkGoal {
    LeftHand,
    RightHand,
}

/// Everything the retargeter needs from the host animation system.
///
/// Implemented by an engine binding in production, by [`crate::SkeletonRig`]
/// for standalone use, and by recording fakes in tests.
pub trait AvatarRig {
    /// Screen pixel plus depth (in `z`) to world space.
    fn screen_to_world(&self, screen: Vec3) -> Vec3;

    fn root_position(&self) -> Vec3;
    fn set_root_position(&mut self, position: Vec3);

    /// World positions of the avatar's left and right eye bones, if rigged.
    fn eye_positions(&self) -> Option<(Vec3, Vec3)>;
    fn set_look_at_weights(&mut self, weights: LookAtWeights);
    fn set_look_at_position(&mut self, position: Vec3);

    fn ik_hint_position(&self, hint: IkHint) -> Vec3;
    fn set_ik_hint_position_weight(&mut self, hint: IkHint, weight: f32);
    fn set_ik_hint_position(&mut self, hint: IkHint, position: Vec3);

    fn ik_goal_position(&self, goal: IkGoal) -> Vec3;
    fn set_ik_goal_position_weight(&mut self, goal: IkGoal, weight: f32);
    fn set_ik_goal_position(&mut self, goal: IkGoal, position: Vec3);
}
