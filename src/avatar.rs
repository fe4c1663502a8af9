//! Engine-free avatar that implements [`AvatarRig`].
//!
//! A rest skeleton hangs off a root transform; IK targets are stored as the
//! retargeter commits them and [`SkeletonRig::solve`] poses both arms with
//! FABRIK. Useful for replaying recorded pose streams and for tests.

use glam::Vec3;

use crate::camera::ScreenCamera;
use crate::config::LookAtWeights;
use crate::ik::{Chain, FabrikSolver, SolveResult};
use crate::math::Transform;
use crate::rig::{AvatarRig, IkGoal, IkHint};

/// Rest-pose joint offsets in root space. The avatar faces +Z, so its left
/// side is +X.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonLayout {
    pub left_eye: Vec3,
    pub right_eye: Vec3,
    pub left_shoulder: Vec3,
    pub right_shoulder: Vec3,
    pub left_elbow: Vec3,
    pub right_elbow: Vec3,
    pub left_hand: Vec3,
    pub right_hand: Vec3,
}

impl Default for SkeletonLayout {
    fn default() -> Self {
        Self {
            left_eye: Vec3::new(0.032, 1.62, 0.09),
            right_eye: Vec3::new(-0.032, 1.62, 0.09),
            left_shoulder: Vec3::new(0.19, 1.42, 0.0),
            right_shoulder: Vec3::new(-0.19, 1.42, 0.0),
            left_elbow: Vec3::new(0.24, 1.15, -0.04),
            right_elbow: Vec3::new(-0.24, 1.15, -0.04),
            left_hand: Vec3::new(0.26, 0.9, 0.06),
            right_hand: Vec3::new(-0.26, 0.9, 0.06),
        }
    }
}

/// A weighted IK target as last committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkTarget {
    pub position: Vec3,
    pub weight: f32,
}

/// Solved joint positions of one arm, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmPose {
    pub shoulder: Vec3,
    pub elbow: Vec3,
    pub hand: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAt {
    pub position: Vec3,
    pub weights: LookAtWeights,
}

/// Index 0 is the avatar's left side throughout.
#[derive(Debug, Clone)]
pub struct SkeletonRig {
    pub camera: ScreenCamera,
    root: Transform,
    layout: SkeletonLayout,
    hints: [IkTarget; 2],
    goals: [IkTarget; 2],
    look_at: Option<LookAt>,
    arms: [ArmPose; 2],
}

fn hint_index(hint: IkHint) -> usize {
    match hint {
        IkHint::LeftElbow => 0,
        IkHint::RightElbow => 1,
    }
}

fn goal_index(goal: IkGoal) -> usize {
    match goal {
        IkGoal::LeftHand => 0,
        IkGoal::RightHand => 1,
    }
}

impl Default for SkeletonRig {
    fn default() -> Self {
        Self::new(ScreenCamera::default(), Transform::IDENTITY, SkeletonLayout::default())
    }
}

impl SkeletonRig {
    pub fn new(camera: ScreenCamera, root: Transform, layout: SkeletonLayout) -> Self {
        let mut rig = Self {
            camera,
            root,
            layout,
            hints: [IkTarget { position: Vec3::ZERO, weight: 0.0 }; 2],
            goals: [IkTarget { position: Vec3::ZERO, weight: 0.0 }; 2],
            look_at: None,
            arms: [ArmPose { shoulder: Vec3::ZERO, elbow: Vec3::ZERO, hand: Vec3::ZERO }; 2],
        };
        rig.arms = [rig.rest_arm(0), rig.rest_arm(1)];
        for side in 0..2 {
            rig.hints[side].position = rig.arms[side].elbow;
            rig.goals[side].position = rig.arms[side].hand;
        }
        rig
    }

    pub fn root(&self) -> &Transform {
        &self.root
    }

    pub fn layout(&self) -> &SkeletonLayout {
        &self.layout
    }

    pub fn hint(&self, hint: IkHint) -> IkTarget {
        self.hints[hint_index(hint)]
    }

    pub fn goal(&self, goal: IkGoal) -> IkTarget {
        self.goals[goal_index(goal)]
    }

    pub fn look_at(&self) -> Option<LookAt> {
        self.look_at
    }

    /// Last solved pose of the arm that carries `goal`.
    pub fn arm(&self, goal: IkGoal) -> ArmPose {
        self.arms[goal_index(goal)]
    }

    fn rest_arm(&self, side: usize) -> ArmPose {
        let l = &self.layout;
        let (shoulder, elbow, hand) = if side == 0 {
            (l.left_shoulder, l.left_elbow, l.left_hand)
        } else {
            (l.right_shoulder, l.right_elbow, l.right_hand)
        };
        ArmPose {
            shoulder: self.root.transform_point(shoulder),
            elbow: self.root.transform_point(elbow),
            hand: self.root.transform_point(hand),
        }
    }

    /// Poses both arms from the current goals and hints. A goal weight below 1
    /// blends the reach target back toward the rest hand.
    pub fn solve(&mut self) -> [SolveResult; 2] {
        [0, 1].map(|side| {
            let rest = self.rest_arm(side);
            let goal = self.goals[side];
            let hint = self.hints[side];

            let mut chain = Chain::arm(rest.shoulder, rest.elbow, rest.hand);
            let target = rest.hand.lerp(goal.position, goal.weight.clamp(0.0, 1.0));
            let result = FabrikSolver::solve_with_pole(&mut chain, target, hint.position, hint.weight);

            let joints = chain.joints();
            self.arms[side] = ArmPose {
                shoulder: joints[0],
                elbow: joints[1],
                hand: joints[2],
            };
            if !result.converged {
                log::debug!(
                    "arm {} short of target by {:.3}",
                    side,
                    result.final_distance
                );
            }
            result
        })
    }
}

impl AvatarRig for SkeletonRig {
    fn screen_to_world(&self, screen: Vec3) -> Vec3 {
        self.camera.screen_to_world(screen)
    }

    fn root_position(&self) -> Vec3 {
        self.root.position
    }

    fn set_root_position(&mut self, position: Vec3) {
        self.root.position = position;
    }

    fn eye_positions(&self) -> Option<(Vec3, Vec3)> {
        Some((
            self.root.transform_point(self.layout.left_eye),
            self.root.transform_point(self.layout.right_eye),
        ))
    }

    fn set_look_at_weights(&mut self, weights: LookAtWeights) {
        let position = self.look_at.map_or(Vec3::ZERO, |l| l.position);
        self.look_at = Some(LookAt { position, weights });
    }

    fn set_look_at_position(&mut self, position: Vec3) {
        let weights = self.look_at.map_or(LookAtWeights::default(), |l| l.weights);
        self.look_at = Some(LookAt { position, weights });
    }

    fn ik_hint_position(&self, hint: IkHint) -> Vec3 {
        self.hints[hint_index(hint)].position
    }

    fn set_ik_hint_position_weight(&mut self, hint: IkHint, weight: f32) {
        self.hints[hint_index(hint)].weight = weight;
    }

    fn set_ik_hint_position(&mut self, hint: IkHint, position: Vec3) {
        self.hints[hint_index(hint)].position = position;
    }

    fn ik_goal_position(&self, goal: IkGoal) -> Vec3 {
        self.goals[goal_index(goal)].position
    }

    fn set_ik_goal_position_weight(&mut self, goal: IkGoal, weight: f32) {
        self.goals[goal_index(goal)].weight = weight;
    }

    fn set_ik_goal_position(&mut self, goal: IkGoal, position: Vec3) {
        self.goals[goal_index(goal)].position = position;
    }
}
