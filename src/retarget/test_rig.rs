use glam::Vec3;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::LookAtWeights;
use crate::rig::{AvatarRig, IkGoal, IkHint};

/// Linear stand-in for an engine: world = screen / 100, depth kept as z.
pub struct FakeRig {
    pub root: Vec3,
    pub eyes: Option<(Vec3, Vec3)>,
    pub look_at: Option<Vec3>,
    pub look_weights: Option<LookAtWeights>,
    pub hints: HashMap<IkHint, Vec3>,
    pub hint_weights: HashMap<IkHint, f32>,
    pub goals: HashMap<IkGoal, Vec3>,
    pub goal_weights: HashMap<IkGoal, f32>,
    projected: RefCell<Vec<Vec3>>,
}

impl FakeRig {
    pub fn new() -> Self {
        Self {
            root: Vec3::ZERO,
            eyes: Some((Vec3::new(0.05, 1.6, 0.0), Vec3::new(-0.05, 1.6, 0.0))),
            look_at: None,
            look_weights: None,
            hints: HashMap::new(),
            hint_weights: HashMap::new(),
            goals: HashMap::new(),
            goal_weights: HashMap::new(),
            projected: RefCell::new(Vec::new()),
        }
    }

    pub fn projected(&self) -> Vec<Vec3> {
        self.projected.borrow().clone()
    }
}

impl AvatarRig for FakeRig {
    fn screen_to_world(&self, screen: Vec3) -> Vec3 {
        self.projected.borrow_mut().push(screen);
        Vec3::new(screen.x / 100.0, screen.y / 100.0, screen.z)
    }

    fn root_position(&self) -> Vec3 {
        self.root
    }

    fn set_root_position(&mut self, position: Vec3) {
        self.root = position;
    }

    fn eye_positions(&self) -> Option<(Vec3, Vec3)> {
        self.eyes
    }

    fn set_look_at_weights(&mut self, weights: LookAtWeights) {
        self.look_weights = Some(weights);
    }

    fn set_look_at_position(&mut self, position: Vec3) {
        self.look_at = Some(position);
    }

    fn ik_hint_position(&self, hint: IkHint) -> Vec3 {
        self.hints.get(&hint).copied().unwrap_or(Vec3::ZERO)
    }

    fn set_ik_hint_position_weight(&mut self, hint: IkHint, weight: f32) {
        self.hint_weights.insert(hint, weight);
    }

    fn set_ik_hint_position(&mut self, hint: IkHint, position: Vec3) {
        self.hints.insert(hint, position);
    }

    fn ik_goal_position(&self, goal: IkGoal) -> Vec3 {
        self.goals.get(&goal).copied().unwrap_or(Vec3::ZERO)
    }

    fn set_ik_goal_position_weight(&mut self, goal: IkGoal, weight: f32) {
        self.goal_weights.insert(goal, weight);
    }

    fn set_ik_goal_position(&mut self, goal: IkGoal, position: Vec3) {
        self.goals.insert(goal, position);
    }
}
