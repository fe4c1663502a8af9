use super::chain::Chain;
use glam::{Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveResult {
    pub converged: bool,
    pub iterations: u32,
    pub final_distance: f32,
}

impl SolveResult {
    fn trivial() -> Self {
        Self {
            converged: true,
            iterations: 0,
            final_distance: 0.0,
        }
    }
}

/// FABRIK (Forward And Backward Reaching IK) with an optional pole pass.
pub struct FabrikSolver;

impl FabrikSolver {
    /// Reaches for `target` keeping the base joint fixed.
    pub fn solve(chain: &mut Chain, target: Vec3) -> SolveResult {
        if chain.joints.len() < 2 {
            return SolveResult::trivial();
        }

        let base = chain.joints[0];
        let distance_to_target = (target - base).length();
        let total_length = chain.total_length();

        if distance_to_target > total_length {
            Self::stretch_towards_target(chain, base, target);
            return SolveResult {
                converged: false,
                iterations: 1,
                final_distance: distance_to_target - total_length,
            };
        }

        let mut final_distance = Self::reach_error(chain, target);
        for iteration in 0..chain.max_iterations {
            Self::forward_pass(chain, target);
            Self::backward_pass(chain, base);

            final_distance = Self::reach_error(chain, target);
            if final_distance <= chain.tolerance {
                return SolveResult {
                    converged: true,
                    iterations: iteration + 1,
                    final_distance,
                };
            }
        }

        SolveResult {
            converged: final_distance <= chain.tolerance,
            iterations: chain.max_iterations,
            final_distance,
        }
    }

    /// Solves, then swings the interior joints toward `pole`.
    pub fn solve_with_pole(chain: &mut Chain, target: Vec3, pole: Vec3, pole_weight: f32) -> SolveResult {
        let result = Self::solve(chain, target);
        Self::apply_pole(chain, pole, pole_weight);
        result
    }

    /// Rotates each interior joint about the line through its neighbours so
    /// that it leans toward `pole`. Bone lengths are unchanged.
    pub fn apply_pole(chain: &mut Chain, pole: Vec3, weight: f32) {
        let weight = weight.clamp(0.0, 1.0);
        if weight <= 0.0 {
            return;
        }

        let n = chain.joints.len();
        for i in 1..n.saturating_sub(1) {
            let prev = chain.joints[i - 1];
            let next = chain.joints[i + 1];
            let axis = (next - prev).normalize_or_zero();
            if axis == Vec3::ZERO {
                continue;
            }

            let joint_offset = Self::reject(chain.joints[i] - prev, axis);
            let pole_offset = Self::reject(pole - prev, axis);
            if joint_offset.length_squared() < 1e-8 || pole_offset.length_squared() < 1e-8 {
                continue;
            }

            let mut angle = joint_offset.angle_between(pole_offset);
            if joint_offset.cross(pole_offset).dot(axis) < 0.0 {
                angle = -angle;
            }

            let rotation = Quat::from_axis_angle(axis, angle * weight);
            chain.joints[i] = prev + rotation * (chain.joints[i] - prev);
        }
    }

    fn reject(v: Vec3, axis: Vec3) -> Vec3 {
        v - axis * v.dot(axis)
    }

    fn reach_error(chain: &Chain, target: Vec3) -> f32 {
        chain
            .joints
            .last()
            .map_or(0.0, |end| (*end - target).length())
    }

    fn forward_pass(chain: &mut Chain, target: Vec3) {
        let n = chain.joints.len();
        chain.joints[n - 1] = target;

        for i in (0..n - 1).rev() {
            let next = chain.joints[i + 1];
            let direction = Self::direction_or_up(chain.joints[i] - next);
            chain.joints[i] = next + direction * chain.bone_lengths[i];
        }
    }

    fn backward_pass(chain: &mut Chain, base: Vec3) {
        chain.joints[0] = base;

        for i in 1..chain.joints.len() {
            let prev = chain.joints[i - 1];
            let direction = Self::direction_or_up(chain.joints[i] - prev);
            chain.joints[i] = prev + direction * chain.bone_lengths[i - 1];
        }
    }

    fn stretch_towards_target(chain: &mut Chain, base: Vec3, target: Vec3) {
        let direction = (target - base).normalize_or_zero();
        if direction == Vec3::ZERO {
            return;
        }

        chain.joints[0] = base;
        for i in 1..chain.joints.len() {
            chain.joints[i] = chain.joints[i - 1] + direction * chain.bone_lengths[i - 1];
        }
    }

    fn direction_or_up(v: Vec3) -> Vec3 {
        let len = v.length();
        if len > 0.0001 {
            v / len
        } else {
            Vec3::Y
        }
    }
}
