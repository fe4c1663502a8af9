use glam::Vec3;

use crate::config::PlacementConfig;
use crate::pose::{PoseVector, TrackedPart};
use crate::rig::AvatarRig;

/// Fraction of the remaining distance covered this tick.
pub fn smoothing_rate(smoothing: f32, delta_time: f32) -> f32 {
    (smoothing * delta_time).clamp(0.0, 1.0)
}

/// Eases the avatar root horizontally toward the middle of the shoulders.
/// Only x is driven; y and z stay where the host left them.
pub fn update_torso<R: AvatarRig + ?Sized>(
    pose: &PoseVector,
    rig: &mut R,
    placement: &PlacementConfig,
    delta_time: f32,
) -> Vec3 {
    let depth = placement.camera_depth;
    let right = rig.screen_to_world(pose.get(TrackedPart::RightShoulder).at_depth(depth));
    let left = rig.screen_to_world(pose.get(TrackedPart::LeftShoulder).at_depth(depth));

    let current = rig.root_position();
    let target = current.with_x((right.x + left.x) / 2.0);
    if !target.is_finite() {
        log::warn!("shoulder midpoint {:?} is not finite, root left in place", target);
        return current;
    }
    let next = current.lerp(target, smoothing_rate(placement.torso_smoothing, delta_time));

    rig.set_root_position(next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasSize;
    use crate::pose::{BodyPart, Keypoint, Pose};
    use crate::retarget::test_rig::FakeRig;

    fn shoulders(left_x: f32, right_x: f32) -> PoseVector {
        let mut pose = Pose::default();
        *pose.get_mut(BodyPart::LeftShoulder) = Keypoint::new(0.9, left_x, 200.0);
        *pose.get_mut(BodyPart::RightShoulder) = Keypoint::new(0.9, right_x, 200.0);
        PoseVector::from_pose(&pose, CanvasSize::default())
    }

    #[test]
    fn test_rate_is_capped() {
        assert_eq!(smoothing_rate(2.0, 0.5), 1.0);
        assert_eq!(smoothing_rate(2.0, 2.0), 1.0);
        assert!((smoothing_rate(2.0, 0.1) - 0.2).abs() < 1e-6);
        assert_eq!(smoothing_rate(2.0, -1.0), 0.0);
    }

    #[test]
    fn test_half_second_tick_snaps_to_target() {
        // Screen x 640-240=400 and 640-440=200, fake rig divides by 100.
        let pose = shoulders(240.0, 440.0);
        let mut rig = FakeRig::new();
        rig.root = Vec3::new(-5.0, 1.0, 2.0);

        let root = update_torso(&pose, &mut rig, &PlacementConfig::default(), 0.5);
        assert!((root.x - 3.0).abs() < 1e-5);
        assert_eq!(root.y, 1.0);
        assert_eq!(root.z, 2.0);
        assert_eq!(rig.root, root);
    }

    #[test]
    fn test_tenth_second_tick_moves_twenty_percent() {
        let pose = shoulders(240.0, 440.0);
        let mut rig = FakeRig::new();
        rig.root = Vec3::new(-2.0, 0.0, 0.0);

        let root = update_torso(&pose, &mut rig, &PlacementConfig::default(), 0.1);
        // 20% of the way from -2 to 3.
        assert!((root.x - -1.0).abs() < 1e-5);
    }

    #[test]
    fn test_infinite_shoulder_keeps_root() {
        let pose = shoulders(f32::INFINITY, 440.0);
        let mut rig = FakeRig::new();
        rig.root = Vec3::new(1.5, 0.0, 0.0);

        let root = update_torso(&pose, &mut rig, &PlacementConfig::default(), 0.1);
        assert_eq!(root, Vec3::new(1.5, 0.0, 0.0));
        assert_eq!(rig.root, root);

        let root = update_torso(&shoulders(240.0, 440.0), &mut rig, &PlacementConfig::default(), 0.5);
        assert!((root.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_shoulders_projected_at_camera_depth() {
        let pose = shoulders(240.0, 440.0);
        let mut rig = FakeRig::new();
        update_torso(&pose, &mut rig, &PlacementConfig::default(), 0.5);
        let projected = rig.projected();
        assert_eq!(projected.len(), 2);
        assert!(projected.iter().all(|p| p.z == 15.0));
    }
}
