use glam::Vec3;

use super::keypoint::{BodyPart, Keypoint, Pose};
use crate::config::CanvasSize;

/// The 13 landmarks the retargeter works with (knees and ankles dropped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum TrackedPart {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
}

impl TrackedPart {
    pub const COUNT: usize = 13;

    pub const ALL: [TrackedPart; Self::COUNT] = [
        TrackedPart::Nose,
        TrackedPart::LeftEye,
        TrackedPart::RightEye,
        TrackedPart::LeftEar,
        TrackedPart::RightEar,
        TrackedPart::LeftShoulder,
        TrackedPart::RightShoulder,
        TrackedPart::LeftElbow,
        TrackedPart::RightElbow,
        TrackedPart::LeftWrist,
        TrackedPart::RightWrist,
        TrackedPart::LeftHip,
        TrackedPart::RightHip,
    ];

    pub fn body_part(self) -> BodyPart {
        match self {
            TrackedPart::Nose => BodyPart::Nose,
            TrackedPart::LeftEye => BodyPart::LeftEye,
            TrackedPart::RightEye => BodyPart::RightEye,
            TrackedPart::LeftEar => BodyPart::LeftEar,
            TrackedPart::RightEar => BodyPart::RightEar,
            TrackedPart::LeftShoulder => BodyPart::LeftShoulder,
            TrackedPart::RightShoulder => BodyPart::RightShoulder,
            TrackedPart::LeftElbow => BodyPart::LeftElbow,
            TrackedPart::RightElbow => BodyPart::RightElbow,
            TrackedPart::LeftWrist => BodyPart::LeftWrist,
            TrackedPart::RightWrist => BodyPart::RightWrist,
            TrackedPart::LeftHip => BodyPart::LeftHip,
            TrackedPart::RightHip => BodyPart::RightHip,
        }
    }
}

/// A keypoint moved into screen space: both axes flipped against the canvas,
/// z left at zero for the caller to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartVector {
    pub score: f32,
    pub position: Vec3,
}

impl PartVector {
    pub fn new(score: f32, position: Vec3) -> Self {
        Self { score, position }
    }

    pub fn from_keypoint(keypoint: &Keypoint, canvas: CanvasSize) -> Self {
        let origin = Vec3::new(canvas.width as f32, canvas.height as f32, 0.0);
        let pixel = Vec3::new(keypoint.x, keypoint.y, 0.0);
        Self {
            score: keypoint.score,
            position: origin - pixel,
        }
    }

    pub fn is_valid(&self, threshold: f32) -> bool {
        self.score >= threshold
    }

    /// Position with z replaced, ready for screen-to-world projection.
    pub fn at_depth(&self, depth: f32) -> Vec3 {
        self.position.with_z(depth)
    }
}

/// Immutable per-sample snapshot read by every placement step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PoseVector {
    parts: [PartVector; TrackedPart::COUNT],
}

impl PoseVector {
    pub fn from_pose(pose: &Pose, canvas: CanvasSize) -> Self {
        let parts = TrackedPart::ALL
            .map(|part| PartVector::from_keypoint(pose.get(part.body_part()), canvas));
        Self { parts }
    }

    pub fn get(&self, part: TrackedPart) -> &PartVector {
        &self.parts[part as usize]
    }

    pub fn all_valid(&self, parts: &[TrackedPart], threshold: f32) -> bool {
        parts.iter().all(|&part| self.get(part).is_valid(threshold))
    }

    pub fn parts(&self) -> &[PartVector] {
        &self.parts
    }
}
