use serde::Deserialize;

use crate::error::{Result, RetargetError};

/// The 17 landmarks reported by the pose source, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum BodyPart {
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
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl BodyPart {
    pub const COUNT: usize = 17;

    pub const ALL: [BodyPart; Self::COUNT] = [
        BodyPart::Nose,
        BodyPart::LeftEye,
        BodyPart::RightEye,
        BodyPart::LeftEar,
        BodyPart::RightEar,
        BodyPart::LeftShoulder,
        BodyPart::RightShoulder,
        BodyPart::LeftElbow,
        BodyPart::RightElbow,
        BodyPart::LeftWrist,
        BodyPart::RightWrist,
        BodyPart::LeftHip,
        BodyPart::RightHip,
        BodyPart::LeftKnee,
        BodyPart::RightKnee,
        BodyPart::LeftAnkle,
        BodyPart::RightAnkle,
    ];

    /// Landmarks that must all be confident before the avatar starts moving.
    pub const CORE_BODY: [BodyPart; 7] = [
        BodyPart::Nose,
        BodyPart::LeftShoulder,
        BodyPart::RightShoulder,
        BodyPart::LeftElbow,
        BodyPart::RightElbow,
        BodyPart::LeftWrist,
        BodyPart::RightWrist,
    ];

    /// Field name used by the pose source.
    pub fn name(self) -> &'static str {
        match self {
            BodyPart::Nose => "nose",
            BodyPart::LeftEye => "leftEye",
            BodyPart::RightEye => "rightEye",
            BodyPart::LeftEar => "leftEar",
            BodyPart::RightEar => "rightEar",
            BodyPart::LeftShoulder => "leftShoulder",
            BodyPart::RightShoulder => "rightShoulder",
            BodyPart::LeftElbow => "leftElbow",
            BodyPart::RightElbow => "rightElbow",
            BodyPart::LeftWrist => "leftWrist",
            BodyPart::RightWrist => "rightWrist",
            BodyPart::LeftHip => "leftHip",
            BodyPart::RightHip => "rightHip",
            BodyPart::LeftKnee => "leftKnee",
            BodyPart::RightKnee => "rightKnee",
            BodyPart::LeftAnkle => "leftAnkle",
            BodyPart::RightAnkle => "rightAnkle",
        }
    }
}

/// A single detection in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Keypoint {
    pub score: f32,
    pub x: f32,
    pub y: f32,
}

impl Keypoint {
    pub fn new(score: f32, x: f32, y: f32) -> Self {
        Self { score, x, y }
    }

    pub fn is_valid(&self, threshold: f32) -> bool {
        self.score >= threshold
    }

    pub fn is_finite(&self) -> bool {
        self.score.is_finite() && self.x.is_finite() && self.y.is_finite()
    }
}

/// One full sample from the pose source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pose {
    pub score: f32,
    pub keypoints: [Keypoint; BodyPart::COUNT],
}

impl Pose {
    pub fn new(score: f32, keypoints: [Keypoint; BodyPart::COUNT]) -> Self {
        Self { score, keypoints }
    }

    /// Parses the source's JSON message. Every keypoint field is required and
    /// must fit in an `f32`.
    pub fn from_json(json: &str) -> Result<Self> {
        let wire: WirePose = serde_json::from_str(json)?;
        let pose: Pose = wire.into();
        if let Some(part) = BodyPart::ALL.into_iter().find(|&part| !pose.get(part).is_finite()) {
            return Err(RetargetError::Parse(format!(
                "{} has a non-finite value",
                part.name()
            )));
        }
        Ok(pose)
    }

    pub fn get(&self, part: BodyPart) -> &Keypoint {
        &self.keypoints[part as usize]
    }

    pub fn get_mut(&mut self, part: BodyPart) -> &mut Keypoint {
        &mut self.keypoints[part as usize]
    }

    /// True when every listed part scores at least `threshold`.
    pub fn all_valid(&self, parts: &[BodyPart], threshold: f32) -> bool {
        parts.iter().all(|&part| self.get(part).is_valid(threshold))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePose {
    #[serde(default)]
    score: f32,
    nose: Keypoint,
    left_eye: Keypoint,
    right_eye: Keypoint,
    left_ear: Keypoint,
    right_ear: Keypoint,
    left_shoulder: Keypoint,
    right_shoulder: Keypoint,
    left_elbow: Keypoint,
    right_elbow: Keypoint,
    left_wrist: Keypoint,
    right_wrist: Keypoint,
    left_hip: Keypoint,
    right_hip: Keypoint,
    left_knee: Keypoint,
    right_knee: Keypoint,
    left_ankle: Keypoint,
    right_ankle: Keypoint,
}

impl From<WirePose> for Pose {
    fn from(w: WirePose) -> Self {
        Pose::new(
            w.score,
            [
                w.nose,
                w.left_eye,
                w.right_eye,
                w.left_ear,
                w.right_ear,
                w.left_shoulder,
                w.right_shoulder,
                w.left_elbow,
                w.right_elbow,
                w.left_wrist,
                w.right_wrist,
                w.left_hip,
                w.right_hip,
                w.left_knee,
                w.right_knee,
                w.left_ankle,
                w.right_ankle,
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose_json(skip: Option<BodyPart>) -> String {
        let fields: Vec<String> = BodyPart::ALL
            .iter()
            .filter(|&&part| Some(part) != skip)
            .enumerate()
            .map(|(i, part)| {
                format!(
                    r#""{}": {{"score": 0.9, "x": {}, "y": {}}}"#,
                    part.name(),
                    i * 10,
                    i * 5
                )
            })
            .collect();
        format!(r#"{{"score": 0.8, {}}}"#, fields.join(", "))
    }

    #[test]
    fn test_all_array_matches_discriminants() {
        for (i, part) in BodyPart::ALL.iter().enumerate() {
            assert_eq!(*part as usize, i);
        }
    }

    #[test]
    fn test_from_json_reads_every_field() {
        let pose = Pose::from_json(&pose_json(None)).unwrap();
        assert_eq!(pose.score, 0.8);
        assert_eq!(pose.get(BodyPart::Nose), &Keypoint::new(0.9, 0.0, 0.0));
        assert_eq!(pose.get(BodyPart::RightAnkle), &Keypoint::new(0.9, 160.0, 80.0));
    }

    #[test]
    fn test_from_json_missing_keypoint_is_parse_error() {
        let err = Pose::from_json(&pose_json(Some(BodyPart::LeftWrist))).unwrap_err();
        match err {
            RetargetError::Parse(msg) => assert!(msg.contains("leftWrist")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_json_garbage_is_parse_error() {
        assert!(matches!(
            Pose::from_json("{\"nose\": 3"),
            Err(RetargetError::Parse(_))
        ));
    }

    #[test]
    fn test_out_of_range_coordinate_is_parse_error() {
        let json = pose_json(None).replacen(r#""x": 50,"#, r#""x": 1e39,"#, 1);
        match Pose::from_json(&json).unwrap_err() {
            RetargetError::Parse(msg) => assert!(msg.contains("leftShoulder")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_score_is_parse_error() {
        let json = pose_json(None).replacen(r#""score": 0.9"#, r#""score": -1e40"#, 1);
        assert!(matches!(Pose::from_json(&json), Err(RetargetError::Parse(_))));
    }

    #[test]
    fn test_overall_score_is_optional() {
        let json = pose_json(None).replacen(r#""score": 0.8, "#, "", 1);
        let pose = Pose::from_json(&json).unwrap();
        assert_eq!(pose.score, 0.0);
    }

    #[test]
    fn test_all_valid_is_inclusive() {
        let mut pose = Pose::default();
        for part in BodyPart::CORE_BODY {
            pose.get_mut(part).score = 0.5;
        }
        assert!(pose.all_valid(&BodyPart::CORE_BODY, 0.5));
        pose.get_mut(BodyPart::RightWrist).score = 0.4999;
        assert!(!pose.all_valid(&BodyPart::CORE_BODY, 0.5));
    }
}
