//! Per-frame retargeting of pose samples onto an [`AvatarRig`].
//!
//! The retargeter holds nothing until a sample shows the whole upper body
//! with confidence. From then on every sample is accepted and each tick
//! drives the root, the gaze and both arms from the latest one.

pub mod gaze;
pub mod limbs;
pub mod torso;

#[cfg(test)]
pub(crate) mod test_rig;

use glam::Vec3;

use crate::config::{CanvasSize, RetargetConfig};
use crate::error::{Result, RetargetError};
use crate::pose::{BodyPart, Pose, PoseVector};
use crate::rig::AvatarRig;

pub use gaze::{GazeEstimate, GazeOutcome, LookDirection};
pub use limbs::{ArmMapping, ArmReport, Placement, MIRRORED_ARMS};

/// Only ever moves from `AwaitingGate` to `Tracking`.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingState {
    AwaitingGate,
    Tracking(PoseVector),
}

/// What happened to a submitted sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// First confident sample; tracking starts with it.
    Engaged,
    /// Tracking already running, snapshot replaced.
    Replaced,
    /// Core body not confident enough yet. Nothing changed.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub root: Option<Vec3>,
    pub gaze: GazeOutcome,
    pub arms: Option<[ArmReport; 2]>,
}

impl TickReport {
    pub fn idle() -> Self {
        Self {
            root: None,
            gaze: GazeOutcome::Skipped,
            arms: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.root.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct PoseRetargeter {
    config: RetargetConfig,
    state: TrackingState,
}

impl Default for PoseRetargeter {
    fn default() -> Self {
        Self::new(RetargetConfig::default())
    }
}

impl PoseRetargeter {
    pub fn new(config: RetargetConfig) -> Self {
        Self {
            config,
            state: TrackingState::AwaitingGate,
        }
    }

    pub fn config(&self) -> &RetargetConfig {
        &self.config
    }

    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, TrackingState::Tracking(_))
    }

    pub fn canvas(&self) -> CanvasSize {
        self.config.canvas
    }

    /// The snapshot the next tick will read.
    pub fn snapshot(&self) -> Result<&PoseVector> {
        match &self.state {
            TrackingState::Tracking(pose) => Ok(pose),
            TrackingState::AwaitingGate => Err(RetargetError::NotReady),
        }
    }

    /// Parses and submits one JSON sample. A bad sample leaves state as is.
    pub fn submit_pose(&mut self, json: &str) -> Result<Admission> {
        match Pose::from_json(json) {
            Ok(pose) => Ok(self.submit(&pose)),
            Err(err) => {
                log::warn!("dropping pose sample: {}", err);
                Err(err)
            }
        }
    }

    pub fn submit(&mut self, pose: &Pose) -> Admission {
        match self.state {
            TrackingState::Tracking(_) => {
                self.state = TrackingState::Tracking(PoseVector::from_pose(pose, self.config.canvas));
                Admission::Replaced
            }
            TrackingState::AwaitingGate => {
                if !pose.all_valid(&BodyPart::CORE_BODY, self.config.thresholds.core_body) {
                    log::debug!("core body below {}, waiting", self.config.thresholds.core_body);
                    return Admission::Rejected;
                }
                log::info!("core body visible, tracking started");
                self.state = TrackingState::Tracking(PoseVector::from_pose(pose, self.config.canvas));
                Admission::Engaged
            }
        }
    }

    /// Switches the source canvas for samples submitted from now on.
    pub fn set_canvas_size(&mut self, json: &str) -> Result<CanvasSize> {
        let canvas = CanvasSize::from_json(json).map_err(|err| {
            log::warn!("ignoring canvas size: {}", err);
            err
        })?;
        log::info!("pose canvas set to {}x{}", canvas.width, canvas.height);
        self.config.canvas = canvas;
        Ok(canvas)
    }

    /// Runs one animation tick. Does nothing until tracking has started.
    pub fn update<R: AvatarRig + ?Sized>(&self, rig: &mut R, delta_time: f32) -> TickReport {
        let pose = match self.snapshot() {
            Ok(pose) => pose,
            Err(_) => return TickReport::idle(),
        };

        let config = &self.config;
        let root = torso::update_torso(pose, rig, &config.placement, delta_time);
        let gaze = gaze::update_gaze(pose, rig, &config.thresholds, config.look_at);
        let arms = limbs::update_arms(pose, rig, &config.thresholds, &config.placement);

        TickReport {
            root: Some(root),
            gaze,
            arms: Some(arms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_rig::FakeRig;
    use super::*;
    use crate::pose::Keypoint;

    fn core_pose(score: f32) -> Pose {
        let mut pose = Pose::default();
        for (i, part) in BodyPart::CORE_BODY.iter().enumerate() {
            *pose.get_mut(*part) = Keypoint::new(score, 100.0 + i as f32 * 40.0, 200.0);
        }
        pose
    }

    #[test]
    fn test_starts_awaiting() {
        let retargeter = PoseRetargeter::default();
        assert!(!retargeter.is_tracking());
        assert!(matches!(retargeter.snapshot(), Err(RetargetError::NotReady)));
    }

    #[test]
    fn test_gate_engages_at_exact_threshold() {
        let mut retargeter = PoseRetargeter::default();
        assert_eq!(retargeter.submit(&core_pose(0.5)), Admission::Engaged);
        assert!(retargeter.is_tracking());
    }

    #[test]
    fn test_gate_rejects_single_weak_part() {
        let mut retargeter = PoseRetargeter::default();
        for part in BodyPart::CORE_BODY {
            let mut pose = core_pose(0.5);
            pose.get_mut(part).score = 0.4999;
            assert_eq!(retargeter.submit(&pose), Admission::Rejected);
        }
        assert_eq!(retargeter.state(), &TrackingState::AwaitingGate);
    }

    #[test]
    fn test_gate_ignores_face_and_legs() {
        let mut retargeter = PoseRetargeter::default();
        let mut pose = core_pose(0.9);
        pose.get_mut(BodyPart::LeftEye).score = 0.0;
        pose.get_mut(BodyPart::RightAnkle).score = 0.0;
        assert_eq!(retargeter.submit(&pose), Admission::Engaged);
    }

    #[test]
    fn test_tracking_accepts_anything_afterwards() {
        let mut retargeter = PoseRetargeter::default();
        retargeter.submit(&core_pose(0.9));
        assert_eq!(retargeter.submit(&core_pose(0.0)), Admission::Replaced);
        assert!(retargeter.is_tracking());
        assert_eq!(retargeter.snapshot().unwrap().get(crate::TrackedPart::Nose).score, 0.0);
    }

    #[test]
    fn test_idle_tick_touches_nothing() {
        let retargeter = PoseRetargeter::default();
        let mut rig = FakeRig::new();
        let report = retargeter.update(&mut rig, 0.016);
        assert!(report.is_idle());
        assert!(rig.projected().is_empty());
        assert_eq!(rig.root, Vec3::ZERO);
        assert!(rig.look_at.is_none());
    }

    #[test]
    fn test_bad_json_keeps_state() {
        let mut retargeter = PoseRetargeter::default();
        retargeter.submit(&core_pose(0.9));
        let before = retargeter.snapshot().unwrap().clone();
        assert!(retargeter.submit_pose("{}").is_err());
        assert_eq!(retargeter.snapshot().unwrap(), &before);
    }

    #[test]
    fn test_canvas_applies_to_later_samples() {
        let mut retargeter = PoseRetargeter::default();
        retargeter.set_canvas_size(r#"{"width": 320, "height": 240}"#).unwrap();
        retargeter.submit(&core_pose(0.9));
        let nose = retargeter.snapshot().unwrap().get(crate::TrackedPart::Nose);
        assert_eq!(nose.position, Vec3::new(220.0, 40.0, 0.0));
    }

    #[test]
    fn test_bad_canvas_keeps_previous() {
        let mut retargeter = PoseRetargeter::default();
        assert!(retargeter.set_canvas_size(r#"{"width": 0, "height": 240}"#).is_err());
        assert_eq!(retargeter.canvas(), CanvasSize::default());
    }
}
