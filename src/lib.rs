//! # pose-retarget
//!
//! Drives an avatar's root, gaze and arms from 2D pose-estimation keypoints.
//!
//! ## Features
//! - Confidence-gated start: the avatar stays put until the whole upper body
//!   is detected once
//! - Root follows the shoulders with frame-rate independent smoothing
//! - Gaze from eye/ear asymmetry, with a dead zone around looking straight on
//! - Mirrored elbow hints and extrapolated hand goals for both arms
//! - Host engines plug in through the [`AvatarRig`] trait; [`SkeletonRig`] is
//!   a standalone implementation with a FABRIK arm solver
//!
//! ## Example
//! ```rust,ignore
//! use pose_retarget::{PoseRetargeter, RetargetConfig, SkeletonRig};
//!
//! let mut retargeter = PoseRetargeter::new(RetargetConfig::default());
//! let mut rig = SkeletonRig::default();
//!
//! // Once per frame
//! retargeter.submit_pose(&json)?;
//! let report = retargeter.update(&mut rig, delta_time);
//! rig.solve();
//! ```

pub mod avatar;
pub mod camera;
pub mod config;
pub mod error;
pub mod ik;
pub mod math;
pub mod pose;
pub mod retarget;
pub mod rig;

pub use avatar::{ArmPose, IkTarget, LookAt, SkeletonLayout, SkeletonRig};
pub use camera::ScreenCamera;
pub use config::{CanvasSize, LookAtWeights, PlacementConfig, RetargetConfig, ThresholdConfig};
pub use error::RetargetError;
pub use ik::{Chain, ChainBuilder, FabrikSolver, SolveResult};
pub use math::Transform;
pub use pose::{BodyPart, Keypoint, PartVector, Pose, PoseVector, TrackedPart};
pub use retarget::{
    Admission, ArmReport, GazeOutcome, LookDirection, Placement, PoseRetargeter, TickReport,
    TrackingState,
};
pub use rig::{AvatarRig, IkGoal, IkHint};
