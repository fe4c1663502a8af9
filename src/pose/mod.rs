//! Pose samples as received from the pose source, and the screen-space
//! snapshot derived from them.

mod keypoint;
mod vector;

pub use keypoint::{BodyPart, Keypoint, Pose};
pub use vector::{PartVector, PoseVector, TrackedPart};
