//! Math utilities module

mod transform;

pub use transform::Transform;

pub use glam::{Quat, Vec3};
