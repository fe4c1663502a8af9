//! Inverse kinematics module
//!
//! FABRIK chains used by the reference rig to pose each arm from its hand
//! goal and elbow hint.

pub mod chain;
pub mod solver;

pub use chain::{Chain, ChainBuilder};
pub use solver::{FabrikSolver, SolveResult};
