use glam::Vec3;

/// Joint positions joined by rigid bones, base first.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub(crate) joints: Vec<Vec3>,
    pub(crate) bone_lengths: Vec<f32>,
    pub(crate) tolerance: f32,
    pub(crate) max_iterations: u32,
}

impl Chain {
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    /// Shoulder, elbow and hand: the two-bone chain every avatar arm uses.
    pub fn arm(shoulder: Vec3, elbow: Vec3, hand: Vec3) -> Self {
        Self::builder()
            .add_joint(shoulder)
            .add_joint(elbow)
            .add_joint(hand)
            .tolerance(0.0005)
            .max_iterations(16)
            .build()
    }

    pub fn joints(&self) -> &[Vec3] {
        &self.joints
    }

    pub fn bone_lengths(&self) -> &[f32] {
        &self.bone_lengths
    }

    pub fn total_length(&self) -> f32 {
        self.bone_lengths.iter().sum()
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn end_effector(&self) -> Option<Vec3> {
        self.joints.last().copied()
    }

    pub fn base(&self) -> Option<Vec3> {
        self.joints.first().copied()
    }
}

pub struct ChainBuilder {
    joints: Vec<Vec3>,
    tolerance: f32,
    max_iterations: u32,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self {
            joints: Vec::new(),
            tolerance: 0.001,
            max_iterations: 10,
        }
    }

    pub fn add_joint(mut self, position: Vec3) -> Self {
        self.joints.push(position);
        self
    }

    pub fn tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn build(self) -> Chain {
        let bone_lengths = self
            .joints
            .windows(2)
            .map(|w| (w[1] - w[0]).length())
            .collect();
        Chain {
            joints: self.joints,
            bone_lengths,
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
