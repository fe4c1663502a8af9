use std::fmt;

use crate::rig::IkGoal;

/// Everything that can go wrong between a raw pose sample and the rig.
///
/// None of these are fatal to the frame loop: callers log and carry on with
/// the previous avatar state.
#[derive(Debug)]
pub enum RetargetError {
    /// The sample was not valid JSON or missed a required keypoint.
    Parse(String),
    /// A tick arrived before any pose passed the core-body gate.
    NotReady,
    /// Elbow and wrist coincide, so the forearm has no direction.
    DegenerateGeometry { goal: IkGoal },
    Config(String),
    Io(std::io::Error),
}

impl fmt::Display for RetargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetargetError::Parse(msg) => write!(f, "invalid pose sample: {}", msg),
            RetargetError::NotReady => write!(f, "no pose has passed the core-body gate yet"),
            RetargetError::DegenerateGeometry { goal } => {
                write!(f, "zero-length forearm while placing {:?}", goal)
            }
            RetargetError::Config(msg) => write!(f, "invalid configuration: {}", msg),
            RetargetError::Io(err) => write!(f, "i/o error: {}", err),
        }
    }
}

impl std::error::Error for RetargetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RetargetError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RetargetError {
    fn from(err: serde_json::Error) -> Self {
        RetargetError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for RetargetError {
    fn from(err: toml::de::Error) -> Self {
        RetargetError::Config(err.to_string())
    }
}

impl From<std::io::Error> for RetargetError {
    fn from(err: std::io::Error) -> Self {
        RetargetError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, RetargetError>;
