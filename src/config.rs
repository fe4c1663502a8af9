use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, RetargetError};

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct RetargetConfig {
    #[serde(default)]
    pub canvas: CanvasSize,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub look_at: LookAtWeights,
}

/// Pixel dimensions of the image the keypoints were detected in.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    #[serde(default = "default_canvas_width")]
    pub width: u32,
    #[serde(default = "default_canvas_height")]
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ThresholdConfig {
    /// Every core-body keypoint must reach this before tracking starts.
    #[serde(default = "default_core_body")]
    pub core_body: f32,
    /// Minimum score for a keypoint to drive gaze or a limb.
    #[serde(default = "default_accuracy")]
    pub accuracy: f32,
    /// Below this an ear counts as hidden behind the head.
    #[serde(default = "default_ear_occluded")]
    pub ear_occluded: f32,
    /// Ear/eye length ratio the head turn must exceed to move the gaze.
    #[serde(default = "default_gaze_deflection")]
    pub gaze_deflection: f32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PlacementConfig {
    /// Screen depth used when projecting keypoints into the world.
    #[serde(default = "default_camera_depth")]
    pub camera_depth: f32,
    /// Root smoothing rate per second; one tick moves `min(1, rate * dt)`.
    #[serde(default = "default_torso_smoothing")]
    pub torso_smoothing: f32,
    /// How far past the wrist the hand goal sits, in forearm lengths.
    #[serde(default = "default_hand_extension")]
    pub hand_extension: f32,
}

/// Look-at solver weights, committed together with every gaze target.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct LookAtWeights {
    #[serde(default = "default_look_weight")]
    pub weight: f32,
    #[serde(default = "default_look_body")]
    pub body: f32,
    #[serde(default = "default_look_head")]
    pub head: f32,
    #[serde(default = "default_look_eyes")]
    pub eyes: f32,
    #[serde(default = "default_look_clamp")]
    pub clamp: f32,
}

fn default_canvas_width() -> u32 { 640 }
fn default_canvas_height() -> u32 { 480 }
fn default_core_body() -> f32 { 0.5 }
fn default_accuracy() -> f32 { 0.3 }
fn default_ear_occluded() -> f32 { 0.1 }
fn default_gaze_deflection() -> f32 { 1.3 }
fn default_camera_depth() -> f32 { 15.0 }
fn default_torso_smoothing() -> f32 { 2.0 }
fn default_hand_extension() -> f32 { 0.5 }
fn default_look_weight() -> f32 { 1.0 }
fn default_look_body() -> f32 { 0.1 }
fn default_look_head() -> f32 { 1.0 }
fn default_look_eyes() -> f32 { 0.3 }
fn default_look_clamp() -> f32 { 1.0 }

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parses a `{"width": .., "height": ..}` message from the pose source.
    pub fn from_json(json: &str) -> Result<Self> {
        let canvas: CanvasSize = serde_json::from_str(json)?;
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RetargetError::Parse(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            core_body: default_core_body(),
            accuracy: default_accuracy(),
            ear_occluded: default_ear_occluded(),
            gaze_deflection: default_gaze_deflection(),
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            camera_depth: default_camera_depth(),
            torso_smoothing: default_torso_smoothing(),
            hand_extension: default_hand_extension(),
        }
    }
}

impl Default for LookAtWeights {
    fn default() -> Self {
        Self {
            weight: default_look_weight(),
            body: default_look_body(),
            head: default_look_head(),
            eyes: default_look_eyes(),
            clamp: default_look_clamp(),
        }
    }
}

impl RetargetConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RetargetConfig = toml::from_str(content)?;
        config
            .canvas
            .validate()
            .map_err(|e| RetargetError::Config(e.to_string()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_source_contract() {
        let config = RetargetConfig::default();
        assert_eq!(config.canvas, CanvasSize::new(640, 480));
        assert_eq!(config.thresholds.core_body, 0.5);
        assert_eq!(config.thresholds.accuracy, 0.3);
        assert_eq!(config.thresholds.gaze_deflection, 1.3);
        assert_eq!(config.placement.camera_depth, 15.0);
        assert_eq!(config.placement.torso_smoothing, 2.0);
        assert_eq!(config.look_at.eyes, 0.3);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = RetargetConfig::from_toml_str(
            "[canvas]\nwidth = 1280\n\n[thresholds]\naccuracy = 0.4\n",
        )
        .unwrap();
        assert_eq!(config.canvas, CanvasSize::new(1280, 480));
        assert_eq!(config.thresholds.accuracy, 0.4);
        assert_eq!(config.thresholds.core_body, 0.5);
        assert_eq!(config.placement, PlacementConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = RetargetConfig::from_toml_str("").unwrap();
        assert_eq!(config, RetargetConfig::default());
    }

    #[test]
    fn test_zero_canvas_rejected() {
        let err = RetargetConfig::from_toml_str("[canvas]\nwidth = 0\n").unwrap_err();
        assert!(matches!(err, RetargetError::Config(_)));
    }

    #[test]
    fn test_canvas_from_json() {
        let canvas = CanvasSize::from_json(r#"{"width": 320, "height": 240}"#).unwrap();
        assert_eq!(canvas, CanvasSize::new(320, 240));
        assert!(CanvasSize::from_json(r#"{"width": 0, "height": 240}"#).is_err());
        assert!(CanvasSize::from_json("not json").is_err());
    }
}
