//! Inference parameters and expression presets

use serde::{Deserialize, Serialize};

/// Tunable parameters for a lip-sync run.
///
/// Constructed from defaults overlaid with caller overrides, consumed once
/// when the config file and subprocess arguments are built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceParams {
    /// Expression control: 0 = normal, -3 to -7 = less mouth opening.
    pub bbox_shift: i32,
    /// Smaller for stability, larger for speed.
    pub batch_size: u32,
    /// Output frame rate; matches the model's training data.
    pub fps: u32,
    /// Model version tag handed to the inference process.
    pub version: String,
    /// Reserved: expression intensity scaling, passed through untouched.
    pub expression_scale: f32,
}

impl Default for InferenceParams {
    fn default() -> Self {
        Self {
            bbox_shift: 0,
            batch_size: 4,
            fps: 25,
            version: "v15".to_string(),
            expression_scale: 1.0,
        }
    }
}

impl InferenceParams {
    /// Apply an expression preset, overriding `bbox_shift`.
    pub fn with_preset(mut self, preset: ExpressionPreset) -> Self {
        self.bbox_shift = preset.bbox_shift();
        self
    }
}

/// Convenience presets for the expression-shift offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionPreset {
    /// Less mouth opening than the default.
    Natural,
    /// Minimal mouth opening.
    Subtle,
}

impl ExpressionPreset {
    pub fn bbox_shift(self) -> i32 {
        match self {
            Self::Natural => -3,
            Self::Subtle => -5,
        }
    }
}

impl std::fmt::Display for ExpressionPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Natural => write!(f, "natural"),
            Self::Subtle => write!(f, "subtle"),
        }
    }
}
