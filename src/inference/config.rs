//! Inference config file
//!
//! The external inference entry point reads a YAML document with one task
//! entry keyed by a fixed identifier. The file lives at a conventional path
//! and is overwritten on every run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MusekitError, Result};
use crate::inference::request::InferenceRequest;

/// Fixed task identifier keying the single config entry.
pub const TASK_ID: &str = "task1";

/// Fixed result file name the inference process is asked to produce.
pub const RESULT_NAME: &str = "lipsync_output.mp4";

/// One lip-sync task as the inference process expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub video_path: String,
    pub audio_path: String,
    pub bbox_shift: i32,
    pub result_name: String,
}

/// The full config document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(rename = "task1")]
    pub task: TaskEntry,
}

impl InferenceConfig {
    /// Build the config for a validated request.
    pub fn for_request(request: &InferenceRequest) -> Self {
        Self {
            task: TaskEntry {
                video_path: request.video_path.to_string_lossy().into_owned(),
                audio_path: request.audio_path.to_string_lossy().into_owned(),
                bbox_shift: request.params.bbox_shift,
                result_name: RESULT_NAME.to_string(),
            },
        }
    }

    /// Persist to `path`, creating parent directories and overwriting any
    /// prior content.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| MusekitError::ConfigWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).map_err(|source| MusekitError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::params::InferenceParams;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn request() -> InferenceRequest {
        InferenceRequest {
            video_path: PathBuf::from("input/talk.mp4"),
            audio_path: PathBuf::from("input/speech.wav"),
            output_path: PathBuf::from("output/lipsync_result.mp4"),
            params: InferenceParams {
                bbox_shift: -3,
                ..InferenceParams::default()
            },
        }
    }

    #[test]
    fn test_config_is_keyed_by_task_id() {
        let config = InferenceConfig::for_request(&request());
        let yaml = serde_yaml::to_string(&config).unwrap();

        assert!(yaml.starts_with("task1:"));
        assert!(yaml.contains("video_path: input/talk.mp4"));
        assert!(yaml.contains("bbox_shift: -3"));
        assert!(yaml.contains(&format!("result_name: {RESULT_NAME}")));
    }

    #[test]
    fn test_write_overwrites_prior_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("configs").join("inference.yaml");

        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale: true\n").unwrap();

        let config = InferenceConfig::for_request(&request());
        config.write(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("stale"));
        let parsed: InferenceConfig = serde_yaml::from_str(&written).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("configs").join("inference").join("inference.yaml");

        InferenceConfig::for_request(&request()).write(&path).unwrap();
        assert!(path.exists());
    }
}
