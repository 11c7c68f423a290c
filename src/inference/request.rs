//! Inference request and result types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::inference::params::InferenceParams;

/// A single lip-sync job: two input files, a destination, and parameters.
///
/// Both input paths must exist on disk before the backend is invoked; the
/// orchestrator rejects the request before any side effect otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub video_path: PathBuf,
    pub audio_path: PathBuf,
    pub output_path: PathBuf,
    pub params: InferenceParams,
}

/// Successful run: where the result landed and how big it is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Destination the result was copied to.
    pub output_path: PathBuf,
    /// The generated file the result was copied from.
    pub source_path: PathBuf,
    pub size_bytes: u64,
}

impl RunSummary {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mb_conversion() {
        let summary = RunSummary {
            output_path: PathBuf::from("output/lipsync_result.mp4"),
            source_path: PathBuf::from("output/lipsync_output.mp4"),
            size_bytes: 3 * 1024 * 1024,
        };
        assert!((summary.size_mb() - 3.0).abs() < f64::EPSILON);
    }
}
