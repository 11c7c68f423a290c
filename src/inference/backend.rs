//! Inference backend boundary
//!
//! The orchestrator's sole interface to the actual lip-sync computation:
//! a backend receives the config path and the result directory, and is
//! expected to leave media files in that directory. Success is judged by the
//! orchestrator from the directory contents, never from the backend's exit
//! code, so the production backend surfaces the subprocess output verbatim
//! and only errors when the process cannot be started at all.

use std::path::Path;
use std::process::Command;

use log::{info, warn};

use crate::error::{MusekitError, Result};
use crate::inference::params::InferenceParams;
use crate::layout::WorkspaceLayout;

/// Everything a backend needs to run one task.
pub struct BackendContext<'a> {
    pub config_path: &'a Path,
    pub result_dir: &'a Path,
    pub params: &'a InferenceParams,
    pub layout: &'a WorkspaceLayout,
}

/// A lip-sync computation engine.
///
/// The result-directory contract keeps this narrow enough that the external
/// process could later be swapped for an in-process implementation without
/// touching the orchestration logic.
pub trait InferenceBackend {
    fn run(&self, ctx: &BackendContext<'_>) -> Result<()>;

    fn name(&self) -> &str {
        "inference backend"
    }
}

/// Production backend: spawns the external MuseTalk inference entry point.
pub struct ScriptBackend {
    module: String,
}

impl ScriptBackend {
    pub fn new() -> Self {
        Self {
            module: "scripts.inference".to_string(),
        }
    }
}

impl Default for ScriptBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceBackend for ScriptBackend {
    fn run(&self, ctx: &BackendContext<'_>) -> Result<()> {
        let mut command = Command::new(&ctx.layout.python);
        command
            .args(["-m", &self.module])
            .arg("--inference_config")
            .arg(ctx.config_path)
            .arg("--result_dir")
            .arg(ctx.result_dir)
            .arg("--unet_model_path")
            .arg(ctx.layout.unet_weights())
            .arg("--unet_config")
            .arg(ctx.layout.unet_config())
            .args(["--version", &ctx.params.version])
            .arg("--ffmpeg_path")
            .arg(&ctx.layout.ffmpeg_path)
            .arg("--whisper_dir")
            .arg(ctx.layout.whisper_dir())
            .args(["--batch_size", &ctx.params.batch_size.to_string()])
            .args(["--fps", &ctx.params.fps.to_string()])
            .current_dir(ctx.layout.root());

        info!("Starting inference...");
        // Blocks until the external process exits; there is no timeout.
        let output = command
            .output()
            .map_err(|e| MusekitError::BackendUnavailable {
                reason: format!("failed to spawn {}: {e}", ctx.layout.python),
            })?;

        // Surfaced verbatim for the operator; not parsed for failure.
        if !output.stdout.is_empty() {
            println!("STDOUT:");
            println!("{}", String::from_utf8_lossy(&output.stdout));
        }
        if !output.stderr.is_empty() {
            println!("STDERR:");
            println!("{}", String::from_utf8_lossy(&output.stderr));
        }

        if !output.status.success() {
            warn!(
                "Inference process exited with {}; checking result directory anyway",
                output.status
            );
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "MuseTalk script backend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_backend_name() {
        let backend = ScriptBackend::new();
        assert!(backend.name().contains("MuseTalk"));
    }
}
