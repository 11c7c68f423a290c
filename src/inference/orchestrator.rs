//! Lip-sync run orchestration
//!
//! Validates inputs, persists the task config, clears stale outputs, invokes
//! the backend, then locates the generated media file and copies it to the
//! requested destination. The backend's exit status never decides success:
//! only the presence of a result file does.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{MusekitError, Result};
use crate::inference::backend::{BackendContext, InferenceBackend};
use crate::inference::config::{InferenceConfig, RESULT_NAME, TASK_ID};
use crate::inference::request::{InferenceRequest, RunSummary};
use crate::layout::WorkspaceLayout;

/// Extensions the result scan accepts.
const MEDIA_EXTENSIONS: [&str; 2] = ["mp4", "avi"];

/// Runs lip-sync jobs against a pluggable backend.
pub struct Orchestrator {
    layout: WorkspaceLayout,
    backend: Box<dyn InferenceBackend>,
}

impl Orchestrator {
    pub fn new(layout: WorkspaceLayout, backend: Box<dyn InferenceBackend>) -> Self {
        Self { layout, backend }
    }

    /// Run one job to completion.
    ///
    /// Missing inputs abort before any side effect. Everything after the
    /// input check propagates as an error for the CLI boundary to log and
    /// convert to an exit code.
    pub fn run(&self, request: &InferenceRequest) -> Result<RunSummary> {
        if !request.video_path.exists() {
            return Err(MusekitError::MissingInput {
                path: request.video_path.clone(),
            });
        }
        if !request.audio_path.exists() {
            return Err(MusekitError::MissingInput {
                path: request.audio_path.clone(),
            });
        }

        info!("Video: {}", request.video_path.display());
        info!("Audio: {}", request.audio_path.display());
        info!("Output: {}", request.output_path.display());
        info!("Expression control (bbox_shift): {}", request.params.bbox_shift);
        info!("Batch size: {}", request.params.batch_size);

        let config_path = self.layout.inference_config_path();
        InferenceConfig::for_request(request).write(&config_path)?;
        debug!("Wrote inference config: {}", config_path.display());

        let result_dir = result_dir_for(&request.output_path);
        self.clean_stale_outputs(result_dir);

        let ctx = BackendContext {
            config_path: &config_path,
            result_dir,
            params: &request.params,
            layout: &self.layout,
        };
        self.backend.run(&ctx)?;

        let source_path = self.find_result(result_dir)?;
        fs::copy(&source_path, &request.output_path).map_err(|source| {
            MusekitError::ResultCopy {
                source_path: source_path.clone(),
                dest: request.output_path.clone(),
                source,
            }
        })?;

        let size_bytes = fs::metadata(&request.output_path)?.len();
        Ok(RunSummary {
            output_path: request.output_path.clone(),
            source_path,
            size_bytes,
        })
    }

    /// Best-effort removal of non-temp `.mp4` files left from prior runs.
    fn clean_stale_outputs(&self, result_dir: &Path) {
        let entries = match fs::read_dir(result_dir) {
            Ok(entries) => entries,
            Err(_) => return,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if name.ends_with(".mp4") && !name.contains("temp") {
                if let Err(err) = fs::remove_file(&path) {
                    debug!("Could not remove stale output {}: {err}", path.display());
                }
            }
        }
    }

    /// Locate the generated media file in the result directory.
    ///
    /// Candidates are sorted lexicographically so selection is reproducible
    /// across platforms; a file carrying the result marker wins over the
    /// rest.
    fn find_result(&self, result_dir: &Path) -> Result<PathBuf> {
        let mut candidates: Vec<PathBuf> = WalkDir::new(result_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_result_candidate(path))
            .collect();
        candidates.sort();

        if candidates.is_empty() {
            warn!("No output files found in {}", result_dir.display());
            return Err(MusekitError::NoOutput {
                result_dir: result_dir.to_path_buf(),
            });
        }

        // The marker may sit in a parent directory name (the inference
        // process nests results under the task id), so match the full path.
        let marked = candidates.iter().find(|path| {
            let path_str = path.to_string_lossy();
            path_str.contains(result_stem()) || path_str.contains(TASK_ID)
        });

        Ok(marked.unwrap_or(&candidates[0]).clone())
    }
}

/// The result directory is the output path's parent; a bare file name means
/// the current directory.
fn result_dir_for(output_path: &Path) -> &Path {
    match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn is_result_candidate(path: &Path) -> bool {
    let extension_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| MEDIA_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    let name_ok = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|name| !name.contains("temp"))
        .unwrap_or(false);
    extension_ok && name_ok
}

fn result_stem() -> &'static str {
    RESULT_NAME.trim_end_matches(".mp4")
}
