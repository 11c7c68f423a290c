//! Integration tests for the inference orchestration pipeline
//!
//! Runs against the mock backend so the external inference process and model
//! weights are never needed.

use std::fs;
use std::path::Path;

use musekit::inference::{
    InferenceParams, InferenceRequest, MockBackend, Orchestrator,
};
use musekit::layout::WorkspaceLayout;
use musekit::MusekitError;
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    layout: WorkspaceLayout,
    request: InferenceRequest,
}

/// A workspace with real input files and an output destination under it.
fn workspace_with_inputs() -> Workspace {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let layout = WorkspaceLayout::new(root);

    let input_dir = layout.input_dir();
    fs::create_dir_all(&input_dir).unwrap();
    let video = input_dir.join("talk.mp4");
    let audio = input_dir.join("speech.wav");
    fs::write(&video, b"video").unwrap();
    fs::write(&audio, b"audio").unwrap();

    let output_dir = layout.output_dir();
    fs::create_dir_all(&output_dir).unwrap();

    let request = InferenceRequest {
        video_path: video,
        audio_path: audio,
        output_path: output_dir.join("final.mp4"),
        params: InferenceParams::default(),
    };

    Workspace {
        _dir: dir,
        layout,
        request,
    }
}

fn orchestrator(layout: &WorkspaceLayout, backend: MockBackend) -> Orchestrator {
    Orchestrator::new(layout.clone(), Box::new(backend))
}

#[test]
fn test_missing_video_fails_before_any_side_effect() {
    let ws = workspace_with_inputs();
    let mut request = ws.request.clone();
    request.video_path = Path::new("does/not/exist.mp4").to_path_buf();

    let result = orchestrator(&ws.layout, MockBackend::silent()).run(&request);

    assert!(matches!(result, Err(MusekitError::MissingInput { .. })));
    // No config was written and the destination was not touched.
    assert!(!ws.layout.inference_config_path().exists());
    assert!(!request.output_path.exists());
}

#[test]
fn test_missing_audio_fails_before_any_side_effect() {
    let ws = workspace_with_inputs();
    let mut request = ws.request.clone();
    request.audio_path = Path::new("does/not/exist.wav").to_path_buf();

    let result = orchestrator(&ws.layout, MockBackend::silent()).run(&request);

    assert!(matches!(result, Err(MusekitError::MissingInput { .. })));
    assert!(!ws.layout.inference_config_path().exists());
}

#[test]
fn test_marker_file_is_preferred_over_other_outputs() {
    let ws = workspace_with_inputs();
    let backend =
        MockBackend::producing(["a.mp4", "b_temp.mp4", "lipsync_output.mp4"]);

    let summary = orchestrator(&ws.layout, backend).run(&ws.request).unwrap();

    // The mock writes each file's name as its content, so the copy is
    // attributable.
    let copied = fs::read_to_string(&ws.request.output_path).unwrap();
    assert_eq!(copied, "lipsync_output.mp4");
    assert!(summary
        .source_path
        .to_string_lossy()
        .contains("lipsync_output"));
}

#[test]
fn test_temp_files_are_never_selected() {
    let ws = workspace_with_inputs();
    let backend = MockBackend::producing(["only_temp.mp4"]);

    let result = orchestrator(&ws.layout, backend).run(&ws.request);

    assert!(matches!(result, Err(MusekitError::NoOutput { .. })));
}

#[test]
fn test_no_output_leaves_destination_untouched() {
    let ws = workspace_with_inputs();

    let result = orchestrator(&ws.layout, MockBackend::silent()).run(&ws.request);

    assert!(matches!(result, Err(MusekitError::NoOutput { .. })));
    assert!(!ws.request.output_path.exists());
}

#[test]
fn test_unmarked_candidates_resolve_to_lexicographically_first() {
    let ws = workspace_with_inputs();
    let backend = MockBackend::producing(["zebra.mp4", "alpha.mp4"]);

    let summary = orchestrator(&ws.layout, backend).run(&ws.request).unwrap();

    assert_eq!(fs::read_to_string(&ws.request.output_path).unwrap(), "alpha.mp4");
    assert!(summary.source_path.ends_with("alpha.mp4"));
}

#[test]
fn test_marker_in_nested_directory_is_found() {
    let ws = workspace_with_inputs();
    // The inference process nests results under the task id.
    let backend = MockBackend::producing(["v15/task1/result.mp4", "stray.mp4"]);

    let summary = orchestrator(&ws.layout, backend).run(&ws.request).unwrap();

    assert_eq!(
        fs::read_to_string(&ws.request.output_path).unwrap(),
        "v15/task1/result.mp4"
    );
    assert!(summary.source_path.to_string_lossy().contains("task1"));
}

#[test]
fn test_stale_outputs_are_cleaned_before_the_run() {
    let ws = workspace_with_inputs();
    let result_dir = ws.request.output_path.parent().unwrap();
    let stale = result_dir.join("stale.mp4");
    let temp = result_dir.join("work_temp.mp4");
    fs::write(&stale, b"old").unwrap();
    fs::write(&temp, b"scratch").unwrap();

    // Backend produces nothing: the stale file must not be rediscovered as a
    // result of this run.
    let result = orchestrator(&ws.layout, MockBackend::silent()).run(&ws.request);

    assert!(matches!(result, Err(MusekitError::NoOutput { .. })));
    assert!(!stale.exists());
    // Temp files belong to the external process and are left alone.
    assert!(temp.exists());
}

#[test]
fn test_successful_run_writes_config_and_reports_size() {
    let ws = workspace_with_inputs();
    let backend = MockBackend::producing(["lipsync_output.mp4"]);

    let summary = orchestrator(&ws.layout, backend).run(&ws.request).unwrap();

    assert_eq!(summary.output_path, ws.request.output_path);
    assert_eq!(summary.size_bytes, "lipsync_output.mp4".len() as u64);

    let config = fs::read_to_string(ws.layout.inference_config_path()).unwrap();
    assert!(config.contains("task1"));
    assert!(config.contains("talk.mp4"));
    assert!(config.contains("bbox_shift: 0"));
}

#[test]
fn test_config_is_overwritten_on_each_run() {
    let ws = workspace_with_inputs();

    let backend = MockBackend::producing(["lipsync_output.mp4"]);
    orchestrator(&ws.layout, backend).run(&ws.request).unwrap();

    let mut shifted = ws.request.clone();
    shifted.params.bbox_shift = -5;
    let backend = MockBackend::producing(["lipsync_output.mp4"]);
    orchestrator(&ws.layout, backend).run(&shifted).unwrap();

    let config = fs::read_to_string(ws.layout.inference_config_path()).unwrap();
    assert!(config.contains("bbox_shift: -5"));
    assert!(!config.contains("bbox_shift: 0"));
}
