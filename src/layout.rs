//! Workspace layout
//!
//! Every conventional path the toolkit reads or writes is declared here once
//! and threaded through the provisioner, orchestrator, and repair procedures.
//! The external inference entry point expects this exact tree, so the
//! directory names are part of the subprocess contract, not a style choice.

use std::path::{Path, PathBuf};

/// File names that make up a complete Whisper feature-extractor install.
pub const WHISPER_FILES: [&str; 3] = [
    "config.json",
    "preprocessor_config.json",
    "pytorch_model.bin",
];

/// Default output file name for the `infer` command.
pub const DEFAULT_RESULT_FILE: &str = "lipsync_result.mp4";

/// All paths used by musekit, rooted at one workspace directory.
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    root: PathBuf,
    /// Path to the ffmpeg binary handed to the inference process.
    pub ffmpeg_path: PathBuf,
    /// Python interpreter used for the inference process and pip fixes.
    pub python: String,
}

impl WorkspaceLayout {
    /// Create a layout rooted at the given workspace directory.
    ///
    /// The interpreter defaults to `python` and can be overridden with the
    /// `MUSEKIT_PYTHON` environment variable.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let python =
            std::env::var("MUSEKIT_PYTHON").unwrap_or_else(|_| "python".to_string());

        Self {
            root: root.into(),
            ffmpeg_path: PathBuf::from("/usr/bin/ffmpeg"),
            python,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn models_dir(&self) -> PathBuf {
        self.root.join("models")
    }

    pub fn musetalk_dir(&self) -> PathBuf {
        self.models_dir().join("musetalk")
    }

    pub fn musetalk_v15_dir(&self) -> PathBuf {
        self.models_dir().join("musetalkV15")
    }

    pub fn syncnet_dir(&self) -> PathBuf {
        self.models_dir().join("syncnet")
    }

    pub fn dwpose_dir(&self) -> PathBuf {
        self.models_dir().join("dwpose")
    }

    pub fn face_parse_dir(&self) -> PathBuf {
        self.models_dir().join("face-parse-bisent")
    }

    pub fn sd_vae_dir(&self) -> PathBuf {
        self.models_dir().join("sd-vae")
    }

    pub fn whisper_dir(&self) -> PathBuf {
        self.models_dir().join("whisper")
    }

    /// Directories different MuseTalk code paths expect Whisper files in.
    ///
    /// The first entry is the canonical location; the rest are aliases that
    /// the repair utility keeps populated.
    pub fn whisper_alias_dirs(&self) -> Vec<PathBuf> {
        vec![
            self.whisper_dir(),
            self.models_dir().join("whisper-tiny"),
            self.models_dir().join("openai").join("whisper-tiny"),
        ]
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join("configs").join("inference")
    }

    /// The inference config file, overwritten on every orchestrator run.
    pub fn inference_config_path(&self) -> PathBuf {
        self.config_dir().join("inference.yaml")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join("output")
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root.join("input")
    }

    pub fn default_output_path(&self) -> PathBuf {
        self.output_dir().join(DEFAULT_RESULT_FILE)
    }

    /// MuseTalk 1.5 UNet weights, passed to the inference process.
    pub fn unet_weights(&self) -> PathBuf {
        self.musetalk_v15_dir().join("unet.pth")
    }

    /// MuseTalk 1.5 UNet architecture config, passed to the inference process.
    pub fn unet_config(&self) -> PathBuf {
        self.musetalk_v15_dir().join("musetalk.json")
    }

    /// Every directory the toolkit expects to exist.
    pub fn expected_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![
            self.musetalk_dir(),
            self.musetalk_v15_dir(),
            self.syncnet_dir(),
            self.dwpose_dir(),
            self.face_parse_dir(),
            self.sd_vae_dir(),
        ];
        dirs.extend(self.whisper_alias_dirs());
        dirs.push(self.config_dir());
        dirs.push(self.output_dir());
        dirs.push(self.input_dir());
        dirs
    }

    /// Files whose absence means the install cannot run at all.
    pub fn critical_files(&self) -> Vec<PathBuf> {
        vec![
            self.unet_weights(),
            self.unet_config(),
            self.whisper_dir().join("config.json"),
            self.dwpose_dir().join("dw-ll_ucoco_384.pth"),
        ]
    }

    /// Full required-file list audited by the doctor command.
    pub fn required_files(&self) -> Vec<(PathBuf, &'static str)> {
        vec![
            (self.unet_weights(), "MuseTalk 1.5 model weights"),
            (self.unet_config(), "MuseTalk 1.5 config"),
            (self.whisper_dir().join("config.json"), "Whisper config"),
            (
                self.whisper_dir().join("preprocessor_config.json"),
                "Whisper preprocessor config",
            ),
            (self.dwpose_dir().join("dw-ll_ucoco_384.pth"), "DWPose model"),
            (
                self.face_parse_dir().join("79999_iter.pth"),
                "Face parsing model",
            ),
            (
                self.sd_vae_dir().join("diffusion_pytorch_model.bin"),
                "VAE model",
            ),
            (self.sd_vae_dir().join("config.json"), "VAE config"),
        ]
    }
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paths_are_rooted() {
        let layout = WorkspaceLayout::new("/work");
        assert_eq!(
            layout.unet_weights(),
            PathBuf::from("/work/models/musetalkV15/unet.pth")
        );
        assert_eq!(
            layout.inference_config_path(),
            PathBuf::from("/work/configs/inference/inference.yaml")
        );
    }

    #[test]
    fn test_whisper_aliases_start_with_canonical_dir() {
        let layout = WorkspaceLayout::new("/work");
        let aliases = layout.whisper_alias_dirs();
        assert_eq!(aliases[0], layout.whisper_dir());
        assert_eq!(aliases.len(), 3);
    }

    #[test]
    fn test_critical_files_are_subset_of_required() {
        let layout = WorkspaceLayout::new(".");
        let required: Vec<PathBuf> = layout
            .required_files()
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        for critical in layout.critical_files() {
            assert!(required.contains(&critical), "{critical:?} not audited");
        }
    }

    #[test]
    fn test_expected_dirs_cover_model_families() {
        let layout = WorkspaceLayout::new(".");
        let dirs = layout.expected_dirs();
        assert!(dirs.contains(&layout.dwpose_dir()));
        assert!(dirs.contains(&layout.config_dir()));
        assert!(dirs.contains(&layout.output_dir()));
    }
}
