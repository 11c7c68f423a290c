//! Model artifact catalog
//!
//! Static description of every downloadable file: remote URL, target path
//! under the workspace, and a label for operator-facing messages. Consulted
//! once per provisioning run, never mutated.

use std::path::PathBuf;

use crate::layout::{WorkspaceLayout, WHISPER_FILES};

/// HuggingFace repository holding the MuseTalk weights, used by the bulk
/// download path.
pub const MUSETALK_HF_REPO: &str = "TMElyralab/MuseTalk";

const MUSETALK_BASE: &str = "https://huggingface.co/TMElyralab/MuseTalk/resolve/main";
const WHISPER_BASE: &str = "https://huggingface.co/openai/whisper-tiny/resolve/main";

/// A downloadable model weight or config file.
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    pub url: String,
    pub target: PathBuf,
    pub description: &'static str,
}

impl ModelArtifact {
    fn new(url: impl Into<String>, target: PathBuf, description: &'static str) -> Self {
        Self {
            url: url.into(),
            target,
            description,
        }
    }
}

/// The two MuseTalk 1.5 files fetched individually when the bulk path fails.
pub fn musetalk_v15_artifacts(layout: &WorkspaceLayout) -> Vec<ModelArtifact> {
    vec![
        ModelArtifact::new(
            format!("{MUSETALK_BASE}/musetalkV15/musetalk.json"),
            layout.unet_config(),
            "MuseTalk 1.5 config",
        ),
        ModelArtifact::new(
            format!("{MUSETALK_BASE}/musetalkV15/unet.pth"),
            layout.unet_weights(),
            "MuseTalk 1.5 model weights (3.2GB)",
        ),
    ]
}

/// Supporting models: pose detection, face parsing, backbone, VAE.
///
/// These rarely resolve through the bulk path and are always fetched
/// individually.
pub fn supporting_artifacts(layout: &WorkspaceLayout) -> Vec<ModelArtifact> {
    vec![
        ModelArtifact::new(
            "https://huggingface.co/yzd-v/DWPose/resolve/main/dw-ll_ucoco_384.pth",
            layout.dwpose_dir().join("dw-ll_ucoco_384.pth"),
            "DWPose model",
        ),
        ModelArtifact::new(
            "https://huggingface.co/vivym/face-parsing-bisenet/resolve/main/79999_iter.pth",
            layout.face_parse_dir().join("79999_iter.pth"),
            "Face parsing model",
        ),
        ModelArtifact::new(
            "https://download.pytorch.org/models/resnet18-5c106cde.pth",
            layout.face_parse_dir().join("resnet18-5c106cde.pth"),
            "ResNet-18 backbone",
        ),
        ModelArtifact::new(
            "https://huggingface.co/stabilityai/sd-vae-ft-mse/resolve/main/diffusion_pytorch_model.bin",
            layout.sd_vae_dir().join("diffusion_pytorch_model.bin"),
            "Stable Diffusion VAE",
        ),
        ModelArtifact::new(
            "https://huggingface.co/stabilityai/sd-vae-ft-mse/resolve/main/config.json",
            layout.sd_vae_dir().join("config.json"),
            "VAE config",
        ),
    ]
}

/// Whisper feature-extractor files for the speech-recognition component.
pub fn whisper_artifacts(layout: &WorkspaceLayout) -> Vec<ModelArtifact> {
    WHISPER_FILES
        .iter()
        .map(|name| {
            ModelArtifact::new(
                format!("{WHISPER_BASE}/{name}"),
                layout.whisper_dir().join(name),
                "Whisper feature extractor",
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v15_targets_live_under_v15_dir() {
        let layout = WorkspaceLayout::new("/work");
        for artifact in musetalk_v15_artifacts(&layout) {
            assert!(artifact.target.starts_with(layout.musetalk_v15_dir()));
        }
    }

    #[test]
    fn test_whisper_catalog_covers_all_files() {
        let layout = WorkspaceLayout::new("/work");
        let artifacts = whisper_artifacts(&layout);
        assert_eq!(artifacts.len(), WHISPER_FILES.len());
        for (artifact, name) in artifacts.iter().zip(WHISPER_FILES) {
            assert_eq!(artifact.target, layout.whisper_dir().join(name));
            assert!(artifact.url.ends_with(name));
        }
    }

    #[test]
    fn test_supporting_catalog_spans_model_families() {
        let layout = WorkspaceLayout::new("/work");
        let artifacts = supporting_artifacts(&layout);
        assert_eq!(artifacts.len(), 5);
        assert!(artifacts
            .iter()
            .any(|a| a.target.starts_with(layout.dwpose_dir())));
        assert!(artifacts
            .iter()
            .any(|a| a.target.starts_with(layout.sd_vae_dir())));
    }
}
