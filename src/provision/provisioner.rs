//! Provisioning orchestration
//!
//! Tries one bulk fetch of the MuseTalk bundle first, falls back to per-file
//! retrieval, then always fetches the supporting and Whisper sets. A final
//! verification pass over the critical files decides the exit status. Nothing
//! in here raises: every failure lands in the report.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context};
use log::{info, warn};
use reqwest::blocking::Client;

use super::artifacts::{
    musetalk_v15_artifacts, supporting_artifacts, whisper_artifacts, MUSETALK_HF_REPO,
};
use super::downloader::{ensure_artifact, FetchOutcome};
use crate::layout::WorkspaceLayout;

/// How the bulk MuseTalk fetch went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkStatus {
    Succeeded,
    /// Failure reason; individual fallback downloads were attempted instead.
    FellBack(String),
    /// All MuseTalk files were already on disk, nothing was attempted.
    Skipped,
}

/// A critical file checked by the final verification pass.
#[derive(Debug, Clone)]
pub struct VerifiedFile {
    pub path: PathBuf,
    pub size_bytes: Option<u64>,
}

impl VerifiedFile {
    pub fn present(&self) -> bool {
        self.size_bytes.is_some()
    }
}

/// Structured result of a provisioning run.
#[derive(Debug)]
pub struct ProvisionReport {
    pub bulk: BulkStatus,
    pub outcomes: Vec<FetchOutcome>,
    pub verification: Vec<VerifiedFile>,
}

impl ProvisionReport {
    /// True when every critical file is on disk.
    pub fn is_complete(&self) -> bool {
        self.verification.iter().all(VerifiedFile::present)
    }

    pub fn missing(&self) -> Vec<&VerifiedFile> {
        self.verification.iter().filter(|v| !v.present()).collect()
    }
}

/// Fetches the full model tree into the workspace.
pub struct Provisioner {
    layout: WorkspaceLayout,
}

impl Provisioner {
    pub fn new(layout: WorkspaceLayout) -> Self {
        Self { layout }
    }

    /// Run the full provisioning sequence.
    ///
    /// Network and filesystem errors are caught per file and never propagate
    /// past this call; the report carries the per-artifact outcomes.
    pub fn provision(&self) -> ProvisionReport {
        let client = Client::new();
        let mut outcomes = Vec::new();

        let v15 = musetalk_v15_artifacts(&self.layout);
        let bulk = if v15.iter().all(|a| a.target.exists()) {
            info!("MuseTalk files already present, skipping bulk download");
            BulkStatus::Skipped
        } else {
            match self.bulk_download() {
                Ok(()) => {
                    info!("Bulk MuseTalk download succeeded");
                    BulkStatus::Succeeded
                }
                Err(err) => {
                    warn!("Bulk MuseTalk download failed: {err:#}");
                    info!("Falling back to per-file download");
                    BulkStatus::FellBack(format!("{err:#}"))
                }
            }
        };

        // Per-file fallback also covers a bulk run that exited zero but left
        // files behind: anything present is skipped by the existence check.
        if bulk != BulkStatus::Skipped {
            for artifact in &v15 {
                outcomes.push(ensure_artifact(&client, artifact));
            }
        }

        info!("Downloading supporting models...");
        for artifact in supporting_artifacts(&self.layout) {
            outcomes.push(ensure_artifact(&client, &artifact));
        }

        info!("Setting up Whisper models...");
        for artifact in whisper_artifacts(&self.layout) {
            outcomes.push(ensure_artifact(&client, &artifact));
        }

        let verification = self.verify();

        ProvisionReport {
            bulk,
            outcomes,
            verification,
        }
    }

    /// Final verification pass: existence and size of every critical file.
    pub fn verify(&self) -> Vec<VerifiedFile> {
        self.layout
            .critical_files()
            .into_iter()
            .map(|path| {
                let size_bytes = fs::metadata(&path).ok().map(|m| m.len());
                VerifiedFile { path, size_bytes }
            })
            .collect()
    }

    /// One all-in-one fetch of the MuseTalk bundle via the HuggingFace CLI.
    fn bulk_download(&self) -> anyhow::Result<()> {
        let models_dir = self.layout.models_dir();
        fs::create_dir_all(&models_dir).context("create models directory")?;

        let status = Command::new("hf")
            .arg("download")
            .arg(MUSETALK_HF_REPO)
            .arg("--local-dir")
            .arg(&models_dir)
            .args(["--include", "musetalk/*"])
            .args(["--include", "musetalkV15/*"])
            .status()
            .context("spawn hf CLI")?;

        if !status.success() {
            bail!("hf CLI exited with {status}");
        }
        Ok(())
    }
}
