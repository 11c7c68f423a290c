//! Blocking HTTP retrieval of model artifacts
//!
//! Downloads are sequential and chunked straight to disk. A file already
//! present at its target path short-circuits before any request is made;
//! artifacts are existence-checked, not checksum-verified.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use reqwest::blocking::Client;

use super::artifacts::ModelArtifact;

const CHUNK_SIZE: usize = 32 * 1024;

/// What happened to a single artifact during provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Downloaded,
    AlreadyPresent,
    Failed,
}

/// Per-artifact outcome, collected into the provisioning report.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub description: String,
    pub target: std::path::PathBuf,
    pub status: FetchStatus,
    /// Failure reason, with the full context chain.
    pub detail: Option<String>,
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        self.status != FetchStatus::Failed
    }
}

/// Download one artifact unless it is already on disk.
///
/// Failures are folded into the returned outcome so a bad artifact never
/// aborts the batch.
pub fn ensure_artifact(client: &Client, artifact: &ModelArtifact) -> FetchOutcome {
    if artifact.target.exists() {
        return FetchOutcome {
            description: artifact.description.to_string(),
            target: artifact.target.clone(),
            status: FetchStatus::AlreadyPresent,
            detail: None,
        };
    }

    info!(
        "Downloading {}: {}",
        artifact.description,
        artifact.target.display()
    );

    match fetch_to_file(client, &artifact.url, &artifact.target) {
        Ok(bytes) => {
            info!(
                "Downloaded {} ({:.1} MB)",
                artifact.description,
                bytes as f64 / (1024.0 * 1024.0)
            );
            FetchOutcome {
                description: artifact.description.to_string(),
                target: artifact.target.clone(),
                status: FetchStatus::Downloaded,
                detail: None,
            }
        }
        Err(err) => {
            warn!("Failed to download {}: {err:#}", artifact.description);
            FetchOutcome {
                description: artifact.description.to_string(),
                target: artifact.target.clone(),
                status: FetchStatus::Failed,
                detail: Some(format!("{err:#}")),
            }
        }
    }
}

fn fetch_to_file(client: &Client, url: &str, target: &Path) -> Result<u64> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).context("create target directory")?;
    }

    let mut response = client
        .get(url)
        .send()
        .with_context(|| format!("request {url}"))?
        .error_for_status()
        .with_context(|| format!("download {url}"))?;

    let total_size = response.content_length().unwrap_or(0);

    let mut file = File::create(target)
        .with_context(|| format!("create {}", target.display()))?;
    let mut downloaded = 0u64;
    let mut last_decile = 0;
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let read = response.read(&mut buffer).context("read download chunk")?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read])
            .context("write download chunk")?;
        downloaded += read as u64;
        if total_size > 0 {
            let decile = (downloaded * 10 / total_size) as u32;
            if decile > last_decile {
                last_decile = decile;
                info!("  progress: {}%", decile * 10);
            }
        }
    }

    Ok(downloaded)
}
