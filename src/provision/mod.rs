//! Model provisioning
//!
//! This module provides:
//! - The static artifact catalog (URLs and target paths)
//! - Sequential blocking downloads with existence short-circuit
//! - The provisioner with bulk-then-fallback orchestration and the
//!   critical-file verification pass

mod artifacts;
mod downloader;
mod provisioner;

pub use artifacts::{
    musetalk_v15_artifacts, supporting_artifacts, whisper_artifacts, ModelArtifact,
    MUSETALK_HF_REPO,
};
pub use downloader::{ensure_artifact, FetchOutcome, FetchStatus};
pub use provisioner::{BulkStatus, ProvisionReport, Provisioner, VerifiedFile};
