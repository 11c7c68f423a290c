//! Environment repair utilities
//!
//! Independent idempotent procedures, each safe to call in isolation and in
//! any order. Batches never abort on a failed item; every procedure returns
//! a per-item outcome list so the caller can print and test what actually
//! happened.

mod audit;
mod deps;
mod gpu;
mod whisper;

pub use audit::{audit_model_files, AuditEntry, AuditReport};
pub use deps::{reinstall_runtime_deps, repin_xformers, RUNTIME_DEPS};
pub use gpu::{accelerator_summary, AcceleratorInfo};
pub use whisper::mirror_whisper_files;

use std::fs;

use log::info;

use crate::layout::WorkspaceLayout;

/// What happened to a single repair item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixStatus {
    Fixed,
    AlreadyOk,
    Failed,
}

/// Per-item result of a repair procedure.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    pub subject: String,
    pub status: FixStatus,
    pub detail: Option<String>,
}

impl FixOutcome {
    pub fn fixed(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            status: FixStatus::Fixed,
            detail: None,
        }
    }

    pub fn already_ok(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            status: FixStatus::AlreadyOk,
            detail: None,
        }
    }

    pub fn failed(subject: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            status: FixStatus::Failed,
            detail: Some(detail.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status != FixStatus::Failed
    }
}

/// Create every expected directory; a directory that exists is a no-op.
pub fn create_missing_directories(layout: &WorkspaceLayout) -> Vec<FixOutcome> {
    info!("Creating missing directories...");

    layout
        .expected_dirs()
        .into_iter()
        .map(|dir| {
            let subject = dir.display().to_string();
            if dir.exists() {
                return FixOutcome::already_ok(subject);
            }
            match fs::create_dir_all(&dir) {
                Ok(()) => {
                    info!("  Created directory: {}", dir.display());
                    FixOutcome::fixed(subject)
                }
                Err(err) => FixOutcome::failed(subject, err.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_directory_creation_is_idempotent() {
        let dir = tempdir().unwrap();
        let layout = WorkspaceLayout::new(dir.path());

        let first = create_missing_directories(&layout);
        assert!(first.iter().all(|o| o.status == FixStatus::Fixed));

        // Second run: everything exists, nothing fails, tree unchanged.
        let second = create_missing_directories(&layout);
        assert_eq!(first.len(), second.len());
        assert!(second.iter().all(|o| o.status == FixStatus::AlreadyOk));
        for expected in layout.expected_dirs() {
            assert!(expected.is_dir());
        }
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(FixOutcome::fixed("a").is_ok());
        assert!(FixOutcome::already_ok("b").is_ok());
        assert!(!FixOutcome::failed("c", "boom").is_ok());
    }
}
