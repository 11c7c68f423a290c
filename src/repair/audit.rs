//! Required-file audit

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::layout::WorkspaceLayout;

/// Presence and size of one required model file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub path: PathBuf,
    pub description: String,
    pub size_bytes: Option<u64>,
}

impl AuditEntry {
    pub fn present(&self) -> bool {
        self.size_bytes.is_some()
    }

    pub fn size_mb(&self) -> Option<f64> {
        self.size_bytes.map(|b| b as f64 / (1024.0 * 1024.0))
    }
}

/// Result of re-checking the required model files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub entries: Vec<AuditEntry>,
}

impl AuditReport {
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(AuditEntry::present)
    }

    pub fn missing(&self) -> Vec<&AuditEntry> {
        self.entries.iter().filter(|e| !e.present()).collect()
    }
}

/// Check every required model file and report per-file presence and size.
///
/// Read-only; the completeness flag feeds the printed summary and the
/// download command's exit status.
pub fn audit_model_files(layout: &WorkspaceLayout) -> AuditReport {
    let entries = layout
        .required_files()
        .into_iter()
        .map(|(path, description)| {
            let size_bytes = fs::metadata(&path).ok().map(|m| m.len());
            AuditEntry {
                path,
                description: description.to_string(),
                size_bytes,
            }
        })
        .collect();

    AuditReport { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_workspace_audit_is_incomplete() {
        let dir = tempdir().unwrap();
        let layout = WorkspaceLayout::new(dir.path());

        let report = audit_model_files(&layout);
        assert!(!report.is_complete());
        assert_eq!(report.missing().len(), report.entries.len());
    }

    #[test]
    fn test_fully_populated_workspace_audit_is_complete() {
        let dir = tempdir().unwrap();
        let layout = WorkspaceLayout::new(dir.path());

        for (path, _) in layout.required_files() {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, b"stub").unwrap();
        }

        let report = audit_model_files(&layout);
        assert!(report.is_complete());
        assert!(report
            .entries
            .iter()
            .all(|e| e.size_mb().is_some()));
    }
}
