//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command. Commands print their
//! operator-facing report here and hand a pass/fail signal back to `main`,
//! which owns the process exit code.

use std::fs;
use std::path::PathBuf;

use log::info;

use crate::error::Result;
use crate::inference::{
    InferenceParams, InferenceRequest, Orchestrator, RunSummary, ScriptBackend,
};
use crate::layout::WorkspaceLayout;
use crate::provision::{FetchStatus, ProvisionReport, Provisioner};
use crate::repair::{
    accelerator_summary, audit_model_files, create_missing_directories,
    mirror_whisper_files, reinstall_runtime_deps, repin_xformers, FixOutcome, FixStatus,
};

/// Run one lip-sync job end to end.
pub fn infer(
    layout: WorkspaceLayout,
    video: PathBuf,
    audio: PathBuf,
    output: Option<PathBuf>,
    params: InferenceParams,
) -> Result<RunSummary> {
    let output_path = output.unwrap_or_else(|| layout.default_output_path());

    println!("{:=<60}", "");
    println!("MuseTalk Lip-Sync Inference");
    println!("{:=<60}", "");

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let request = InferenceRequest {
        video_path: video,
        audio_path: audio,
        output_path,
        params,
    };

    let orchestrator = Orchestrator::new(layout, Box::new(ScriptBackend::new()));
    let summary = orchestrator.run(&request)?;

    println!("{:=<60}", "");
    println!("SUCCESS! Generated: {}", summary.output_path.display());
    println!("File size: {:.1} MB", summary.size_mb());
    println!("{:=<60}", "");

    Ok(summary)
}

/// Provision all model artifacts and print the verification report.
///
/// Returns the report; completeness decides the exit code.
pub fn download(layout: WorkspaceLayout) -> ProvisionReport {
    println!("{:=<60}", "");
    println!("MuseTalk Model Download");
    println!("{:=<60}", "");

    let report = Provisioner::new(layout).provision();

    for outcome in &report.outcomes {
        let marker = match outcome.status {
            FetchStatus::Downloaded => "downloaded",
            FetchStatus::AlreadyPresent => "present",
            FetchStatus::Failed => "FAILED",
        };
        println!("  [{marker}] {}", outcome.target.display());
        if let Some(detail) = &outcome.detail {
            println!("           {detail}");
        }
    }

    println!("\nVerifying critical files...");
    for file in &report.verification {
        match file.size_bytes {
            Some(size) => println!(
                "  ok {} ({:.1} MB)",
                file.path.display(),
                size as f64 / (1024.0 * 1024.0)
            ),
            None => println!("  MISSING {}", file.path.display()),
        }
    }

    let missing = report.missing();
    if missing.is_empty() {
        println!("\nAll models downloaded successfully");
    } else {
        println!(
            "\nWARNING: {} critical files are missing, download them manually",
            missing.len()
        );
    }

    report
}

/// Run every repair procedure and print the setup report. Always succeeds;
/// the audit result feeds only the printed summary.
pub fn doctor(layout: WorkspaceLayout) -> bool {
    println!("{:=<60}", "");
    println!("MuseTalk Environment Doctor");
    println!("{:=<60}", "");

    print_outcomes("Directories", &create_missing_directories(&layout));
    print_outcomes("Dependencies", &reinstall_runtime_deps(&layout.python));
    print_outcomes("xformers", &[repin_xformers(&layout.python)]);
    print_outcomes("Whisper paths", &mirror_whisper_files(&layout));

    println!("\nAccelerator:");
    for line in accelerator_summary().lines() {
        println!("  {line}");
    }

    println!("\nModel files:");
    let audit = audit_model_files(&layout);
    for entry in &audit.entries {
        match entry.size_mb() {
            Some(mb) => println!("  ok {}: {mb:.1}MB", entry.description),
            None => println!("  MISSING {}", entry.description),
        }
    }

    println!("{:=<60}", "");
    if audit.is_complete() {
        println!("All model files present");
        println!("Run: musekit-cli infer --help for inference");
    } else {
        println!(
            "{} required files missing - run: musekit-cli download",
            audit.missing().len()
        );
    }
    println!("{:=<60}", "");

    audit.is_complete()
}

fn print_outcomes(heading: &str, outcomes: &[FixOutcome]) {
    info!("{heading}: {} items", outcomes.len());
    println!("\n{heading}:");
    for outcome in outcomes {
        match outcome.status {
            FixStatus::Fixed => println!("  fixed {}", outcome.subject),
            FixStatus::AlreadyOk => println!("  ok {}", outcome.subject),
            FixStatus::Failed => println!(
                "  FAILED {}: {}",
                outcome.subject,
                outcome.detail.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}
