//! Whisper path mirroring
//!
//! Different MuseTalk code paths load the Whisper feature extractor from
//! different directories. This fix finds the first alias directory holding a
//! complete file set and copies each file into every alias location that is
//! missing it.

use std::fs;
use std::path::PathBuf;

use log::info;

use super::{FixOutcome, FixStatus};
use crate::layout::{WorkspaceLayout, WHISPER_FILES};

/// Duplicate the Whisper files into every alias directory.
pub fn mirror_whisper_files(layout: &WorkspaceLayout) -> Vec<FixOutcome> {
    info!("Fixing Whisper model paths...");

    let aliases = layout.whisper_alias_dirs();
    let mut outcomes = Vec::new();

    for dir in &aliases {
        let subject = dir.display().to_string();
        match fs::create_dir_all(dir) {
            Ok(()) => {}
            Err(err) => {
                outcomes.push(FixOutcome::failed(subject, err.to_string()));
                continue;
            }
        }
    }

    let source_dir = match find_complete_set(&aliases) {
        Some(dir) => dir,
        None => {
            outcomes.push(FixOutcome::failed(
                "whisper file set",
                "no alias directory holds a complete set; run the download first",
            ));
            return outcomes;
        }
    };

    for target_dir in &aliases {
        if *target_dir == source_dir {
            continue;
        }
        for name in WHISPER_FILES {
            let src = source_dir.join(name);
            let dst = target_dir.join(name);
            let subject = dst.display().to_string();
            if !src.exists() {
                continue;
            }
            if dst.exists() {
                outcomes.push(FixOutcome::already_ok(subject));
                continue;
            }
            match fs::copy(&src, &dst) {
                Ok(_) => {
                    info!("  Copied {} to {}", name, target_dir.display());
                    outcomes.push(FixOutcome::fixed(subject));
                }
                Err(err) => outcomes.push(FixOutcome::failed(subject, err.to_string())),
            }
        }
    }

    if outcomes.iter().all(|o| o.status == FixStatus::AlreadyOk) {
        info!("  All alias locations already populated");
    }

    outcomes
}

/// First alias directory holding a usable Whisper file set.
///
/// Presence of `config.json` marks a directory as the source; the copy loop
/// skips any individual file the source is missing.
fn find_complete_set(aliases: &[PathBuf]) -> Option<PathBuf> {
    aliases
        .iter()
        .find(|dir| dir.join("config.json").exists())
        .cloned()
}
