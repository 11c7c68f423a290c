//! Python dependency repair
//!
//! Reinstalls packages the inference runtime needs but tends to lose in
//! rebuilt containers. Per-package failures are recorded and the batch
//! continues; nothing here is fatal.

use std::process::Command;

use anyhow::{bail, Context};
use log::info;

use super::FixOutcome;

/// Packages discovered missing at runtime in the inference environment.
pub const RUNTIME_DEPS: [&str; 7] = [
    "gdown",
    "ffmpeg-python",
    "moviepy",
    "beautifulsoup4",
    "PySocks",
    "librosa",
    "imageio[ffmpeg]",
];

/// xformers build matching the pinned PyTorch CUDA toolchain.
const XFORMERS_PIN: &str = "xformers==0.0.20";

/// Best-effort `pip install` of each runtime dependency.
pub fn reinstall_runtime_deps(python: &str) -> Vec<FixOutcome> {
    info!("Installing missing dependencies...");

    RUNTIME_DEPS
        .iter()
        .map(|package| {
            info!("  Installing {package}...");
            match pip(python, &["install", package]) {
                Ok(()) => FixOutcome::fixed(*package),
                Err(err) => FixOutcome::failed(*package, format!("{err:#}")),
            }
        })
        .collect()
}

/// Replace whatever xformers build is installed with the pinned one.
///
/// The uninstall step is allowed to fail (the package may be absent); only
/// the install decides the outcome.
pub fn repin_xformers(python: &str) -> FixOutcome {
    info!("Attempting to fix xformers compatibility...");

    let _ = pip(python, &["uninstall", "-y", "xformers"]);

    match pip(python, &["install", XFORMERS_PIN, "--no-deps"]) {
        Ok(()) => FixOutcome::fixed(XFORMERS_PIN),
        Err(err) => FixOutcome::failed(XFORMERS_PIN, format!("{err:#}")),
    }
}

fn pip(python: &str, args: &[&str]) -> anyhow::Result<()> {
    let output = Command::new(python)
        .args(["-m", "pip"])
        .args(args)
        .output()
        .with_context(|| format!("spawn {python} -m pip"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("pip exited with {}: {}", output.status, stderr.trim());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repair::FixStatus;

    #[test]
    fn test_runtime_dep_list_is_fixed() {
        assert_eq!(RUNTIME_DEPS.len(), 7);
        assert!(RUNTIME_DEPS.contains(&"librosa"));
    }

    #[test]
    fn test_missing_interpreter_yields_failed_outcomes() {
        // An interpreter that cannot be spawned must produce per-package
        // failures, never a panic or an early return.
        let outcomes = reinstall_runtime_deps("definitely-not-a-python");
        assert_eq!(outcomes.len(), RUNTIME_DEPS.len());
        assert!(outcomes.iter().all(|o| o.status == FixStatus::Failed));

        let xformers = repin_xformers("definitely-not-a-python");
        assert_eq!(xformers.status, FixStatus::Failed);
    }
}
