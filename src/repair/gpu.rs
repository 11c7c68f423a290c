//! Accelerator diagnostics
//!
//! Read-only report of GPU and driver state via nvidia-smi. No side effects;
//! a machine without an NVIDIA GPU gets the "unavailable" branch.

use std::process::Command;

use serde::{Deserialize, Serialize};

/// Information about the detected accelerator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceleratorInfo {
    pub name: String,
    pub vram_total_gb: f32,
    pub vram_available_gb: f32,
    pub driver_version: String,
    pub cuda_version: Option<String>,
}

impl AcceleratorInfo {
    /// Detect the first NVIDIA GPU via nvidia-smi.
    ///
    /// Returns None when the tool is absent, fails, or prints something
    /// unparseable.
    pub fn detect() -> Option<Self> {
        let output = Command::new("nvidia-smi")
            .args([
                "--query-gpu=name,memory.total,memory.free,driver_version",
                "--format=csv,noheader,nounits",
            ])
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout.lines().next()?;
        let parts: Vec<&str> = line.split(',').map(|s| s.trim()).collect();
        if parts.len() < 4 {
            return None;
        }

        let vram_total_mb: f32 = parts[1].parse().ok()?;
        let vram_free_mb: f32 = parts[2].parse().ok()?;

        Some(Self {
            name: parts[0].to_string(),
            vram_total_gb: vram_total_mb / 1024.0,
            vram_available_gb: vram_free_mb / 1024.0,
            driver_version: parts[3].to_string(),
            cuda_version: detect_cuda_version(),
        })
    }

    /// Batch size the inference process can sustain with the free VRAM.
    pub fn recommended_batch_size(&self) -> u32 {
        if self.vram_available_gb >= 12.0 {
            8
        } else if self.vram_available_gb >= 6.0 {
            4
        } else {
            2
        }
    }
}

/// Parse the CUDA version from nvidia-smi's banner output.
fn detect_cuda_version() -> Option<String> {
    let output = Command::new("nvidia-smi").output().ok()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    for line in stdout.lines() {
        // The banner line also carries the driver version, so split on the
        // full label rather than the colon.
        if let Some(rest) = line.split("CUDA Version:").nth(1) {
            let version = rest.trim().trim_end_matches('|').trim();
            if !version.is_empty() {
                return Some(version.to_string());
            }
        }
    }

    None
}

/// Human-readable accelerator status for the doctor report.
pub fn accelerator_summary() -> String {
    match AcceleratorInfo::detect() {
        Some(gpu) => {
            let mut summary = format!(
                "GPU: {}\n\
                 VRAM: {:.1}GB total, {:.1}GB available\n\
                 Driver: {}",
                gpu.name, gpu.vram_total_gb, gpu.vram_available_gb, gpu.driver_version
            );

            if let Some(cuda) = &gpu.cuda_version {
                summary.push_str(&format!("\nCUDA: {cuda}"));
            }

            summary.push_str(&format!(
                "\nRecommended batch size: {}",
                gpu.recommended_batch_size()
            ));

            summary
        }
        None => "No compatible GPU detected - inference will run on CPU (slow)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(16.0, 8; "plenty of vram")]
    #[test_case(8.0, 4; "mid range")]
    #[test_case(3.5, 2; "small card")]
    fn test_batch_recommendation(vram_free: f32, expected: u32) {
        let gpu = AcceleratorInfo {
            name: "Test GPU".to_string(),
            vram_total_gb: vram_free,
            vram_available_gb: vram_free,
            driver_version: "535.0".to_string(),
            cuda_version: None,
        };
        assert_eq!(gpu.recommended_batch_size(), expected);
    }

    #[test]
    fn test_summary_never_panics() {
        // With or without a GPU present, the summary is a non-empty string.
        let summary = accelerator_summary();
        assert!(!summary.is_empty());
    }
}
