//! CLI Module
//!
//! Command-line interface for the musekit toolkit.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Musekit - operational toolkit for MuseTalk lip-sync
#[derive(Parser, Debug)]
#[command(name = "musekit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace root holding models/, configs/, and output/
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run lip-sync inference on a video/audio pair
    Infer {
        /// Input video path
        #[arg(long)]
        video: PathBuf,

        /// Input audio path
        #[arg(long)]
        audio: PathBuf,

        /// Output video path (defaults to output/lipsync_result.mp4)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Expression control: 0=normal, -3 to -7=more natural (less mouth opening)
        #[arg(long = "bbox_shift", default_value_t = 0, allow_negative_numbers = true)]
        bbox_shift: i32,

        /// Batch size (4=stable, 8=faster if enough VRAM)
        #[arg(long = "batch_size", default_value_t = 4)]
        batch_size: u32,

        /// Output video FPS
        #[arg(long, default_value_t = 25)]
        fps: u32,

        /// Use natural expression settings (bbox_shift=-3)
        #[arg(long, conflicts_with = "subtle")]
        natural: bool,

        /// Use subtle expression settings (bbox_shift=-5)
        #[arg(long)]
        subtle: bool,
    },

    /// Download all required model files
    Download,

    /// Apply environment fixes and report setup health
    Doctor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_requires_video_and_audio() {
        let result = Cli::try_parse_from(["musekit", "infer", "--video", "v.mp4"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_infer_accepts_underscore_flags() {
        let cli = Cli::try_parse_from([
            "musekit",
            "infer",
            "--video",
            "v.mp4",
            "--audio",
            "a.wav",
            "--bbox_shift",
            "-4",
            "--batch_size",
            "8",
        ])
        .unwrap();

        match cli.command {
            Commands::Infer {
                bbox_shift,
                batch_size,
                ..
            } => {
                assert_eq!(bbox_shift, -4);
                assert_eq!(batch_size, 8);
            }
            _ => panic!("expected infer"),
        }
    }

    #[test]
    fn test_presets_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "musekit", "infer", "--video", "v.mp4", "--audio", "a.wav", "--natural",
            "--subtle",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_download_and_doctor_take_no_flags() {
        assert!(Cli::try_parse_from(["musekit", "download"]).is_ok());
        assert!(Cli::try_parse_from(["musekit", "doctor"]).is_ok());
    }
}
