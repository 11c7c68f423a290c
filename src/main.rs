//! Musekit CLI - MuseTalk Lip-Sync Toolkit
//!
//! Command-line interface for model provisioning, inference orchestration,
//! and environment repair.

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use musekit::cli::{commands, Cli, Commands};
use musekit::inference::{ExpressionPreset, InferenceParams};
use musekit::layout::WorkspaceLayout;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Musekit v{}", env!("CARGO_PKG_VERSION"));

    let layout = WorkspaceLayout::new(&cli.root);

    match cli.command {
        Commands::Infer {
            video,
            audio,
            output,
            bbox_shift,
            batch_size,
            fps,
            natural,
            subtle,
        } => {
            let mut params = InferenceParams {
                bbox_shift,
                batch_size,
                fps,
                ..InferenceParams::default()
            };
            if natural {
                params = params.with_preset(ExpressionPreset::Natural);
                println!("Using natural expression preset (bbox_shift=-3)");
            } else if subtle {
                params = params.with_preset(ExpressionPreset::Subtle);
                println!("Using subtle expression preset (bbox_shift=-5)");
            }

            match commands::infer(layout, video, audio, output, params) {
                Ok(_) => ExitCode::SUCCESS,
                Err(err) => {
                    error!("ERROR during inference: {err}");
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Download => {
            let report = commands::download(layout);
            if report.is_complete() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Doctor => {
            // Diagnostic tool: always exits zero.
            commands::doctor(layout);
            ExitCode::SUCCESS
        }
    }
}
