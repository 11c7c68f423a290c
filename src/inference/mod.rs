//! Lip-sync inference orchestration
//!
//! This module provides:
//! - `InferenceParams` with defaults and expression presets
//! - The YAML task config persisted for the external inference process
//! - The `InferenceBackend` trait, production script backend, and a mock
//! - The orchestrator that ties validation, config, invocation, and output
//!   selection together

mod backend;
mod config;
mod mock;
mod orchestrator;
mod params;
mod request;

pub use backend::{BackendContext, InferenceBackend, ScriptBackend};
pub use config::{InferenceConfig, TaskEntry, RESULT_NAME, TASK_ID};
pub use mock::MockBackend;
pub use orchestrator::Orchestrator;
pub use params::{ExpressionPreset, InferenceParams};
pub use request::{InferenceRequest, RunSummary};
