//! Musekit - Operational Toolkit for MuseTalk Lip-Sync
//!
//! Musekit wraps a third-party lip-sync model with the plumbing it needs to
//! run reliably:
//! 1. Model provisioning - fetch every required weight and config file into
//!    the conventional on-disk layout, tolerating partial failure per file
//! 2. Inference orchestration - validate inputs, persist the task config,
//!    invoke the external inference process, and collect its output
//! 3. Environment repair - idempotent fixes for the directory tree, Whisper
//!    path aliases, and Python runtime dependencies, plus GPU diagnostics
//!
//! # Architecture
//!
//! Each responsibility is an independent entry point; none depends on
//! another at run time. All paths flow from one [`layout::WorkspaceLayout`]
//! so the on-disk contract is declared in a single place, and the actual
//! lip-sync computation sits behind the narrow
//! [`inference::InferenceBackend`] trait.

pub mod cli;
pub mod error;
pub mod inference;
pub mod layout;
pub mod provision;
pub mod repair;

pub use error::{MusekitError, Result};
