//! Mock inference backend for testing
//!
//! Does no real lip-sync work: it drops named files into the result
//! directory so orchestration can be exercised without the external process
//! or model weights.

use std::fs;

use crate::error::Result;
use crate::inference::backend::{BackendContext, InferenceBackend};

/// Backend that writes a fixed set of files into the result directory.
pub struct MockBackend {
    outputs: Vec<String>,
}

impl MockBackend {
    /// Produce the given file names (relative to the result directory) on
    /// each run.
    pub fn producing<I, S>(outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            outputs: outputs.into_iter().map(Into::into).collect(),
        }
    }

    /// Produce nothing, simulating a run where the external process failed
    /// silently.
    pub fn silent() -> Self {
        Self {
            outputs: Vec::new(),
        }
    }
}

impl InferenceBackend for MockBackend {
    fn run(&self, ctx: &BackendContext<'_>) -> Result<()> {
        fs::create_dir_all(ctx.result_dir)?;
        for name in &self.outputs {
            let path = ctx.result_dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            // Content is the file name so tests can tell copies apart.
            fs::write(&path, name.as_bytes())?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "mock backend"
    }
}
