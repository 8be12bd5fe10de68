//! Scenario state shared between `cargo-buildconfig` steps.

use std::process::Output;

use anyhow::{Context, Result, anyhow};
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tempfile::TempDir;

/// Output root the binary uses when the manifest leaves `out_dir` unset.
pub const GENERATED_ROOT: &str = "build/generated/buildconfig";

/// State for one generation scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct GenerateContext {
    /// Directory holding the manifest; also the binary's working directory.
    pub workdir: Slot<TempDir>,
    /// Variables passed to the child process.
    pub env: Slot<Vec<(String, String)>>,
    /// Captured result of the last run.
    pub output: Slot<Output>,
}

impl GenerateContext {
    /// Path of the scenario's working directory.
    pub fn workdir_path(&self) -> Result<Utf8PathBuf> {
        self.workdir
            .with_ref(|dir| Utf8PathBuf::from_path_buf(dir.path().to_path_buf()))
            .ok_or_else(|| anyhow!("no manifest has been written yet"))?
            .map_err(|path| anyhow!("non UTF-8 temp path: {}", path.display()))
    }

    /// Output root below the working directory.
    pub fn generated_root(&self) -> Result<Utf8PathBuf> {
        Ok(self.workdir_path()?.join(GENERATED_ROOT))
    }

    /// Output of the last run.
    pub fn last_output(&self) -> Result<Output> {
        self.output
            .get()
            .context("cargo-buildconfig has not been run")
    }
}

/// Provides an empty context for each scenario.
#[fixture]
pub fn generate_context() -> GenerateContext {
    GenerateContext::default()
}
