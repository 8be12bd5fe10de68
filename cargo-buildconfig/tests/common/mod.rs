//! Shared helpers for `cargo-buildconfig` integration tests.

use camino::Utf8PathBuf;
use std::error::Error;

/// Resolves the compiled `cargo-buildconfig` binary path.
///
/// Cargo exposes the path at compile time; nextest exports it at run time.
///
/// # Errors
///
/// Returns an error when none of the supported cargo/nextest binary
/// environment variables are present.
pub(crate) fn cargo_buildconfig_exe() -> Result<Utf8PathBuf, Box<dyn Error + Send + Sync>> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_cargo-buildconfig") {
        return Ok(Utf8PathBuf::from(path));
    }
    let env_vars = [
        "CARGO_BIN_EXE_cargo-buildconfig",
        "CARGO_BIN_EXE_cargo_buildconfig",
        "NEXTEST_BIN_EXE_cargo-buildconfig",
        "NEXTEST_BIN_EXE_cargo_buildconfig",
    ];
    for var in env_vars {
        if let Ok(path) = std::env::var(var) {
            return Ok(Utf8PathBuf::from(path));
        }
    }
    Err("cargo-buildconfig binary path not found in environment".into())
}
