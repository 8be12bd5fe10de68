//! Helpers for loading manifests inside a `figment::Jail`.
//!
//! The jail gives each test its own working directory and serialises
//! environment mutation, so manifests and `BUILDCONFIG_*` variables never
//! leak between tests.

use anyhow::{Result, anyhow};
use camino::Utf8PathBuf;

/// File name the CLI looks for when no manifest path is given.
pub const MANIFEST_FILE: &str = "buildconfig.toml";

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Writes `contents` to [`MANIFEST_FILE`] in the jail and returns its path.
///
/// # Errors
///
/// Returns an error if the file cannot be written or the jail directory is
/// not valid UTF-8.
pub fn write_manifest(
    jail: &figment::Jail,
    contents: &str,
) -> figment::error::Result<Utf8PathBuf> {
    jail.create_file(MANIFEST_FILE, contents)?;
    let absolute = jail.directory().join(MANIFEST_FILE);
    Utf8PathBuf::from_path_buf(absolute)
        .map_err(|path| figment::Error::from(format!("non UTF-8 jail path: {}", path.display())))
}
