//! Error types for `cargo-buildconfig`.

use buildconfig::{GenerateError, ModelError};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `cargo-buildconfig` pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// The manifest file does not exist.
    #[error("manifest not found at {0}")]
    ManifestNotFound(Utf8PathBuf),

    /// The layered manifest could not be parsed or extracted.
    #[error("invalid manifest: {0}")]
    Manifest(#[source] Box<figment::Error>),

    /// A declaration was rejected while building the property model.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Rendering or writing the output units failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// A secret reads its value from an environment variable that is unset.
    #[error("secret '{name}' reads its value from ${var}, which is not set")]
    MissingSecretValue {
        /// Secret property name.
        name: String,
        /// Environment variable consulted.
        var: String,
    },

    /// A secret declares neither `value` nor `value_env`.
    #[error("secret '{name}' needs either `value` or `value_env`")]
    SecretValueUnset {
        /// Secret property name.
        name: String,
    },
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Manifest(Box::new(err))
    }
}
