//! Error types for model construction and generation.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::model::ValueType;

/// Structural errors raised while building a property model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// A property or namespace name cannot become an identifier.
    #[error("invalid property name '{name}': {reason}")]
    InvalidName {
        /// Name as declared.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// A scope name cannot be used as an output directory.
    #[error("invalid scope name '{name}'")]
    InvalidScopeName {
        /// Scope name as declared.
        name: String,
    },

    /// A secret was declared inside a nested object.
    #[error("secret '{name}' cannot be nested inside object '{object}'; declare secrets at scope level")]
    NestedSecret {
        /// Dotted path of the enclosing object.
        object: String,
        /// Name of the offending secret.
        name: String,
    },

    /// A primitive's value does not match its declared type.
    #[error("property '{name}' is declared as {expected} but was given a {found} value")]
    TypeMismatch {
        /// Property name.
        name: String,
        /// Declared value type.
        expected: ValueType,
        /// Type of the supplied value.
        found: ValueType,
    },

    /// A non-nullable primitive was declared without a value.
    #[error("property '{name}' is not nullable but has no value")]
    MissingValue {
        /// Property name.
        name: String,
    },
}

/// Errors surfaced while rendering or writing output units.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// A scope contains secrets but no secret unit name was supplied.
    #[error(
        "secret output required: scope '{scope}' declares secret '{property}' but no secret unit name was configured"
    )]
    SecretUnitRequired {
        /// Scope being rendered.
        scope: String,
        /// First secret encountered in the scope.
        property: String,
    },

    /// The package or namespace name is empty or not a dotted identifier path.
    #[error("invalid package name '{0}'")]
    InvalidPackageName(String),

    /// An output unit file name is empty or escapes its directory.
    #[error("invalid output unit name '{0}'")]
    InvalidUnitName(String),

    /// Two output units resolve to the same file name.
    #[error("the {first} unit and the {second} unit would both be written to '{file_name}'")]
    UnitNameCollision {
        /// Shared file name.
        file_name: String,
        /// Unit that claimed the name first.
        first: &'static str,
        /// Unit that would overwrite it.
        second: &'static str,
    },

    /// A directory or file could not be created or written.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being created or written.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
