//! Identifier validation and case conversion for emitted declarations.
//!
//! Property names are written in camelCase. Each target converts them into
//! its own convention: constants become `UPPER_SNAKE_CASE`, Kotlin objects
//! become `PascalCase`, and Rust modules become `snake_case`.

use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

use crate::error::ModelError;

/// Suffix appended to a secret's constant name for its encryption key.
pub const KEY_SUFFIX: &str = "_KEY";

/// Checks that `name` can be case-converted into an identifier.
///
/// Accepted names start with an ASCII letter or `_` and continue with ASCII
/// letters, digits or `_`. Keywords of the target language are not checked;
/// a clash surfaces when the generated file is compiled.
///
/// # Examples
///
/// ```
/// use buildconfig::naming::validate_identifier;
///
/// assert!(validate_identifier("apiUrl").is_ok());
/// assert!(validate_identifier("2fast").is_err());
/// ```
///
/// # Errors
///
/// Returns [`ModelError::InvalidName`] describing the first violation.
pub fn validate_identifier(name: &str) -> Result<(), ModelError> {
    let invalid = |reason| ModelError::InvalidName {
        name: name.to_owned(),
        reason,
    };
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(invalid("name is empty"));
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(invalid("name must start with an ASCII letter or '_'"));
    }
    if chars.any(|ch| !(ch.is_ascii_alphanumeric() || ch == '_')) {
        return Err(invalid(
            "name may only contain ASCII letters, digits and '_'",
        ));
    }
    if name.chars().all(|ch| ch == '_') {
        return Err(invalid("name needs at least one letter"));
    }
    Ok(())
}

/// Checks that a scope name is usable as a single directory component.
///
/// # Errors
///
/// Returns [`ModelError::InvalidScopeName`] for empty names, `.` or `..`,
/// and names containing path separators.
pub fn validate_scope_name(name: &str) -> Result<(), ModelError> {
    let is_invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if is_invalid {
        return Err(ModelError::InvalidScopeName {
            name: name.to_owned(),
        });
    }
    Ok(())
}

/// Converts a property name into a constant name (`apiUrl` → `API_URL`).
#[must_use]
pub fn constant_name(name: &str) -> String {
    name.to_shouty_snake_case()
}

/// Constant name holding a secret's encryption key (`token` → `TOKEN_KEY`).
#[must_use]
pub fn key_constant_name(name: &str) -> String {
    format!("{}{KEY_SUFFIX}", constant_name(name))
}

/// Converts a name into a `PascalCase` type name (`feature` → `Feature`).
#[must_use]
pub fn type_name(name: &str) -> String {
    name.to_upper_camel_case()
}

/// Converts a name into a `snake_case` module name (`BuildConfig` → `build_config`).
#[must_use]
pub fn module_name(name: &str) -> String {
    name.to_snake_case()
}

/// Returns the file name without its final extension.
///
/// Used to derive the default type name of a unit from its file name.
#[must_use]
pub fn file_stem(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem)
}
