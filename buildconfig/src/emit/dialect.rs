//! Per-language rendering hooks.

use crate::model::{Scalar, ValueType};

/// Literal syntax and layout of one target language.
///
/// Implementations only format single lines; nesting, ordering and blank
/// lines are handled by the shared renderer.
pub(super) trait Dialect {
    /// One level of indentation.
    fn indent(&self) -> &'static str;

    /// Text preceding the unit's outermost namespace, ending in a blank line.
    fn file_header(&self, package_name: &str) -> String;

    /// Whether units live under the package's directory path.
    fn nests_by_package(&self) -> bool;

    /// Converts a configured unit type name into this language's convention.
    fn unit_type_name(&self, type_name: &str) -> String;

    /// Opening lines of a unit's outermost namespace.
    fn open_unit(&self, type_name: &str) -> Vec<String>;

    /// Opening line of a nested namespace for an object property.
    fn open_namespace(&self, property_name: &str) -> String;

    /// One constant declaration. `name` is already in constant case.
    fn constant(
        &self,
        name: &str,
        value_type: ValueType,
        nullable: bool,
        value: Option<&Scalar>,
    ) -> String;

    /// File name and body of the decryption helper unit.
    fn crypto_helper(&self) -> (&'static str, &'static str);
}
