//! Kotlin `object` declarations.

use super::dialect::Dialect;
use crate::model::{Scalar, ValueType};
use crate::naming::type_name;

const CRYPTO_UTILS: &str = include_str!("../../templates/CryptoUtils.kt");

/// Kotlin dialect.
#[derive(Debug, Clone, Copy)]
pub(super) struct Kotlin;

impl Dialect for Kotlin {
    fn indent(&self) -> &'static str {
        "  "
    }

    fn file_header(&self, package_name: &str) -> String {
        format!("package {package_name}\n\n")
    }

    fn nests_by_package(&self) -> bool {
        true
    }

    fn unit_type_name(&self, type_name: &str) -> String {
        type_name.to_owned()
    }

    fn open_unit(&self, type_name: &str) -> Vec<String> {
        vec![format!("public object {type_name} {{")]
    }

    fn open_namespace(&self, property_name: &str) -> String {
        format!("public object {} {{", type_name(property_name))
    }

    fn constant(
        &self,
        name: &str,
        value_type: ValueType,
        nullable: bool,
        value: Option<&Scalar>,
    ) -> String {
        let ty = kotlin_type(value_type);
        let literal = value.map_or_else(|| "null".to_owned(), literal);
        if nullable {
            format!("public val {name}: {ty}? = {literal}")
        } else {
            format!("public const val {name}: {ty} = {literal}")
        }
    }

    fn crypto_helper(&self) -> (&'static str, &'static str) {
        ("CryptoUtils.kt", CRYPTO_UTILS)
    }
}

const fn kotlin_type(value_type: ValueType) -> &'static str {
    match value_type {
        ValueType::String => "String",
        ValueType::Bool => "Boolean",
        ValueType::Int => "Int",
        ValueType::Long => "Long",
        ValueType::Float => "Float",
        ValueType::Double => "Double",
    }
}

fn literal(value: &Scalar) -> String {
    match value {
        Scalar::String(text) => quote(text),
        Scalar::Bool(flag) => flag.to_string(),
        Scalar::Int(i32::MIN) => "Int.MIN_VALUE".to_owned(),
        Scalar::Int(number) => number.to_string(),
        Scalar::Long(i64::MIN) => "Long.MIN_VALUE".to_owned(),
        Scalar::Long(number) => format!("{number}L"),
        Scalar::Float(number) => float_literal("Float", *number, f64::from(*number), "f"),
        Scalar::Double(number) => float_literal("Double", *number, *number, ""),
    }
}

fn float_literal<T: std::fmt::Debug>(class: &str, value: T, widened: f64, suffix: &str) -> String {
    if widened.is_nan() {
        format!("{class}.NaN")
    } else if widened.is_infinite() {
        let sign = if widened.is_sign_positive() { "POSITIVE" } else { "NEGATIVE" };
        format!("{class}.{sign}_INFINITY")
    } else {
        format!("{value:?}{suffix}")
    }
}

/// Quotes `text` as a Kotlin string literal, escaping template markers.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '$' => quoted.push_str("\\$"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{8}' => quoted.push_str("\\b"),
            ch if ch.is_control() => quoted.push_str(&format!("\\u{:04x}", u32::from(ch))),
            ch => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
