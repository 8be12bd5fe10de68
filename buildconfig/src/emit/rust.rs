//! Rust `pub mod` blocks for `include!` consumers.

use super::dialect::Dialect;
use crate::model::{Scalar, ValueType};
use crate::naming::module_name;

const CRYPTO_UTILS: &str = include_str!("../../templates/crypto_utils.rs");

/// Rust dialect.
#[derive(Debug, Clone, Copy)]
pub(super) struct Rust;

impl Dialect for Rust {
    fn indent(&self) -> &'static str {
        "    "
    }

    fn file_header(&self, package_name: &str) -> String {
        format!("// @generated by buildconfig for package `{package_name}`. Do not edit.\n\n")
    }

    fn nests_by_package(&self) -> bool {
        false
    }

    fn unit_type_name(&self, type_name: &str) -> String {
        module_name(type_name)
    }

    fn open_unit(&self, type_name: &str) -> Vec<String> {
        vec![
            "#[allow(dead_code)]".to_owned(),
            format!("pub mod {type_name} {{"),
        ]
    }

    fn open_namespace(&self, property_name: &str) -> String {
        format!("pub mod {} {{", module_name(property_name))
    }

    fn constant(
        &self,
        name: &str,
        value_type: ValueType,
        nullable: bool,
        value: Option<&Scalar>,
    ) -> String {
        let ty = rust_type(value_type);
        match (nullable, value) {
            (false, Some(value)) => format!("pub const {name}: {ty} = {};", literal(value)),
            (true, Some(value)) => format!("pub const {name}: Option<{ty}> = Some({});", literal(value)),
            (_, None) => format!("pub const {name}: Option<{ty}> = None;"),
        }
    }

    fn crypto_helper(&self) -> (&'static str, &'static str) {
        ("crypto_utils.rs", CRYPTO_UTILS)
    }
}

const fn rust_type(value_type: ValueType) -> &'static str {
    match value_type {
        ValueType::String => "&str",
        ValueType::Bool => "bool",
        ValueType::Int => "i32",
        ValueType::Long => "i64",
        ValueType::Float => "f32",
        ValueType::Double => "f64",
    }
}

fn literal(value: &Scalar) -> String {
    match value {
        Scalar::String(text) => format!("{text:?}"),
        Scalar::Bool(flag) => flag.to_string(),
        Scalar::Int(number) => number.to_string(),
        Scalar::Long(number) => number.to_string(),
        Scalar::Float(number) => float_literal("f32", f64::from(*number), format!("{number:?}")),
        Scalar::Double(number) => float_literal("f64", *number, format!("{number:?}")),
    }
}

fn float_literal(ty: &str, widened: f64, finite: String) -> String {
    if widened.is_nan() {
        format!("{ty}::NAN")
    } else if widened.is_infinite() {
        let name = if widened.is_sign_positive() { "INFINITY" } else { "NEG_INFINITY" };
        format!("{ty}::{name}")
    } else {
        finite
    }
}
