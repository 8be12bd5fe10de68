//! Immutable property model consumed by the emitter.
//!
//! A [`PropertyModel`] is an ordered list of [`Scope`]s. Each scope holds an
//! ordered list of [`PropertyNode`]s: leaf constants, nested objects, and
//! secrets. Declaration order is preserved everywhere so rendering is
//! deterministic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cipher::{self, NONCE_LEN};
use crate::error::ModelError;
use crate::naming::{validate_identifier, validate_scope_name};

/// Scope used for properties declared without an explicit scope.
pub const DEFAULT_SCOPE: &str = "commonMain";

/// Scalar types a primitive constant can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// UTF-8 text.
    String,
    /// Boolean flag.
    Bool,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
}

impl ValueType {
    /// Returns the lowercase name used in manifests and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constant value tagged with its type.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// UTF-8 text.
    String(String),
    /// Boolean flag.
    Bool(bool),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
}

impl Scalar {
    /// Returns the type tag of this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::String(_) => ValueType::String,
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Long(_) => ValueType::Long,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

/// A leaf constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    name: String,
    value_type: ValueType,
    nullable: bool,
    value: Option<Scalar>,
}

impl Primitive {
    /// Creates a primitive after validating its name and value.
    ///
    /// # Errors
    ///
    /// - [`ModelError::InvalidName`] when `name` is not an identifier.
    /// - [`ModelError::TypeMismatch`] when `value` is not a `value_type`.
    /// - [`ModelError::MissingValue`] when a non-nullable primitive has no
    ///   value.
    pub fn new(
        name: impl Into<String>,
        value_type: ValueType,
        value: Option<Scalar>,
        nullable: bool,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        validate_identifier(&name)?;
        match &value {
            Some(scalar) if scalar.value_type() != value_type => {
                return Err(ModelError::TypeMismatch {
                    found: scalar.value_type(),
                    name,
                    expected: value_type,
                });
            }
            None if !nullable => return Err(ModelError::MissingValue { name }),
            _ => {}
        }
        Ok(Self {
            name,
            value_type,
            nullable,
            value,
        })
    }

    /// Declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Whether the constant's type admits `null`.
    #[must_use]
    pub const fn nullable(&self) -> bool {
        self.nullable
    }

    /// Value, or `None` for a null constant.
    #[must_use]
    pub const fn value(&self) -> Option<&Scalar> {
        self.value.as_ref()
    }
}

/// A nested namespace of properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    name: String,
    children: Vec<PropertyNode>,
}

impl ObjectProperty {
    /// Creates an object node from its children.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidName`] for a bad name and
    /// [`ModelError::NestedSecret`] when any child is a secret.
    pub fn new(name: impl Into<String>, children: Vec<PropertyNode>) -> Result<Self, ModelError> {
        let name = name.into();
        validate_identifier(&name)?;
        if let Some(secret) = children.iter().find_map(PropertyNode::as_secret) {
            return Err(ModelError::NestedSecret {
                object: name,
                name: secret.name().to_owned(),
            });
        }
        Ok(Self { name, children })
    }

    /// Declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in declaration order.
    #[must_use]
    pub fn children(&self) -> &[PropertyNode] {
        &self.children
    }
}

/// A secret value stored only in sealed form in generated output.
///
/// The sealed payload is computed once, when the secret is created, so the
/// same model always renders the same bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretProperty {
    name: String,
    plaintext: String,
    encryption_key: String,
    sealed: String,
}

impl SecretProperty {
    /// Seals `plaintext` under `encryption_key` with a fresh random nonce.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidName`] when `name` is not an identifier.
    pub fn seal(
        name: impl Into<String>,
        plaintext: impl Into<String>,
        encryption_key: impl Into<String>,
    ) -> Result<Self, ModelError> {
        Self::assemble(name.into(), plaintext.into(), encryption_key.into(), |text, key| {
            cipher::encrypt(text, key)
        })
    }

    /// Seals `plaintext` with a caller-chosen nonce.
    ///
    /// Reusing a nonce with the same key leaks keystream equality; this exists
    /// for reproducible fixtures.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidName`] when `name` is not an identifier.
    pub fn seal_with_nonce(
        name: impl Into<String>,
        plaintext: impl Into<String>,
        encryption_key: impl Into<String>,
        nonce: [u8; NONCE_LEN],
    ) -> Result<Self, ModelError> {
        Self::assemble(name.into(), plaintext.into(), encryption_key.into(), |text, key| {
            cipher::encrypt_with_nonce(text, key, nonce)
        })
    }

    fn assemble(
        name: String,
        plaintext: String,
        encryption_key: String,
        seal: impl FnOnce(&str, &str) -> String,
    ) -> Result<Self, ModelError> {
        validate_identifier(&name)?;
        let sealed = seal(&plaintext, &encryption_key);
        Ok(Self {
            name,
            plaintext,
            encryption_key,
            sealed,
        })
    }

    /// Declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unencrypted value. Never rendered.
    #[must_use]
    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    /// Keyword the value is sealed under.
    #[must_use]
    pub fn encryption_key(&self) -> &str {
        &self.encryption_key
    }

    /// The `kmbc1:` payload rendered into the secret unit.
    #[must_use]
    pub fn sealed(&self) -> &str {
        &self.sealed
    }
}

impl fmt::Debug for SecretProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretProperty")
            .field("name", &self.name)
            .field("plaintext", &"<redacted>")
            .field("encryption_key", &self.encryption_key)
            .field("sealed", &self.sealed)
            .finish()
    }
}

/// One entry of the property model.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyNode {
    /// A leaf constant.
    Primitive(Primitive),
    /// A nested namespace.
    Object(ObjectProperty),
    /// A secret rendered into the secret unit.
    Secret(SecretProperty),
}

impl PropertyNode {
    /// Declared name of the node.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(primitive) => primitive.name(),
            Self::Object(object) => object.name(),
            Self::Secret(secret) => secret.name(),
        }
    }

    /// Returns the secret payload when this node is a secret.
    #[must_use]
    pub const fn as_secret(&self) -> Option<&SecretProperty> {
        match self {
            Self::Secret(secret) => Some(secret),
            Self::Primitive(_) | Self::Object(_) => None,
        }
    }
}

impl From<Primitive> for PropertyNode {
    fn from(value: Primitive) -> Self {
        Self::Primitive(value)
    }
}

impl From<ObjectProperty> for PropertyNode {
    fn from(value: ObjectProperty) -> Self {
        Self::Object(value)
    }
}

impl From<SecretProperty> for PropertyNode {
    fn from(value: SecretProperty) -> Self {
        Self::Secret(value)
    }
}

/// A named group of properties producing one set of output units.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    name: String,
    properties: Vec<PropertyNode>,
}

impl Scope {
    /// Creates a scope.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidScopeName`] when `name` cannot be used as
    /// a directory name.
    pub fn new(name: impl Into<String>, properties: Vec<PropertyNode>) -> Result<Self, ModelError> {
        let name = name.into();
        validate_scope_name(&name)?;
        Ok(Self { name, properties })
    }

    pub(crate) const fn from_parts(name: String, properties: Vec<PropertyNode>) -> Self {
        Self { name, properties }
    }

    /// Scope name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level properties in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyNode] {
        &self.properties
    }

    /// Secrets declared in this scope, in order.
    pub fn secrets(&self) -> impl Iterator<Item = &SecretProperty> {
        self.properties.iter().filter_map(PropertyNode::as_secret)
    }

    /// Whether the scope needs a secret unit.
    #[must_use]
    pub fn has_secrets(&self) -> bool {
        self.secrets().next().is_some()
    }
}

/// The complete, immutable input to generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyModel {
    scopes: Vec<Scope>,
}

impl PropertyModel {
    /// Creates a model from scopes in the given order.
    #[must_use]
    pub const fn new(scopes: Vec<Scope>) -> Self {
        Self { scopes }
    }

    /// Scopes in first-declaration order.
    #[must_use]
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Looks up a scope by name.
    #[must_use]
    pub fn scope(&self, name: &str) -> Option<&Scope> {
        self.scopes.iter().find(|scope| scope.name() == name)
    }

    /// Whether the model declares no scopes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
