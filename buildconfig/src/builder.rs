//! Scoped builder that accumulates property declarations.
//!
//! [`ConfigBuilder`] keeps an ordered list of scopes. Each scope is populated
//! through a [`PropertiesBuilder`], which also backs nested objects. Secrets
//! are only accepted at scope level.

use std::mem;

use crate::cipher::NONCE_LEN;
use crate::error::ModelError;
use crate::model::{
    DEFAULT_SCOPE, ObjectProperty, Primitive, PropertyModel, PropertyNode, Scalar, Scope,
    SecretProperty, ValueType,
};
use crate::naming::{validate_identifier, validate_scope_name};

/// Collects scopes and their properties into a [`PropertyModel`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    scopes: Vec<(String, Vec<PropertyNode>)>,
}

impl ConfigBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates the default scope.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `build`.
    pub fn properties<F, E>(&mut self, build: F) -> Result<&mut Self, E>
    where
        F: FnOnce(&mut PropertiesBuilder) -> Result<(), E>,
        E: From<ModelError>,
    {
        self.scope(DEFAULT_SCOPE, build)
    }

    /// Creates or reuses the scope called `name` and populates it.
    ///
    /// Scopes keep the order in which they were first declared. Declaring the
    /// same scope again appends to its existing properties.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidScopeName`] when `name` cannot be used as
    /// a directory, and propagates any error returned by `build`.
    pub fn scope<F, E>(&mut self, name: &str, build: F) -> Result<&mut Self, E>
    where
        F: FnOnce(&mut PropertiesBuilder) -> Result<(), E>,
        E: From<ModelError>,
    {
        validate_scope_name(name)?;
        let existing = self.scopes.iter().position(|(scope, _)| scope == name);
        let nodes = existing
            .and_then(|index| self.scopes.get_mut(index))
            .map(|(_, nodes)| mem::take(nodes))
            .unwrap_or_default();

        let mut properties = PropertiesBuilder::with_nodes(Nesting::Scope, nodes);
        let outcome = build(&mut properties);

        match existing.and_then(|index| self.scopes.get_mut(index)) {
            Some((_, slot)) => *slot = properties.nodes,
            None => self.scopes.push((name.to_owned(), properties.nodes)),
        }
        outcome?;
        Ok(self)
    }

    /// Finalises the builder into an immutable model.
    #[must_use]
    pub fn build(self) -> PropertyModel {
        let scopes = self
            .scopes
            .into_iter()
            .map(|(name, properties)| Scope::from_parts(name, properties))
            .collect();
        PropertyModel::new(scopes)
    }
}

#[derive(Debug, Clone)]
enum Nesting {
    Scope,
    Object { path: String },
}

/// Appends property declarations to a scope or to a nested object.
#[derive(Debug)]
pub struct PropertiesBuilder {
    nesting: Nesting,
    nodes: Vec<PropertyNode>,
}

macro_rules! typed_shorthands {
    ($($value_type:ident => $required:ident, $optional:ident: $ty:ty;)*) => {
        $(
            #[doc = concat!("Declares a non-null `", stringify!($value_type), "` constant.")]
            ///
            /// # Errors
            ///
            /// Returns [`ModelError::InvalidName`] when `name` is not an identifier.
            pub fn $required(
                &mut self,
                name: impl Into<String>,
                value: $ty,
            ) -> Result<&mut Self, ModelError> {
                self.primitive(name, ValueType::$value_type, Some(Scalar::from(value)), false)
            }

            #[doc = concat!("Declares a nullable `", stringify!($value_type), "` constant.")]
            ///
            /// # Errors
            ///
            /// Returns [`ModelError::InvalidName`] when `name` is not an identifier.
            pub fn $optional(
                &mut self,
                name: impl Into<String>,
                value: Option<$ty>,
            ) -> Result<&mut Self, ModelError> {
                self.primitive(name, ValueType::$value_type, value.map(Scalar::from), true)
            }
        )*
    };
}

impl PropertiesBuilder {
    const fn with_nodes(nesting: Nesting, nodes: Vec<PropertyNode>) -> Self {
        Self { nesting, nodes }
    }

    /// Appends a primitive constant.
    ///
    /// Duplicate names are accepted; the generated file fails to compile
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`Primitive::new`].
    pub fn primitive(
        &mut self,
        name: impl Into<String>,
        value_type: ValueType,
        value: Option<Scalar>,
        nullable: bool,
    ) -> Result<&mut Self, ModelError> {
        let primitive = Primitive::new(name, value_type, value, nullable)?;
        self.nodes.push(primitive.into());
        Ok(self)
    }

    typed_shorthands! {
        String => string, optional_string: &str;
        Bool => bool, optional_bool: bool;
        Int => int, optional_int: i32;
        Long => long, optional_long: i64;
        Float => float, optional_float: f32;
        Double => double, optional_double: f64;
    }

    /// Appends a nested object populated by `build`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidName`] for a bad name and propagates any
    /// error returned by `build`, including [`ModelError::NestedSecret`].
    pub fn object<F, E>(&mut self, name: impl Into<String>, build: F) -> Result<&mut Self, E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
        E: From<ModelError>,
    {
        let name = name.into();
        validate_identifier(&name)?;
        let path = match &self.nesting {
            Nesting::Scope => name.clone(),
            Nesting::Object { path } => format!("{path}.{name}"),
        };
        let mut nested = Self::with_nodes(Nesting::Object { path }, Vec::new());
        build(&mut nested)?;
        let object = ObjectProperty::new(name, nested.nodes)?;
        self.nodes.push(object.into());
        Ok(self)
    }

    /// Appends a secret sealed with a fresh random nonce.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NestedSecret`] when called inside an object and
    /// [`ModelError::InvalidName`] for a bad name.
    pub fn secret(
        &mut self,
        name: impl Into<String>,
        plaintext: impl Into<String>,
        encryption_key: impl Into<String>,
    ) -> Result<&mut Self, ModelError> {
        let name = name.into();
        self.ensure_scope_level(&name)?;
        let secret = SecretProperty::seal(name, plaintext, encryption_key)?;
        self.nodes.push(secret.into());
        Ok(self)
    }

    /// Appends a secret sealed with a fixed nonce.
    ///
    /// Intended for reproducible fixtures; production declarations should use
    /// [`secret`](Self::secret).
    ///
    /// # Errors
    ///
    /// Same as [`secret`](Self::secret).
    pub fn secret_with_nonce(
        &mut self,
        name: impl Into<String>,
        plaintext: impl Into<String>,
        encryption_key: impl Into<String>,
        nonce: [u8; NONCE_LEN],
    ) -> Result<&mut Self, ModelError> {
        let name = name.into();
        self.ensure_scope_level(&name)?;
        let secret = SecretProperty::seal_with_nonce(name, plaintext, encryption_key, nonce)?;
        self.nodes.push(secret.into());
        Ok(self)
    }

    fn ensure_scope_level(&self, name: &str) -> Result<(), ModelError> {
        match &self.nesting {
            Nesting::Scope => Ok(()),
            Nesting::Object { path } => Err(ModelError::NestedSecret {
                object: path.clone(),
                name: name.to_owned(),
            }),
        }
    }
}
