//! Core crate for generating `BuildConfig` constant files.
//!
//! Properties are collected with a [`ConfigBuilder`] into an immutable
//! [`PropertyModel`], rendered by a target-language dialect in [`emit`], and
//! written to disk by [`generate()`]. Secret values are sealed with the
//! keystream scheme in [`cipher`]; every generated secret unit ships with a
//! dependency-free `decrypt` helper that reverses it at the consumer's
//! runtime.
//!
//! ```
//! use buildconfig::{ConfigBuilder, ModelError};
//!
//! # fn main() -> Result<(), ModelError> {
//! let mut builder = ConfigBuilder::new();
//! builder.properties(|props| {
//!     props.string("apiUrl", "https://example.com")?;
//!     props.object("feature", |feature| {
//!         feature.bool("enabled", true)?;
//!         Ok::<(), ModelError>(())
//!     })?;
//!     Ok::<(), ModelError>(())
//! })?;
//! let model = builder.build();
//! assert_eq!(model.scopes().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod cipher;
pub mod emit;
mod error;
pub mod generate;
pub mod model;
pub mod naming;
mod writer;

pub use builder::{ConfigBuilder, PropertiesBuilder};
pub use emit::{EmitOptions, OutputUnit, RenderedScope, Target, UnitNames};
pub use error::{GenerateError, ModelError};
pub use generate::{GenerationReport, GenerationRequest, generate, render};
pub use model::{
    DEFAULT_SCOPE, ObjectProperty, Primitive, PropertyModel, PropertyNode, Scalar, Scope,
    SecretProperty, ValueType,
};

/// Result alias for model construction.
pub type ModelResult<T> = Result<T, ModelError>;

/// Result alias for rendering and writing output units.
pub type GenerateResult<T> = Result<T, GenerateError>;
