//! Feeds manifest declarations through the property builder.

use buildconfig::{ConfigBuilder, PropertiesBuilder, PropertyModel, Scalar, ValueType};

use crate::error::CliError;
use crate::manifest::{Manifest, PropertyDecl};

/// Builds the property model declared by `manifest`.
///
/// The default scope is always declared first, even when empty, so every
/// run produces a main unit for it. `lookup` resolves `value_env` secrets.
///
/// # Errors
///
/// Returns [`CliError::Model`] for invalid declarations and
/// [`CliError::MissingSecretValue`] or [`CliError::SecretValueUnset`] when a
/// secret has no plaintext.
pub fn build_model<L>(manifest: &Manifest, lookup: L) -> Result<PropertyModel, CliError>
where
    L: Fn(&str) -> Option<String>,
{
    let mut builder = ConfigBuilder::new();
    builder.properties(|props| declare_all(props, &manifest.properties, &lookup))?;
    for source_set in &manifest.source_sets {
        builder.scope(&source_set.name, |props| {
            declare_all(props, &source_set.properties, &lookup)
        })?;
    }
    Ok(builder.build())
}

fn declare_all<L>(
    props: &mut PropertiesBuilder,
    decls: &[PropertyDecl],
    lookup: &L,
) -> Result<(), CliError>
where
    L: Fn(&str) -> Option<String>,
{
    decls.iter().try_for_each(|decl| declare(props, decl, lookup))
}

fn declare<L>(props: &mut PropertiesBuilder, decl: &PropertyDecl, lookup: &L) -> Result<(), CliError>
where
    L: Fn(&str) -> Option<String>,
{
    match decl {
        PropertyDecl::String {
            name,
            value,
            nullable,
        } => primitive(props, name, ValueType::String, value.clone(), *nullable)?,
        PropertyDecl::Bool {
            name,
            value,
            nullable,
        } => primitive(props, name, ValueType::Bool, *value, *nullable)?,
        PropertyDecl::Int {
            name,
            value,
            nullable,
        } => primitive(props, name, ValueType::Int, *value, *nullable)?,
        PropertyDecl::Long {
            name,
            value,
            nullable,
        } => primitive(props, name, ValueType::Long, *value, *nullable)?,
        PropertyDecl::Float {
            name,
            value,
            nullable,
        } => primitive(props, name, ValueType::Float, *value, *nullable)?,
        PropertyDecl::Double {
            name,
            value,
            nullable,
        } => primitive(props, name, ValueType::Double, *value, *nullable)?,
        PropertyDecl::Object { name, properties } => {
            props.object(name.as_str(), |nested| declare_all(nested, properties, lookup))?;
        }
        PropertyDecl::Secret {
            name,
            value,
            value_env,
            key,
        } => {
            let plaintext = secret_plaintext(name, value.as_deref(), value_env.as_deref(), lookup)?;
            props.secret(name.as_str(), plaintext, key.as_str())?;
        }
    }
    Ok(())
}

fn primitive<T: Into<Scalar>>(
    props: &mut PropertiesBuilder,
    name: &str,
    value_type: ValueType,
    value: Option<T>,
    nullable: bool,
) -> Result<(), CliError> {
    props.primitive(name, value_type, value.map(Into::into), nullable)?;
    Ok(())
}

fn secret_plaintext<L>(
    name: &str,
    value: Option<&str>,
    value_env: Option<&str>,
    lookup: &L,
) -> Result<String, CliError>
where
    L: Fn(&str) -> Option<String>,
{
    if let Some(var) = value_env {
        if let Some(plaintext) = lookup(var) {
            return Ok(plaintext);
        }
        return value.map(str::to_owned).ok_or_else(|| CliError::MissingSecretValue {
            name: name.to_owned(),
            var: var.to_owned(),
        });
    }
    value.map(str::to_owned).ok_or_else(|| CliError::SecretValueUnset {
        name: name.to_owned(),
    })
}
