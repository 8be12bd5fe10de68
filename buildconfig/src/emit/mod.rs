//! Renders a [`Scope`] into target-language source units.
//!
//! Each top-level node yields a pair of optional fragments: one for the main
//! unit and one for the secret unit. Fragments are joined in model order, so
//! identical models render identical bytes. Objects become nested namespaces
//! and are separated from their neighbours by a blank line.

mod dialect;
mod kotlin;
mod rust;

use std::fmt;
use std::str::FromStr;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::GenerateError;
use crate::model::{ObjectProperty, PropertyNode, Scalar, Scope, SecretProperty, ValueType};
use crate::naming::{constant_name, file_stem, key_constant_name, validate_identifier};

use dialect::Dialect;

/// Target language of the generated units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Kotlin `object` declarations with `const val` members.
    #[default]
    Kotlin,
    /// Rust `pub mod` blocks with `pub const` items, for `include!`.
    Rust,
}

impl Target {
    /// Lowercase name used in manifests.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kotlin => "kotlin",
            Self::Rust => "rust",
        }
    }

    /// File name of the main unit when none is configured.
    #[must_use]
    pub const fn default_build_config_file(self) -> &'static str {
        match self {
            Self::Kotlin => "BuildConfig.kt",
            Self::Rust => "build_config.rs",
        }
    }

    /// File name of the decryption helper unit.
    #[must_use]
    pub fn crypto_helper_file(self) -> &'static str {
        self.dialect().crypto_helper().0
    }

    fn dialect(self) -> &'static dyn Dialect {
        match self {
            Self::Kotlin => &kotlin::Kotlin,
            Self::Rust => &rust::Rust,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A target name that is neither `kotlin` nor `rust`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown target '{0}'; expected 'kotlin' or 'rust'")]
pub struct UnknownTarget(pub String);

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kotlin" | "kt" => Ok(Self::Kotlin),
            "rust" | "rs" => Ok(Self::Rust),
            _ => Err(UnknownTarget(s.to_owned())),
        }
    }
}

/// File and type names of the generated units.
///
/// Unset type names default to the file name without its extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitNames {
    /// Main unit file name; defaults to [`Target::default_build_config_file`].
    pub build_config_file: Option<String>,
    /// Namespace declared by the main unit.
    pub build_config_type: Option<String>,
    /// Secret unit file name. Required when any scope declares a secret.
    pub secret_file: Option<String>,
    /// Namespace declared by the secret unit.
    pub secret_type: Option<String>,
}

/// Options shared by every rendered scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Dotted package or namespace path, e.g. `com.example.app`.
    pub package_name: String,
    /// Target language.
    pub target: Target,
    /// Output unit names.
    pub units: UnitNames,
    /// Whether scopes with secrets also receive the decryption helper.
    pub write_crypto_helper: bool,
}

impl EmitOptions {
    /// Creates options with default unit names and the helper enabled.
    #[must_use]
    pub fn new(package_name: impl Into<String>, target: Target) -> Self {
        Self {
            package_name: package_name.into(),
            target,
            units: UnitNames::default(),
            write_crypto_helper: true,
        }
    }

    /// Sets the secret unit file name.
    #[must_use]
    pub fn with_secret_file(mut self, file_name: impl Into<String>) -> Self {
        self.units.secret_file = Some(file_name.into());
        self
    }

    /// Replaces all unit names.
    #[must_use]
    pub fn with_units(mut self, units: UnitNames) -> Self {
        self.units = units;
        self
    }

    /// Enables or disables the decryption helper unit.
    #[must_use]
    pub const fn with_crypto_helper(mut self, enabled: bool) -> Self {
        self.write_crypto_helper = enabled;
        self
    }

    /// Validates the package and unit names and fills in defaults.
    pub(crate) fn resolve(&self) -> Result<ResolvedUnits, GenerateError> {
        validate_package_name(&self.package_name)?;
        let dialect = self.target.dialect();
        let main_file = self
            .units
            .build_config_file
            .clone()
            .unwrap_or_else(|| self.target.default_build_config_file().to_owned());
        validate_unit_file(&main_file)?;
        let main_type = resolve_type(dialect, &main_file, self.units.build_config_type.as_deref())?;

        let secret = match &self.units.secret_file {
            Some(file) => {
                validate_unit_file(file)?;
                ensure_distinct(&main_file, "main", file, "secret")?;
                if self.write_crypto_helper {
                    let helper = self.target.crypto_helper_file();
                    ensure_distinct(&main_file, "main", helper, "crypto helper")?;
                    ensure_distinct(file, "secret", helper, "crypto helper")?;
                }
                let type_name = resolve_type(dialect, file, self.units.secret_type.as_deref())?;
                Some((file.clone(), type_name))
            }
            None => None,
        };
        Ok(ResolvedUnits {
            main_file,
            main_type,
            secret,
        })
    }
}

/// Unit names after defaults and validation.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedUnits {
    main_file: String,
    main_type: String,
    secret: Option<(String, String)>,
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    /// File name within the scope's output directory.
    pub file_name: String,
    /// Complete file contents.
    pub contents: String,
}

/// Every unit rendered for one scope, held in memory until written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedScope {
    /// Scope name.
    pub scope: String,
    /// Directory of the units, relative to the output root.
    pub relative_dir: Utf8PathBuf,
    /// Main unit with all non-secret properties.
    pub main: OutputUnit,
    /// Secret unit, present when the scope declares secrets.
    pub secrets: Option<OutputUnit>,
    /// Decryption helper, present with the secret unit unless disabled.
    pub crypto_helper: Option<OutputUnit>,
}

impl RenderedScope {
    /// Units in write order: main, secret, helper.
    pub fn units(&self) -> impl Iterator<Item = &OutputUnit> {
        std::iter::once(&self.main)
            .chain(self.secrets.as_ref())
            .chain(self.crypto_helper.as_ref())
    }
}

/// Renders one scope without touching the filesystem.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidPackageName`] or
/// [`GenerateError::InvalidUnitName`] for bad options, and
/// [`GenerateError::SecretUnitRequired`] when the scope declares a secret
/// but no secret unit file name is configured.
pub fn render_scope(scope: &Scope, options: &EmitOptions) -> Result<RenderedScope, GenerateError> {
    let units = options.resolve()?;
    render_resolved(scope, options, &units)
}

pub(crate) fn render_resolved(
    scope: &Scope,
    options: &EmitOptions,
    units: &ResolvedUnits,
) -> Result<RenderedScope, GenerateError> {
    let dialect = options.target.dialect();
    debug!(
        scope = scope.name(),
        properties = scope.properties().len(),
        target = %options.target,
        "rendering scope"
    );

    let secret_unit = match (scope.secrets().next(), &units.secret) {
        (Some(secret), None) => {
            return Err(GenerateError::SecretUnitRequired {
                scope: scope.name().to_owned(),
                property: secret.name().to_owned(),
            });
        }
        (Some(_), Some(names)) => Some(names),
        (None, _) => None,
    };

    let mut main = Vec::new();
    let mut sealed = Vec::new();
    for node in scope.properties() {
        let (main_fragment, secret_fragment) = render_node(dialect, node);
        main.extend(main_fragment);
        sealed.extend(secret_fragment);
    }

    let package = &options.package_name;
    let main_unit = OutputUnit {
        file_name: units.main_file.clone(),
        contents: render_unit(dialect, package, &units.main_type, &main),
    };
    let secrets = secret_unit.map(|(file_name, type_name)| OutputUnit {
        file_name: file_name.clone(),
        contents: render_unit(dialect, package, type_name, &sealed),
    });
    let crypto_helper = (secrets.is_some() && options.write_crypto_helper).then(|| {
        let (file_name, body) = dialect.crypto_helper();
        OutputUnit {
            file_name: file_name.to_owned(),
            contents: format!("{}{body}", dialect.file_header(package)),
        }
    });

    let mut relative_dir = Utf8PathBuf::from(scope.name());
    if dialect.nests_by_package() {
        relative_dir.extend(package.split('.'));
    }

    Ok(RenderedScope {
        scope: scope.name().to_owned(),
        relative_dir,
        main: main_unit,
        secrets,
        crypto_helper,
    })
}

/// Lines of one declaration, relative to the enclosing namespace.
#[derive(Debug)]
struct Fragment {
    lines: Vec<String>,
    block: bool,
}

impl Fragment {
    fn declarations(lines: Vec<String>) -> Self {
        Self {
            lines,
            block: false,
        }
    }
}

fn render_node(dialect: &dyn Dialect, node: &PropertyNode) -> (Option<Fragment>, Option<Fragment>) {
    match node {
        PropertyNode::Primitive(primitive) => {
            let line = dialect.constant(
                &constant_name(primitive.name()),
                primitive.value_type(),
                primitive.nullable(),
                primitive.value(),
            );
            (Some(Fragment::declarations(vec![line])), None)
        }
        PropertyNode::Object(object) => (Some(render_object(dialect, object)), None),
        PropertyNode::Secret(secret) => (None, Some(render_secret(dialect, secret))),
    }
}

fn render_object(dialect: &dyn Dialect, object: &ObjectProperty) -> Fragment {
    let children: Vec<Fragment> = object
        .children()
        .iter()
        .filter_map(|child| render_node(dialect, child).0)
        .collect();
    let mut lines = vec![dialect.open_namespace(object.name())];
    lines.extend(indent(dialect, join(&children)));
    lines.push("}".to_owned());
    Fragment { lines, block: true }
}

fn render_secret(dialect: &dyn Dialect, secret: &SecretProperty) -> Fragment {
    let string = |name: String, value: &str| {
        let scalar = Scalar::from(value);
        dialect.constant(&name, ValueType::String, false, Some(&scalar))
    };
    Fragment::declarations(vec![
        string(constant_name(secret.name()), secret.sealed()),
        string(key_constant_name(secret.name()), secret.encryption_key()),
    ])
}

fn join(fragments: &[Fragment]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut previous_block = None;
    for fragment in fragments {
        if previous_block.is_some_and(|block| block || fragment.block) {
            lines.push(String::new());
        }
        lines.extend(fragment.lines.iter().cloned());
        previous_block = Some(fragment.block);
    }
    lines
}

fn indent(dialect: &dyn Dialect, lines: Vec<String>) -> impl Iterator<Item = String> {
    let prefix = dialect.indent();
    lines.into_iter().map(move |line| {
        if line.is_empty() {
            line
        } else {
            format!("{prefix}{line}")
        }
    })
}

fn render_unit(
    dialect: &dyn Dialect,
    package: &str,
    type_name: &str,
    fragments: &[Fragment],
) -> String {
    let mut lines = dialect.open_unit(type_name);
    lines.extend(indent(dialect, join(fragments)));
    lines.push("}".to_owned());

    let mut contents = dialect.file_header(package);
    for line in lines {
        contents.push_str(&line);
        contents.push('\n');
    }
    contents
}

fn resolve_type(
    dialect: &dyn Dialect,
    file_name: &str,
    configured: Option<&str>,
) -> Result<String, GenerateError> {
    let raw = configured.unwrap_or_else(|| file_stem(file_name));
    validate_identifier(raw).map_err(|_| GenerateError::InvalidUnitName(raw.to_owned()))?;
    Ok(dialect.unit_type_name(raw))
}

fn validate_package_name(package: &str) -> Result<(), GenerateError> {
    let valid = !package.is_empty()
        && package
            .split('.')
            .all(|segment| validate_identifier(segment).is_ok());
    if valid {
        Ok(())
    } else {
        Err(GenerateError::InvalidPackageName(package.to_owned()))
    }
}

/// Rejects two units sharing one file name. Case is ignored so the check
/// also holds on case-insensitive filesystems.
fn ensure_distinct(
    first_file: &str,
    first: &'static str,
    second_file: &str,
    second: &'static str,
) -> Result<(), GenerateError> {
    if first_file.eq_ignore_ascii_case(second_file) {
        return Err(GenerateError::UnitNameCollision {
            file_name: second_file.to_owned(),
            first,
            second,
        });
    }
    Ok(())
}

fn validate_unit_file(file_name: &str) -> Result<(), GenerateError> {
    let invalid = file_name.is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(['/', '\\'])
        || file_name.chars().any(char::is_control);
    if invalid {
        Err(GenerateError::InvalidUnitName(file_name.to_owned()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests panic to surface broken fixtures")]
mod tests;
