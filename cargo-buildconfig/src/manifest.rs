//! Layered manifest loading.
//!
//! Precedence, lowest to highest: the TOML manifest, `BUILDCONFIG_*`
//! environment variables for top-level settings, then command-line
//! overrides.

use buildconfig::{EmitOptions, Target, UnitNames};
use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::Overrides;
use crate::error::CliError;

/// Prefix of environment variables that override manifest settings.
pub const ENV_PREFIX: &str = "BUILDCONFIG_";

/// Keys that may be set from the environment.
///
/// Property declarations are deliberately absent; secrets reach the model
/// through `value_env` instead.
const ENV_KEYS: [&str; 8] = [
    "package_name",
    "target",
    "out_dir",
    "build_config_file_name",
    "build_config_type_name",
    "secret_key_file_name",
    "secret_key_type_name",
    "write_crypto_utils",
];

/// Output root used when the manifest does not set one.
pub const DEFAULT_OUT_DIR: &str = "build/generated/buildconfig";

/// Fully layered manifest.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Manifest {
    /// Package or namespace of the generated units.
    pub package_name: String,
    /// Target language.
    #[serde(default)]
    pub target: Target,
    /// Output root.
    #[serde(default = "default_out_dir")]
    pub out_dir: Utf8PathBuf,
    /// Main unit file name.
    #[serde(default)]
    pub build_config_file_name: Option<String>,
    /// Main unit namespace.
    #[serde(default)]
    pub build_config_type_name: Option<String>,
    /// Secret unit file name.
    #[serde(default)]
    pub secret_key_file_name: Option<String>,
    /// Secret unit namespace.
    #[serde(default)]
    pub secret_key_type_name: Option<String>,
    /// Whether to emit the decryption helper.
    #[serde(default = "default_true")]
    pub write_crypto_utils: bool,
    /// Properties of the default scope.
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
    /// Additional named scopes.
    #[serde(default)]
    pub source_sets: Vec<SourceSet>,
}

fn default_out_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_OUT_DIR)
}

const fn default_true() -> bool {
    true
}

/// A named scope and its properties.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SourceSet {
    /// Scope name; also the output subdirectory.
    pub name: String,
    /// Properties in declaration order.
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
}

/// One property declaration, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyDecl {
    /// A string constant.
    String {
        /// Property name.
        name: String,
        /// Value; omit for `null`.
        #[serde(default)]
        value: Option<String>,
        /// Whether the constant may be `null`.
        #[serde(default)]
        nullable: bool,
    },
    /// A boolean constant.
    Bool {
        /// Property name.
        name: String,
        /// Value; omit for `null`.
        #[serde(default)]
        value: Option<bool>,
        /// Whether the constant may be `null`.
        #[serde(default)]
        nullable: bool,
    },
    /// A 32-bit integer constant.
    Int {
        /// Property name.
        name: String,
        /// Value; omit for `null`.
        #[serde(default)]
        value: Option<i32>,
        /// Whether the constant may be `null`.
        #[serde(default)]
        nullable: bool,
    },
    /// A 64-bit integer constant.
    Long {
        /// Property name.
        name: String,
        /// Value; omit for `null`.
        #[serde(default)]
        value: Option<i64>,
        /// Whether the constant may be `null`.
        #[serde(default)]
        nullable: bool,
    },
    /// A 32-bit float constant.
    Float {
        /// Property name.
        name: String,
        /// Value; omit for `null`.
        #[serde(default)]
        value: Option<f32>,
        /// Whether the constant may be `null`.
        #[serde(default)]
        nullable: bool,
    },
    /// A 64-bit float constant.
    Double {
        /// Property name.
        name: String,
        /// Value; omit for `null`.
        #[serde(default)]
        value: Option<f64>,
        /// Whether the constant may be `null`.
        #[serde(default)]
        nullable: bool,
    },
    /// A nested namespace.
    Object {
        /// Property name.
        name: String,
        /// Children in declaration order.
        #[serde(default)]
        properties: Vec<PropertyDecl>,
    },
    /// A secret sealed into the secret unit.
    Secret {
        /// Property name.
        name: String,
        /// Literal plaintext.
        #[serde(default)]
        value: Option<String>,
        /// Environment variable holding the plaintext; wins over `value`
        /// when set.
        #[serde(default)]
        value_env: Option<String>,
        /// Encryption keyword.
        key: String,
    },
}

impl Manifest {
    /// Builds emitter options from the top-level settings.
    #[must_use]
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions::new(self.package_name.clone(), self.target)
            .with_units(UnitNames {
                build_config_file: self.build_config_file_name.clone(),
                build_config_type: self.build_config_type_name.clone(),
                secret_file: self.secret_key_file_name.clone(),
                secret_type: self.secret_key_type_name.clone(),
            })
            .with_crypto_helper(self.write_crypto_utils)
    }
}

/// Loads the manifest at `path` and applies environment and CLI layers.
///
/// A relative `out_dir` from the file or the environment resolves against
/// the manifest's directory; one passed on the command line is kept as is.
///
/// # Errors
///
/// Returns [`CliError::ManifestNotFound`] when `path` does not exist and
/// [`CliError::Manifest`] when the layers cannot be extracted.
pub fn load(path: &Utf8Path, overrides: &Overrides) -> Result<Manifest, CliError> {
    if !path.is_file() {
        return Err(CliError::ManifestNotFound(path.to_path_buf()));
    }
    debug!(manifest = %path, "loading manifest");
    let mut manifest: Manifest = Figment::new()
        .merge(Toml::file(path.as_std_path()))
        .merge(Env::prefixed(ENV_PREFIX).only(&ENV_KEYS))
        .merge(Serialized::defaults(overrides))
        .extract()?;

    if overrides.out_dir.is_none() && manifest.out_dir.is_relative() {
        let base = path.parent().unwrap_or_else(|| Utf8Path::new(""));
        manifest.out_dir = base.join(&manifest.out_dir);
    }
    Ok(manifest)
}
