//! Command-line interface definitions for `cargo-buildconfig`.

use std::ffi::OsString;

use buildconfig::Target;
use camino::Utf8PathBuf;
use clap::{Args as ClapArgs, Parser};
use serde::Serialize;

/// Subcommand name Cargo passes as the first argument.
const CARGO_SUBCOMMAND: &str = "buildconfig";

/// Parsed CLI arguments for `cargo-buildconfig`.
#[derive(Debug, Parser)]
#[command(name = "cargo-buildconfig", bin_name = "cargo buildconfig")]
#[command(about = "Generate BuildConfig constant files from a TOML manifest")]
#[command(version)]
pub struct Args {
    /// Manifest describing the properties to generate.
    #[arg(long, short = 'm', value_name = "path", default_value = "buildconfig.toml")]
    pub manifest: Utf8PathBuf,
    /// Generate only this scope (repeat for several). Defaults to all scopes.
    #[arg(long = "scope", value_name = "name")]
    pub scopes: Vec<String>,
    /// Render every unit and report the paths without writing files.
    #[arg(long = "dry-run")]
    pub is_dry_run: bool,
    /// Settings that override the manifest and `BUILDCONFIG_*` variables.
    #[command(flatten)]
    pub overrides: Overrides,
}

/// Top-level manifest settings settable from the command line.
///
/// Unset fields are skipped when serialised so they never mask lower
/// layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, ClapArgs, Serialize)]
pub struct Overrides {
    /// Package or namespace of the generated units.
    #[arg(long, value_name = "name")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// Target language: `kotlin` or `rust`.
    #[arg(long, value_name = "language")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// Output root; relative paths resolve against the working directory.
    #[arg(long, value_name = "path")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<Utf8PathBuf>,
    /// File name of the main unit.
    #[arg(long, value_name = "file")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_config_file_name: Option<String>,
    /// Namespace declared by the main unit.
    #[arg(long, value_name = "name")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_config_type_name: Option<String>,
    /// File name of the secret unit.
    #[arg(long, value_name = "file")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key_file_name: Option<String>,
    /// Namespace declared by the secret unit.
    #[arg(long, value_name = "name")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key_type_name: Option<String>,
    /// Whether to emit the decryption helper next to the secret unit.
    #[arg(long, value_name = "bool")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_crypto_utils: Option<bool>,
}

/// Drops the subcommand name Cargo inserts for `cargo buildconfig ...`.
pub fn normalise_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    if args.get(1).is_some_and(|arg| arg == CARGO_SUBCOMMAND) {
        args.remove(1);
    }
    args
}
