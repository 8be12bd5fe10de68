//! Library interface for the `cargo-buildconfig` subcommand.
//!
//! The pipeline loads a layered manifest (TOML file, `BUILDCONFIG_*`
//! variables, command-line overrides), builds a
//! [`PropertyModel`](buildconfig::PropertyModel) from its declarations and
//! hands it to [`buildconfig::generate`].

pub mod assemble;
pub mod cli;
pub mod error;
pub mod manifest;

use std::env;

use buildconfig::{GenerationReport, GenerationRequest};
use tracing::info;

use crate::cli::Args;
use crate::error::CliError;

/// Runs the subcommand, reading secret values from the process environment.
///
/// # Errors
///
/// Returns [`CliError`] when the manifest cannot be loaded, a declaration
/// is invalid, or generation fails.
pub fn run(args: &Args) -> Result<GenerationReport, CliError> {
    run_with_env(args, |var| env::var(var).ok())
}

/// Runs the subcommand with a caller-supplied environment lookup for
/// `value_env` secrets.
///
/// With `--dry-run` every unit is rendered and the returned report lists
/// the paths that would have been written.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with_env<L>(args: &Args, lookup: L) -> Result<GenerationReport, CliError>
where
    L: Fn(&str) -> Option<String>,
{
    let manifest = manifest::load(&args.manifest, &args.overrides)?;
    let model = assemble::build_model(&manifest, lookup)?;
    let request = GenerationRequest::new(manifest.emit_options(), manifest.out_dir.clone())
        .with_scopes(args.scopes.iter().cloned());

    if args.is_dry_run {
        let rendered = buildconfig::render(&model, &request)?;
        let files = rendered
            .iter()
            .flat_map(|scope| {
                let dir = request.out_dir.join(&scope.relative_dir);
                scope.units().map(move |unit| dir.join(&unit.file_name))
            })
            .collect::<Vec<_>>();
        for path in &files {
            info!(path = %path, "would write");
        }
        return Ok(GenerationReport { files });
    }

    let report = buildconfig::generate(&model, &request)?;
    info!(
        files = report.files.len(),
        out_dir = %request.out_dir,
        target = %request.options.target,
        "generated build config"
    );
    Ok(report)
}
