//! Generation orchestrator.
//!
//! Every selected scope is rendered into memory before the first file is
//! written, so a model error never leaves partial output behind.

use camino::Utf8PathBuf;
use tracing::{debug, warn};

use crate::emit::{EmitOptions, RenderedScope, render_resolved};
use crate::error::GenerateError;
use crate::model::PropertyModel;
use crate::writer::write_scope;

/// Inputs for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Package name, target and unit names.
    pub options: EmitOptions,
    /// Root directory; each scope writes below `<out_dir>/<scope>/`.
    pub out_dir: Utf8PathBuf,
    /// Scopes to generate. Empty selects every scope in the model.
    pub scopes: Vec<String>,
}

impl GenerationRequest {
    /// Creates a request covering every scope.
    #[must_use]
    pub fn new(options: EmitOptions, out_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            options,
            out_dir: out_dir.into(),
            scopes: Vec::new(),
        }
    }

    /// Restricts generation to the named scopes.
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    fn selects(&self, scope: &str) -> bool {
        self.scopes.is_empty() || self.scopes.iter().any(|selected| selected == scope)
    }
}

/// Files written by [`generate`], in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Absolute or `out_dir`-relative paths of every written unit.
    pub files: Vec<Utf8PathBuf>,
}

/// Renders the selected scopes without writing anything.
///
/// # Errors
///
/// Returns the first [`GenerateError`] raised while validating options or
/// rendering a scope.
pub fn render(
    model: &PropertyModel,
    request: &GenerationRequest,
) -> Result<Vec<RenderedScope>, GenerateError> {
    let units = request.options.resolve()?;
    for missing in request
        .scopes
        .iter()
        .filter(|name| model.scope(name).is_none())
    {
        warn!(scope = %missing, "requested scope is not declared; skipping");
    }
    model
        .scopes()
        .iter()
        .filter(|scope| request.selects(scope.name()))
        .map(|scope| render_resolved(scope, &request.options, &units))
        .collect()
}

/// Renders every selected scope, then writes the units to disk.
///
/// Nothing is written unless every scope renders successfully. A write
/// failure stops the run; units already written stay in place.
///
/// # Errors
///
/// Returns [`GenerateError`] for invalid options, a secret without a secret
/// unit, or an I/O failure.
pub fn generate(
    model: &PropertyModel,
    request: &GenerationRequest,
) -> Result<GenerationReport, GenerateError> {
    let rendered = render(model, request)?;
    debug!(scopes = rendered.len(), out_dir = %request.out_dir, "rendered all scopes");
    let mut report = GenerationReport::default();
    for scope in &rendered {
        report.files.extend(write_scope(&request.out_dir, scope)?);
    }
    Ok(report)
}
