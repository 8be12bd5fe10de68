//! Capability-scoped writes of rendered units.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use std::io::Write;
use tracing::info;

use crate::emit::{OutputUnit, RenderedScope};
use crate::error::GenerateError;

/// Writes every unit of `rendered` below `out_dir` and returns their paths.
///
/// Existing files are truncated. Directories are created as needed.
pub(crate) fn write_scope(
    out_dir: &Utf8Path,
    rendered: &RenderedScope,
) -> Result<Vec<Utf8PathBuf>, GenerateError> {
    let root = ensure_dir(out_dir)?;
    let scope_dir = out_dir.join(&rendered.relative_dir);
    root.create_dir_all(&rendered.relative_dir)
        .map_err(|io_err| GenerateError::Io {
            path: scope_dir.clone(),
            source: io_err,
        })?;
    let dir = root
        .open_dir(&rendered.relative_dir)
        .map_err(|io_err| GenerateError::Io {
            path: scope_dir.clone(),
            source: io_err,
        })?;

    rendered
        .units()
        .map(|unit| {
            let path = write_unit(&dir, &scope_dir, unit)?;
            info!(scope = %rendered.scope, path = %path, "wrote unit");
            Ok(path)
        })
        .collect()
}

fn write_unit(
    dir: &Dir,
    dir_path: &Utf8Path,
    unit: &OutputUnit,
) -> Result<Utf8PathBuf, GenerateError> {
    let path = dir_path.join(&unit.file_name);
    let mut file = dir
        .open_with(
            &unit.file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|io_err| GenerateError::Io {
            path: path.clone(),
            source: io_err,
        })?;
    file.write_all(unit.contents.as_bytes())
        .map_err(|io_err| GenerateError::Io {
            path: path.clone(),
            source: io_err,
        })?;
    Ok(path)
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir, GenerateError> {
    let io_error = |io_err| GenerateError::Io {
        path: path.to_path_buf(),
        source: io_err,
    };
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority()).map_err(io_error)?;
            Dir::open_ambient_dir(path, ambient_authority()).map_err(io_error)
        }
        Err(open_err) => Err(io_error(open_err)),
    }
}
