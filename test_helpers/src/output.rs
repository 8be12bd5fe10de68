//! Read access to a directory of generated units.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

/// Capability handle on a generation output root.
#[derive(Debug)]
pub struct GeneratedTree {
    root: Utf8PathBuf,
    dir: Dir,
}

impl GeneratedTree {
    /// Opens the output root at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let dir = Dir::open_ambient_dir(&root, ambient_authority())
            .with_context(|| format!("open output root {root}"))?;
        Ok(Self { root, dir })
    }

    /// Reads a generated unit by its path relative to the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or not UTF-8.
    pub fn read(&self, relative: impl AsRef<Utf8Path>) -> Result<String> {
        let relative = relative.as_ref();
        self.dir
            .read_to_string(relative)
            .with_context(|| format!("read {}", self.root.join(relative)))
    }

    /// Whether a file or directory exists at `relative`.
    #[must_use]
    pub fn exists(&self, relative: impl AsRef<Utf8Path>) -> bool {
        self.dir.exists(relative.as_ref())
    }

    /// Lists every file below the root, relative and sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be read.
    pub fn files(&self) -> Result<Vec<Utf8PathBuf>> {
        let mut files = Vec::new();
        collect(&self.dir, Utf8Path::new(""), &mut files)?;
        files.sort();
        Ok(files)
    }
}

fn collect(dir: &Dir, prefix: &Utf8Path, files: &mut Vec<Utf8PathBuf>) -> Result<()> {
    for entry in dir.entries().context("list directory")? {
        let entry = entry.context("read directory entry")?;
        let name = entry.file_name().context("entry name is not UTF-8")?;
        let path = prefix.join(&name);
        if entry.file_type().context("read file type")?.is_dir() {
            let child = entry.open_dir().with_context(|| format!("open {path}"))?;
            collect(&child, &path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}
