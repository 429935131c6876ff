//! Persistence backends.

use crate::schema::Project;
use crate::{CommitError, ModelVersion, Persistence};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Writes the committed version as a project file.
///
/// The file is written to a temporary sibling first and then moved over the
/// target, so a failed commit leaves the previous file intact.
/// The written project keeps the layout of the file it was loaded from.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonStore {
    fn commit(&mut self, version: &ModelVersion) -> Result<(), CommitError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, &version.to_project())?;
        file.write_all(b"\n")?;
        file.persist(&self.path).map_err(|e| CommitError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;

        info!("Committed {} to {}", version.id(), self.path.display());
        Ok(())
    }
}

/// Keeps the last committed project in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    committed: Option<Project>,
    commits: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently committed project.
    pub fn committed(&self) -> Option<&Project> {
        self.committed.as_ref()
    }

    /// Number of commits received.
    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl Persistence for MemoryStore {
    fn commit(&mut self, version: &ModelVersion) -> Result<(), CommitError> {
        self.committed = Some(version.to_project());
        self.commits += 1;
        Ok(())
    }
}
