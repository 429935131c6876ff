//! CLI commands.

pub mod apply;
pub mod check;
pub mod resolve;
pub mod symbols;

use std::path::Path;
use symrename_model::{InMemoryModel, ModelVersion};

/// Load and compile a project file.
pub(crate) fn load_project(path: &Path) -> miette::Result<ModelVersion> {
    let model = InMemoryModel::from_path(path)
        .map_err(|e| miette::miette!("Failed to load {}: {}", path.display(), e))?;
    ModelVersion::from_project(model.project())
        .map_err(|e| miette::miette!("Failed to compile {}: {}", path.display(), e))
}
