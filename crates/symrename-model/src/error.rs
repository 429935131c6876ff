//! Model error definitions.

use crate::VersionId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or querying a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid project file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid project: {0}")]
    InvalidProject(String),

    #[error("declaration handle from version {handle} used against version {model}")]
    StaleHandle { handle: VersionId, model: VersionId },
}

/// Errors raised when the model rejects a rename.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    #[error("declaration handle from version {handle} used against version {model}")]
    StaleHandle { handle: VersionId, model: VersionId },

    #[error("'{0}' is not a valid simple name")]
    InvalidName(String),

    #[error("'{existing}' already exists")]
    Collision { existing: String },

    #[error("{0} declarations cannot be renamed")]
    NotRenamable(&'static str),

    #[error("model has not been compiled")]
    NotCompiled,
}

/// Errors raised while committing a model version to storage.
#[derive(Debug, Error)]
pub enum CommitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
