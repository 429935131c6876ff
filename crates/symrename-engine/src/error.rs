//! Engine error definitions.

use symrename_model::ModelError;
use thiserror::Error;

/// Errors that stop a run before any directive is applied.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("program model unavailable: {0}")]
    SourceUnavailable(#[source] ModelError),
}
