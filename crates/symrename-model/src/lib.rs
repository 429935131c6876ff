//! # symrename model
//!
//! The program model the rename engine works against.
//!
//! A [`ProgramModel`] compiles a project into an immutable [`ModelVersion`].
//! Every rename produces a new version; declaration handles ([`Decl`],
//! [`DeclHandle`]) are only valid for the version that produced them.
//! A [`Persistence`] backend commits the final version.

mod decl;
mod error;
mod memory;
mod name;
mod schema;
mod store;
mod version;

pub use decl::{Decl, DeclHandle, DeclKind, DeclaredType};
pub use error::{CommitError, ModelError, RenameError};
pub use memory::InMemoryModel;
pub use name::{check_simple_name, NameError, QualifiedName, SEPARATOR};
pub use schema::{MemberDef, MemberKind, NamespaceDef, Project, TypeDef, TypeKind};
pub use store::{JsonStore, MemoryStore};
pub use version::{ModelVersion, Node, NodeId, VersionId};

use async_trait::async_trait;

/// Produces and edits model versions.
///
/// Both operations may be long-running; callers await them one at a time.
#[async_trait]
pub trait ProgramModel: Send + Sync {
    /// Build the initial version of the program.
    async fn compile(&self) -> Result<ModelVersion, ModelError>;

    /// Rename `target`, returning the version that reflects the edit.
    ///
    /// `target` must come from the version being edited; any handle from
    /// another version is rejected with [`RenameError::StaleHandle`].
    async fn rename_symbol(
        &self,
        target: Decl<'_>,
        new_name: &str,
    ) -> Result<ModelVersion, RenameError>;
}

/// Commits a final model version to durable storage.
pub trait Persistence {
    fn commit(&mut self, version: &ModelVersion) -> Result<(), CommitError>;
}

impl<P: Persistence + ?Sized> Persistence for &mut P {
    fn commit(&mut self, version: &ModelVersion) -> Result<(), CommitError> {
        (**self).commit(version)
    }
}
