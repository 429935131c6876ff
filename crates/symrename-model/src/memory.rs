//! In-memory program model backed by a project file.

use crate::schema::Project;
use crate::{Decl, ModelError, ModelVersion, ProgramModel, RenameError, VersionId};
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// A [`ProgramModel`] that compiles a [`Project`] held in memory.
///
/// Only the version issued last (by `compile` or `rename_symbol`) can be
/// edited; handles from any earlier version are stale.
#[derive(Debug)]
pub struct InMemoryModel {
    project: Project,
    latest: Mutex<Option<VersionId>>,
}

impl InMemoryModel {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            latest: Mutex::new(None),
        }
    }

    /// Load a project file.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let content = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let project: Project = serde_json::from_str(json)?;
        Ok(Self::new(project))
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// The version that may be edited next.
    pub fn latest(&self) -> Option<VersionId> {
        *self.lock_latest()
    }

    fn lock_latest(&self) -> MutexGuard<'_, Option<VersionId>> {
        self.latest
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ProgramModel for InMemoryModel {
    async fn compile(&self) -> Result<ModelVersion, ModelError> {
        let version = ModelVersion::from_project(&self.project)?;
        *self.lock_latest() = Some(version.id());
        debug!(
            "Compiled project '{}' ({} types, {} members) as {}",
            self.project.name,
            version.type_count(),
            version.member_count(),
            version.id()
        );
        Ok(version)
    }

    async fn rename_symbol(
        &self,
        target: Decl<'_>,
        new_name: &str,
    ) -> Result<ModelVersion, RenameError> {
        let mut latest = self.lock_latest();
        let handle = target.handle();
        match *latest {
            Some(current) if current == handle.version() => {}
            Some(current) => {
                return Err(RenameError::StaleHandle {
                    handle: handle.version(),
                    model: current,
                })
            }
            None => return Err(RenameError::NotCompiled),
        }

        let next = target.version().rename(handle, new_name)?;
        *latest = Some(next.id());
        debug!(
            "Renamed {:?} to '{}' ({} -> {})",
            target,
            new_name,
            target.version().id(),
            next.id()
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = r#"{
        "name": "Sample",
        "namespaces": [ { "name": "App", "types": [ { "name": "Foo" } ] } ]
    }"#;

    #[tokio::test]
    async fn test_compile_and_rename() {
        let model = InMemoryModel::from_json(PROJECT).unwrap();
        let version = model.compile().await.unwrap();
        let foo = version
            .root()
            .namespaces()
            .next()
            .and_then(|ns| ns.types().next())
            .unwrap();

        let next = model.rename_symbol(foo, "Bar").await.unwrap();
        assert_eq!(next.to_project().namespaces[0].types[0].name, "Bar");
        // The source project is untouched.
        assert_eq!(model.project().namespaces[0].types[0].name, "Foo");
    }

    #[tokio::test]
    async fn test_compile_is_fresh_each_time() {
        let model = InMemoryModel::from_json(PROJECT).unwrap();
        let first = model.compile().await.unwrap();
        let second = model.compile().await.unwrap();
        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn test_handle_from_superseded_version_is_stale() {
        let model = InMemoryModel::from_json(
            r#"{
                "name": "Sample",
                "namespaces": [ { "name": "App", "types": [
                    { "name": "Foo" }, { "name": "Qux" }
                ] } ]
            }"#,
        )
        .unwrap();
        let first = model.compile().await.unwrap();
        let mut types = first.root().namespaces().next().unwrap().types();
        let foo = types.next().unwrap();
        let qux = types.next().unwrap();

        let second = model.rename_symbol(foo, "Bar").await.unwrap();
        assert_eq!(model.latest(), Some(second.id()));

        let err = model.rename_symbol(qux, "Baz").await.unwrap_err();
        assert_eq!(
            err,
            RenameError::StaleHandle {
                handle: first.id(),
                model: second.id(),
            }
        );

        // The current version is still editable and keeps the earlier rename.
        let qux = second.root().namespaces().next().unwrap().types().nth(1).unwrap();
        let third = model.rename_symbol(qux, "Baz").await.unwrap();
        let names: Vec<_> = third.to_project().namespaces[0]
            .types
            .iter()
            .map(|ty| ty.name.clone())
            .collect();
        assert_eq!(names, vec!["Bar", "Baz"]);
    }

    #[tokio::test]
    async fn test_rename_requires_compile() {
        let model = InMemoryModel::from_json(PROJECT).unwrap();
        let version = ModelVersion::from_project(model.project()).unwrap();
        let foo = version.root().namespaces().next().unwrap().types().next().unwrap();
        assert_eq!(
            model.rename_symbol(foo, "Bar").await.unwrap_err(),
            RenameError::NotCompiled
        );
    }

    #[test]
    fn test_missing_file() {
        let err = InMemoryModel::from_path(Path::new("/nonexistent/project.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            InMemoryModel::from_json("{ not json"),
            Err(ModelError::Json(_))
        ));
    }
}
