//! Declaration handles.
//!
//! A [`Decl`] borrows the [`ModelVersion`] it was obtained from, so it cannot
//! outlive that version. A [`DeclHandle`] is the detached form: it can be
//! stored freely but has to be re-attached with [`ModelVersion::get`], which
//! checks that the handle came from the same version.

use crate::name::QualifiedName;
use crate::schema::{MemberKind, TypeKind};
use crate::version::{NodeData, NodeId, TypeRef};
use crate::{ModelVersion, VersionId};
use std::fmt;

/// A detached declaration handle, valid only for the version that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclHandle {
    pub(crate) version: VersionId,
    pub(crate) id: NodeId,
}

impl DeclHandle {
    /// The version this handle belongs to.
    pub fn version(&self) -> VersionId {
        self.version
    }
}

/// What a declaration is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Namespace,
    Type(TypeKind),
    Member(MemberKind),
}

/// A declaration within one model version.
#[derive(Clone, Copy)]
pub struct Decl<'m> {
    version: &'m ModelVersion,
    id: NodeId,
}

impl<'m> Decl<'m> {
    pub(crate) fn new(version: &'m ModelVersion, id: NodeId) -> Self {
        Self { version, id }
    }

    /// Detach into a handle stamped with this version.
    pub fn handle(&self) -> DeclHandle {
        DeclHandle {
            version: self.version.id,
            id: self.id,
        }
    }

    pub fn version(&self) -> &'m ModelVersion {
        self.version
    }

    /// Simple name; empty for the global namespace.
    pub fn name(&self) -> &'m str {
        &self.version.nodes[self.id].name
    }

    pub fn kind(&self) -> DeclKind {
        match &self.version.nodes[self.id].data {
            NodeData::Namespace { .. } => DeclKind::Namespace,
            NodeData::Type { kind, .. } => DeclKind::Type(*kind),
            NodeData::Member { kind, .. } => DeclKind::Member(*kind),
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(self.kind(), DeclKind::Type(_))
    }

    pub fn is_property(&self) -> bool {
        matches!(self.kind(), DeclKind::Member(MemberKind::Property))
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind(), DeclKind::Member(MemberKind::Field))
    }

    /// Fully qualified name; `None` for the global namespace.
    pub fn qualified_name(&self) -> Option<QualifiedName> {
        self.version.path_of(self.id)
    }

    pub fn parent(&self) -> Option<Decl<'m>> {
        self.version.nodes[self.id]
            .parent
            .map(|id| Decl::new(self.version, id))
    }

    /// Child namespaces, in declaration order.
    pub fn namespaces(&self) -> impl Iterator<Item = Decl<'m>> + 'm {
        let version = self.version;
        let ids: &'m [NodeId] = match &version.nodes[self.id].data {
            NodeData::Namespace { namespaces, .. } => namespaces,
            _ => &[],
        };
        ids.iter().map(move |&id| Decl::new(version, id))
    }

    /// Types directly contained in a namespace, in declaration order.
    pub fn types(&self) -> impl Iterator<Item = Decl<'m>> + 'm {
        let version = self.version;
        let ids: &'m [NodeId] = match &version.nodes[self.id].data {
            NodeData::Namespace { types, .. } => types,
            _ => &[],
        };
        ids.iter().map(move |&id| Decl::new(version, id))
    }

    /// Members of a type, in declaration order.
    pub fn members(&self) -> impl Iterator<Item = Decl<'m>> + 'm {
        let version = self.version;
        let ids: &'m [NodeId] = match &version.nodes[self.id].data {
            NodeData::Type { members, .. } => members,
            _ => &[],
        };
        ids.iter().map(move |&id| Decl::new(version, id))
    }

    /// Declared type of a member, if it has one.
    pub fn declared_type(&self) -> Option<DeclaredType<'m>> {
        match &self.version.nodes[self.id].data {
            NodeData::Member { ty: Some(ty), .. } => Some(match ty {
                TypeRef::Declared(id) => DeclaredType::Declared(Decl::new(self.version, *id)),
                TypeRef::External(text) => DeclaredType::External(text.as_str()),
            }),
            _ => None,
        }
    }
}

impl PartialEq for Decl<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.version.id == other.version.id && self.id == other.id
    }
}

impl Eq for Decl<'_> {}

impl fmt::Debug for Decl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.qualified_name() {
            Some(name) => write!(f, "Decl({} {name})", self.version.id),
            None => write!(f, "Decl({} <global>)", self.version.id),
        }
    }
}

/// Declared type of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredType<'m> {
    /// A type declared in the same model.
    Declared(Decl<'m>),
    /// A type outside the model, as written.
    External(&'m str),
}

impl DeclaredType<'_> {
    /// Simple name of the type: `BindableProperty` for
    /// `Xamarin.Forms.BindableProperty`, `List` for `System.List<App.Foo>`.
    pub fn simple_name(&self) -> &str {
        match self {
            DeclaredType::Declared(decl) => decl.name(),
            DeclaredType::External(text) => {
                let text: &str = text;
                let head = text.split('<').next().unwrap_or(text);
                head.rsplit('.').next().unwrap_or(head)
            }
        }
    }

    /// Full name as it would be written in a project file.
    pub fn full_name(&self) -> String {
        match self {
            DeclaredType::Declared(decl) => decl
                .qualified_name()
                .map(|name| name.to_string())
                .unwrap_or_default(),
            DeclaredType::External(text) => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Project;

    fn version() -> ModelVersion {
        let project: Project = serde_json::from_str(
            r#"{
                "name": "Sample",
                "namespaces": [
                    { "name": "Ui", "types": [ { "name": "BindableProperty" } ] },
                    { "name": "App", "types": [
                        { "name": "Widget", "members": [
                            { "name": "Color", "kind": "property", "type": "System.Drawing.Color" },
                            { "name": "ColorProperty", "kind": "field", "type": "Ui.BindableProperty" },
                            { "name": "Items", "kind": "property", "type": "System.List<App.Widget>" }
                        ] }
                    ] }
                ]
            }"#,
        )
        .unwrap();
        ModelVersion::from_project(&project).unwrap()
    }

    fn widget(version: &ModelVersion) -> Decl<'_> {
        version
            .root()
            .namespaces()
            .find(|ns| ns.name() == "App")
            .and_then(|ns| ns.types().next())
            .unwrap()
    }

    #[test]
    fn test_member_navigation() {
        let version = version();
        let widget = widget(&version);
        assert_eq!(widget.kind(), DeclKind::Type(TypeKind::Class));

        let members: Vec<_> = widget.members().map(|m| m.name()).collect();
        assert_eq!(members, vec!["Color", "ColorProperty", "Items"]);

        let color = widget.members().next().unwrap();
        assert!(color.is_property());
        assert_eq!(color.parent(), Some(widget));
        assert_eq!(color.qualified_name().unwrap().as_str(), "App.Widget.Color");
    }

    #[test]
    fn test_declared_type_simple_names() {
        let version = version();
        let members: Vec<_> = widget(&version).members().collect();

        let color = members[0].declared_type().unwrap();
        assert_eq!(color, DeclaredType::External("System.Drawing.Color"));
        assert_eq!(color.simple_name(), "Color");

        let backing = members[1].declared_type().unwrap();
        assert!(matches!(backing, DeclaredType::Declared(_)));
        assert_eq!(backing.simple_name(), "BindableProperty");
        assert_eq!(backing.full_name(), "Ui.BindableProperty");

        assert_eq!(members[2].declared_type().unwrap().simple_name(), "List");
    }

    #[test]
    fn test_handle_roundtrip_same_version() {
        let version = version();
        let widget = widget(&version);
        let handle = widget.handle();
        assert_eq!(handle.version(), version.id());
        assert_eq!(version.get(handle).unwrap(), widget);
    }
}
