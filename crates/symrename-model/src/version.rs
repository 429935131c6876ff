//! Immutable, versioned program snapshots.
//!
//! A [`ModelVersion`] never changes after it is built. Renaming a
//! declaration produces a new version with a fresh [`VersionId`]; handles
//! taken from the old version are rejected by the new one.

use crate::name::{check_simple_name, QualifiedName, SEPARATOR};
use crate::schema::{MemberDef, MemberKind, NamespaceDef, Project, TypeDef, TypeKind};
use crate::{Decl, DeclHandle, ModelError, RenameError};
use la_arena::{Arena, Idx};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique model version ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionId(u64);

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

impl VersionId {
    pub fn fresh() -> Self {
        VersionId(NEXT_VERSION.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

pub type NodeId = Idx<Node>;

/// A declaration node: namespace, type or member.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: SmolStr,
    pub(crate) parent: Option<NodeId>,
    pub(crate) data: NodeData,
}

#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Namespace {
        namespaces: Vec<NodeId>,
        types: Vec<NodeId>,
    },
    Type {
        kind: TypeKind,
        members: Vec<NodeId>,
    },
    Member {
        kind: MemberKind,
        ty: Option<TypeRef>,
    },
}

/// Declared type of a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeRef {
    /// A type declared in this model.
    Declared(NodeId),
    /// A type from outside the model, by name.
    External(SmolStr),
}

/// An immutable snapshot of the program's declarations.
#[derive(Debug, Clone)]
pub struct ModelVersion {
    pub(crate) id: VersionId,
    pub(crate) nodes: Arena<Node>,
    pub(crate) root: NodeId,
    /// Project the first version was built from, kept for its file layout
    source: Arc<Project>,
    /// Type and member nodes in the order their definitions appear in `source`
    layout: Arc<Vec<NodeId>>,
}

impl ModelVersion {
    /// Build the first version of a project.
    pub fn from_project(project: &Project) -> Result<Self, ModelError> {
        let mut nodes = Arena::default();
        let root = nodes.alloc(Node {
            name: SmolStr::default(),
            parent: None,
            data: NodeData::Namespace {
                namespaces: Vec::new(),
                types: Vec::new(),
            },
        });

        let mut builder = Builder {
            nodes,
            types_by_name: FxHashMap::default(),
            pending: Vec::new(),
            layout: Vec::new(),
        };
        for ns in &project.namespaces {
            builder.add_namespace(root, "", ns)?;
        }
        for ty in &project.types {
            builder.add_type(root, "", ty)?;
        }

        let layout = std::mem::take(&mut builder.layout);
        Ok(Self {
            id: VersionId::fresh(),
            nodes: builder.link(),
            root,
            source: Arc::new(project.clone()),
            layout: Arc::new(layout),
        })
    }

    pub fn id(&self) -> VersionId {
        self.id
    }

    pub fn project_name(&self) -> &str {
        &self.source.name
    }

    /// The global namespace.
    pub fn root(&self) -> Decl<'_> {
        Decl::new(self, self.root)
    }

    /// Re-attach a detached handle, checking it belongs to this version.
    pub fn get(&self, handle: DeclHandle) -> Result<Decl<'_>, ModelError> {
        if handle.version != self.id {
            return Err(ModelError::StaleHandle {
                handle: handle.version,
                model: self.id,
            });
        }
        Ok(Decl::new(self, handle.id))
    }

    pub fn type_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|(_, node)| matches!(node.data, NodeData::Type { .. }))
            .count()
    }

    pub fn member_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|(_, node)| matches!(node.data, NodeData::Member { .. }))
            .count()
    }

    /// Produce a new version with `target` renamed to `new_name`.
    pub fn rename(&self, target: DeclHandle, new_name: &str) -> Result<ModelVersion, RenameError> {
        if target.version != self.id {
            return Err(RenameError::StaleHandle {
                handle: target.version,
                model: self.id,
            });
        }
        check_simple_name(new_name).map_err(|_| RenameError::InvalidName(new_name.to_string()))?;

        let node = &self.nodes[target.id];
        let parent = node
            .parent
            .ok_or(RenameError::NotRenamable("global namespace"))?;

        let collision = match (&node.data, &self.nodes[parent].data) {
            (NodeData::Namespace { .. }, _) => return Err(RenameError::NotRenamable("namespace")),
            (NodeData::Type { .. }, NodeData::Namespace { types, .. }) => types
                .iter()
                .copied()
                .find(|&id| id != target.id && self.nodes[id].name == new_name),
            (NodeData::Member { kind, .. }, NodeData::Type { members, .. }) => {
                members.iter().copied().find(|&id| {
                    id != target.id
                        && self.nodes[id].name == new_name
                        && !(is_method(*kind) && is_method(self.member_kind(id)))
                })
            }
            _ => None,
        };
        if let Some(existing) = collision {
            return Err(RenameError::Collision {
                existing: self
                    .path_of(existing)
                    .map(|name| name.to_string())
                    .unwrap_or_default(),
            });
        }

        let mut nodes = self.nodes.clone();
        if let NodeData::Type { members, .. } = &node.data {
            for &member in members {
                let is_constructor = matches!(
                    nodes[member].data,
                    NodeData::Member {
                        kind: MemberKind::Constructor,
                        ..
                    }
                );
                if is_constructor && nodes[member].name == node.name {
                    nodes[member].name = SmolStr::new(new_name);
                }
            }
        }
        nodes[target.id].name = SmolStr::new(new_name);
        Ok(ModelVersion {
            id: VersionId::fresh(),
            nodes,
            root: self.root,
            source: Arc::clone(&self.source),
            layout: Arc::clone(&self.layout),
        })
    }

    /// Lower this version back to the project format, using current names.
    ///
    /// The source layout is kept: namespace entries come back as written
    /// (dotted or repeated), only declaration names and member type
    /// references change.
    pub fn to_project(&self) -> Project {
        let mut project = (*self.source).clone();
        let mut layout = self.layout.iter().copied();
        for ns in &mut project.namespaces {
            self.relabel_namespace(ns, &mut layout);
        }
        for ty in &mut project.types {
            self.relabel_type(ty, &mut layout);
        }
        project
    }

    /// Qualified name of a node; `None` for the global namespace.
    pub(crate) fn path_of(&self, id: NodeId) -> Option<QualifiedName> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id];
            if node.parent.is_none() {
                break;
            }
            segments.push(node.name.as_str());
            current = node.parent;
        }
        if segments.is_empty() {
            return None;
        }
        segments.reverse();
        QualifiedName::parse(&segments.join(".")).ok()
    }

    fn member_kind(&self, id: NodeId) -> MemberKind {
        match &self.nodes[id].data {
            NodeData::Member { kind, .. } => *kind,
            _ => MemberKind::Field,
        }
    }

    fn relabel_namespace(&self, def: &mut NamespaceDef, layout: &mut impl Iterator<Item = NodeId>) {
        for ns in &mut def.namespaces {
            self.relabel_namespace(ns, layout);
        }
        for ty in &mut def.types {
            self.relabel_type(ty, layout);
        }
    }

    fn relabel_type(&self, def: &mut TypeDef, layout: &mut impl Iterator<Item = NodeId>) {
        if let Some(id) = layout.next() {
            def.name = self.nodes[id].name.to_string();
        }
        for member in &mut def.members {
            if let Some(id) = layout.next() {
                self.relabel_member(member, id);
            }
        }
    }

    fn relabel_member(&self, def: &mut MemberDef, id: NodeId) {
        let node = &self.nodes[id];
        def.name = node.name.to_string();
        if let NodeData::Member { ty: Some(ty), .. } = &node.data {
            def.ty = Some(match ty {
                TypeRef::Declared(target) => self
                    .path_of(*target)
                    .map(|name| name.to_string())
                    .unwrap_or_default(),
                TypeRef::External(text) => text.to_string(),
            });
        }
    }
}

fn is_method(kind: MemberKind) -> bool {
    matches!(kind, MemberKind::Method)
}

/// Builds the node arena from a project, then links member types.
struct Builder {
    nodes: Arena<Node>,
    types_by_name: FxHashMap<String, NodeId>,
    pending: Vec<(NodeId, String)>,
    layout: Vec<NodeId>,
}

impl Builder {
    fn add_namespace(
        &mut self,
        parent: NodeId,
        parent_path: &str,
        def: &NamespaceDef,
    ) -> Result<(), ModelError> {
        let mut current = parent;
        let mut path = parent_path.to_string();
        for segment in def.name.split(SEPARATOR) {
            check_simple_name(segment).map_err(|e| {
                ModelError::InvalidProject(format!("namespace '{}': {e}", def.name))
            })?;
            current = self.child_namespace(current, segment);
            path = join_path(&path, segment);
        }

        for ns in &def.namespaces {
            self.add_namespace(current, &path, ns)?;
        }
        for ty in &def.types {
            self.add_type(current, &path, ty)?;
        }
        Ok(())
    }

    /// Find or create a child namespace; repeated namespaces merge.
    fn child_namespace(&mut self, parent: NodeId, name: &str) -> NodeId {
        let existing = match &self.nodes[parent].data {
            NodeData::Namespace { namespaces, .. } => namespaces
                .iter()
                .copied()
                .find(|&id| self.nodes[id].name == name),
            _ => None,
        };
        if let Some(id) = existing {
            return id;
        }

        let id = self.nodes.alloc(Node {
            name: SmolStr::new(name),
            parent: Some(parent),
            data: NodeData::Namespace {
                namespaces: Vec::new(),
                types: Vec::new(),
            },
        });
        if let NodeData::Namespace { namespaces, .. } = &mut self.nodes[parent].data {
            namespaces.push(id);
        }
        id
    }

    fn add_type(&mut self, parent: NodeId, path: &str, def: &TypeDef) -> Result<(), ModelError> {
        check_simple_name(&def.name)
            .map_err(|e| ModelError::InvalidProject(format!("type '{}': {e}", def.name)))?;
        let qualified = join_path(path, &def.name);
        if self.types_by_name.contains_key(&qualified) {
            return Err(ModelError::InvalidProject(format!(
                "duplicate type '{qualified}'"
            )));
        }

        let id = self.nodes.alloc(Node {
            name: SmolStr::new(&def.name),
            parent: Some(parent),
            data: NodeData::Type {
                kind: def.kind,
                members: Vec::new(),
            },
        });
        if let NodeData::Namespace { types, .. } = &mut self.nodes[parent].data {
            types.push(id);
        }
        self.types_by_name.insert(qualified.clone(), id);
        self.layout.push(id);

        for member in &def.members {
            check_simple_name(&member.name).map_err(|e| {
                ModelError::InvalidProject(format!("member '{qualified}.{}': {e}", member.name))
            })?;
            let member_id = self.nodes.alloc(Node {
                name: SmolStr::new(&member.name),
                parent: Some(id),
                data: NodeData::Member {
                    kind: member.kind,
                    ty: None,
                },
            });
            if let NodeData::Type { members, .. } = &mut self.nodes[id].data {
                members.push(member_id);
            }
            self.layout.push(member_id);
            if let Some(ty) = &member.ty {
                self.pending.push((member_id, ty.clone()));
            }
        }
        Ok(())
    }

    fn link(mut self) -> Arena<Node> {
        for (member, text) in std::mem::take(&mut self.pending) {
            let resolved = match self.types_by_name.get(&text) {
                Some(&target) => TypeRef::Declared(target),
                None => TypeRef::External(SmolStr::new(&text)),
            };
            if let NodeData::Member { ty, .. } = &mut self.nodes[member].data {
                *ty = Some(resolved);
            }
        }
        self.nodes
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}{SEPARATOR}{name}")
    }
}
