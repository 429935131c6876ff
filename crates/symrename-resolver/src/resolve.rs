//! Qualified name lookup over a model version.

use crate::AliasTable;
use indexmap::IndexMap;
use symrename_model::{Decl, QualifiedName, SEPARATOR};
use tracing::debug;

/// Depth-first walk over every type below a namespace.
///
/// Each namespace yields its own types before any type of its child
/// namespaces; children are visited in declaration order. Uses an explicit
/// stack so deep namespace trees do not grow the call stack.
pub struct TypeWalk<'m> {
    stack: Vec<(Decl<'m>, String)>,
    ready: Vec<(String, Decl<'m>)>,
}

impl<'m> TypeWalk<'m> {
    pub fn new(root: Decl<'m>) -> Self {
        let path = root
            .qualified_name()
            .map(|name| name.to_string())
            .unwrap_or_default();
        Self {
            stack: vec![(root, path)],
            ready: Vec::new(),
        }
    }
}

impl<'m> Iterator for TypeWalk<'m> {
    /// Qualified name and the type declaration.
    type Item = (String, Decl<'m>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.ready.pop() {
                return Some(item);
            }

            let (namespace, path) = self.stack.pop()?;
            let children: Vec<_> = namespace.namespaces().collect();
            for child in children.into_iter().rev() {
                let child_path = join(&path, child.name());
                self.stack.push((child, child_path));
            }

            self.ready = namespace
                .types()
                .map(|ty| (join(&path, ty.name()), ty))
                .collect();
            self.ready.reverse();
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}{SEPARATOR}{name}")
    }
}

/// Find a type by qualified name, following rename aliases.
pub fn resolve_type<'m>(
    name: &QualifiedName,
    root: Decl<'m>,
    aliases: &AliasTable,
) -> Option<Decl<'m>> {
    let target = aliases.redirect(name);
    if target != name {
        debug!("Alias {} -> {}", name, target);
    }
    resolve_type_direct(target.as_str(), root)
}

/// Find a type by qualified name without consulting aliases.
///
/// The first type in walk order whose qualified name matches wins.
pub fn resolve_type_direct<'m>(name: &str, root: Decl<'m>) -> Option<Decl<'m>> {
    TypeWalk::new(root)
        .find(|(qualified, _)| qualified == name)
        .map(|(_, decl)| decl)
}

/// Find a member of a type by simple name, following rename aliases.
///
/// Returns the first member with a matching name. Overloads are not
/// distinguished.
pub fn resolve_member<'m>(
    type_name: &QualifiedName,
    member_name: &str,
    root: Decl<'m>,
    aliases: &AliasTable,
) -> Option<Decl<'m>> {
    let ty = resolve_type(type_name, root, aliases)?;
    ty.members().find(|member| member.name() == member_name)
}

/// Every type in walk order, keyed by qualified name.
pub fn index_types(root: Decl<'_>) -> IndexMap<QualifiedName, Decl<'_>> {
    TypeWalk::new(root)
        .filter_map(|(qualified, decl)| {
            QualifiedName::parse(&qualified)
                .ok()
                .map(|name| (name, decl))
        })
        .collect()
}
