//! Old-name to current-name redirects for renamed types.

use indexmap::IndexMap;
use symrename_model::QualifiedName;

/// Redirects from the name a type had when a rename list was written to the
/// name it has now.
///
/// Entries are never removed. Values are retargeted when an already renamed
/// type is renamed again, so a lookup is always a single hop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: IndexMap<QualifiedName, QualifiedName>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current name for `name`, if it was renamed.
    pub fn lookup(&self, name: &QualifiedName) -> Option<&QualifiedName> {
        self.entries.get(name)
    }

    /// Current name for `name`, or `name` itself.
    pub fn redirect<'a>(&'a self, name: &'a QualifiedName) -> &'a QualifiedName {
        self.lookup(name).unwrap_or(name)
    }

    /// Record that the type known as `previous` is now `current`, and that
    /// `old` (the name used by the directive) should resolve to it.
    pub fn record(&mut self, old: QualifiedName, previous: &QualifiedName, current: QualifiedName) {
        for target in self.entries.values_mut() {
            if target == previous {
                *target = current.clone();
            }
        }
        self.entries.insert(old, current);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedName, &QualifiedName)> {
        self.entries.iter()
    }
}
