//! Resolve command - look up a qualified name the way the engine does.

use super::load_project;
use std::path::Path;
use symrename_model::{Decl, DeclKind, QualifiedName};
use symrename_resolver::{resolve_member, resolve_type, AliasTable};

pub fn run(project: &Path, name: &str, member: bool) -> miette::Result<()> {
    let version = load_project(project)?;
    let qualified =
        QualifiedName::parse(name).map_err(|e| miette::miette!("Invalid name '{}': {}", name, e))?;

    let aliases = AliasTable::new();
    let found = if member {
        let (type_name, member_name) = qualified
            .split_last()
            .ok_or_else(|| miette::miette!("Expected Type.Member, got '{}'", name))?;
        resolve_member(&type_name, member_name, version.root(), &aliases)
    } else {
        resolve_type(&qualified, version.root(), &aliases)
    };

    let decl = found.ok_or_else(|| miette::miette!("Symbol {} not found", name))?;
    println!("{}", describe(decl));
    Ok(())
}

/// One-line description of a declaration.
pub(crate) fn describe(decl: Decl<'_>) -> String {
    let name = decl
        .qualified_name()
        .map(|name| name.to_string())
        .unwrap_or_else(|| "<global>".to_string());
    match decl.kind() {
        DeclKind::Namespace => format!("namespace {name}"),
        DeclKind::Type(kind) => format!("{} {name}", kind.as_str()),
        DeclKind::Member(kind) => match decl.declared_type() {
            Some(ty) => format!("{} {name}: {}", kind.as_str(), ty.full_name()),
            None => format!("{} {name}", kind.as_str()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PROJECT: &str = r#"{
        "name": "App",
        "namespaces": [
            { "name": "App.Controls", "types": [
                { "name": "Widget", "kind": "struct", "members": [
                    { "name": "Color", "kind": "property", "type": "App.Controls.Paint" }
                ] },
                { "name": "Paint" }
            ] }
        ]
    }"#;

    fn project() -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), PROJECT).unwrap();
        file
    }

    #[test]
    fn test_describe_declarations() {
        let file = project();
        let version = load_project(file.path()).unwrap();
        let aliases = AliasTable::new();
        let widget_name = QualifiedName::parse("App.Controls.Widget").unwrap();

        let widget = resolve_type(&widget_name, version.root(), &aliases).unwrap();
        assert_eq!(describe(widget), "struct App.Controls.Widget");

        let color = resolve_member(&widget_name, "Color", version.root(), &aliases).unwrap();
        assert_eq!(
            describe(color),
            "property App.Controls.Widget.Color: App.Controls.Paint"
        );
    }

    #[test]
    fn test_resolve_reports_missing_symbol() {
        let file = project();
        assert!(run(file.path(), "App.Controls.Widget", false).is_ok());
        assert!(run(file.path(), "App.Controls.Widget.Color", true).is_ok());
        assert!(run(file.path(), "App.Ghost", false).is_err());
        assert!(run(file.path(), "Widget", true).is_err());
    }
}
