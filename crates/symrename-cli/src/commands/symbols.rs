//! Symbols command - list types and members in resolution order.

use super::load_project;
use super::resolve::describe;
use std::path::Path;
use symrename_resolver::index_types;

pub fn run(project: &Path) -> miette::Result<()> {
    let version = load_project(project)?;
    println!(
        "{} ({}): {} types, {} members",
        version.project_name(),
        version.id(),
        version.type_count(),
        version.member_count()
    );

    for ty in index_types(version.root()).into_values() {
        println!("  {}", describe(ty));
        for member in ty.members() {
            println!("    {}", describe(member));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_lists_project() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");
        std::fs::write(
            &path,
            r#"{ "name": "App", "types": [ { "name": "Program" } ] }"#,
        )
        .unwrap();
        assert!(run(&path).is_ok());
    }

    #[test]
    fn test_symbols_requires_readable_project() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&dir.path().join("missing.json")).is_err());
    }
}
