//! # symrename directives
//!
//! Rename lists are plain text, one directive per line:
//!
//! ```text
//! T:<OldFullyQualifiedTypeName>;<NewSimpleTypeName>
//! P:<OldFullyQualifiedTypeName>.<OldMemberName>;<NewSimpleName>
//! ```
//!
//! Lines without a recognized prefix are ignored.
//!
//! ## Example
//!
//! ```
//! use symrename_directive::{parse_source, RenameDirective};
//!
//! let lines = parse_source("T:App.Foo;Bar\n# note\nP:App.Foo.Label;Title\n");
//! assert_eq!(lines.len(), 2);
//! assert!(matches!(lines[0].parsed, Ok(RenameDirective::TypeRename { .. })));
//! ```

mod error;
mod parser;

pub use error::DirectiveError;
pub use parser::{parse_line, MEMBER_PREFIX, TYPE_PREFIX};

use smol_str::SmolStr;
use std::fmt;
use std::fs;
use std::path::Path;
use symrename_model::QualifiedName;

/// One requested rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameDirective {
    /// Rename a type, keeping its namespace.
    TypeRename {
        old_name: QualifiedName,
        new_name: SmolStr,
    },
    /// Rename a member of a type.
    MemberRename {
        type_name: QualifiedName,
        member_name: SmolStr,
        new_name: SmolStr,
    },
}

impl RenameDirective {
    /// The qualified name being renamed, as written in the directive.
    pub fn target(&self) -> String {
        match self {
            RenameDirective::TypeRename { old_name, .. } => old_name.to_string(),
            RenameDirective::MemberRename {
                type_name,
                member_name,
                ..
            } => format!("{type_name}.{member_name}"),
        }
    }

    pub fn new_name(&self) -> &str {
        match self {
            RenameDirective::TypeRename { new_name, .. }
            | RenameDirective::MemberRename { new_name, .. } => new_name,
        }
    }
}

impl fmt::Display for RenameDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenameDirective::TypeRename { old_name, new_name } => {
                write!(f, "{TYPE_PREFIX}{old_name};{new_name}")
            }
            RenameDirective::MemberRename { new_name, .. } => {
                write!(f, "{MEMBER_PREFIX}{};{new_name}", self.target())
            }
        }
    }
}

/// A recognized line of a rename list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveLine {
    /// 1-based line number
    pub number: usize,
    /// The line as written
    pub raw: String,
    /// The parsed directive, or why it was rejected
    pub parsed: Result<RenameDirective, DirectiveError>,
}

/// Parse every recognized line of a rename list, in file order.
pub fn parse_source(source: &str) -> Vec<DirectiveLine> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            parse_line(line).map(|parsed| DirectiveLine {
                number: index + 1,
                raw: line.to_string(),
                parsed,
            })
        })
        .collect()
}

/// Read and parse a rename list file.
pub fn read_file(path: &Path) -> std::io::Result<Vec<DirectiveLine>> {
    let source = fs::read_to_string(path)?;
    let lines = parse_source(&source);
    tracing::debug!("Read {} directive(s) from {}", lines.len(), path.display());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_source_keeps_line_numbers() {
        let source = "# header\r\nT:App.Foo;Bar\r\n\r\nP:App.Foo.Label;Title\r\nT:App.Foo\r\n";
        let lines = parse_source(source);

        let numbers: Vec<_> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![2, 4, 5]);
        assert_eq!(lines[0].raw, "T:App.Foo;Bar");
        assert!(lines[1].parsed.is_ok());
        assert_eq!(
            lines[2].parsed,
            Err(DirectiveError::FieldCount { found: 1 })
        );
    }

    #[test]
    fn test_display_matches_input_format() {
        for line in ["T:App.Foo;Bar", "P:App.Widget.Color;Tint"] {
            let directive = parse_line(line).unwrap().unwrap();
            assert_eq!(directive.to_string(), line);
        }
    }

    #[test]
    fn test_target_and_new_name() {
        let directive = parse_line("P:App.Widget.Color;Tint").unwrap().unwrap();
        assert_eq!(directive.target(), "App.Widget.Color");
        assert_eq!(directive.new_name(), "Tint");
    }

    #[test]
    fn test_read_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("renames.txt");
        fs::write(&path, "T:App.Foo;Bar\n").unwrap();

        let lines = read_file(&path).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(read_file(&dir.path().join("missing.txt")).is_err());
    }
}
