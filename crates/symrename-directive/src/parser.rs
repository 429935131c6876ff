//! Line parser for rename lists.

use crate::{DirectiveError, RenameDirective};
use smol_str::SmolStr;
use symrename_model::{check_simple_name, QualifiedName};

/// Prefix of a type rename line.
pub const TYPE_PREFIX: &str = "T:";
/// Prefix of a member rename line.
pub const MEMBER_PREFIX: &str = "P:";

const FIELD_SEPARATOR: char = ';';

/// Parse one line of a rename list.
///
/// Returns `None` for lines without a recognized prefix.
pub fn parse_line(line: &str) -> Option<Result<RenameDirective, DirectiveError>> {
    if let Some(rest) = line.strip_prefix(TYPE_PREFIX) {
        Some(parse_type_rename(rest))
    } else if let Some(rest) = line.strip_prefix(MEMBER_PREFIX) {
        Some(parse_member_rename(rest))
    } else {
        None
    }
}

fn parse_type_rename(rest: &str) -> Result<RenameDirective, DirectiveError> {
    let (old, new) = split_fields(rest)?;
    let old_name = QualifiedName::parse(old).map_err(DirectiveError::InvalidOldName)?;
    check_simple_name(new).map_err(DirectiveError::InvalidNewName)?;

    Ok(RenameDirective::TypeRename {
        old_name,
        new_name: SmolStr::new(new),
    })
}

fn parse_member_rename(rest: &str) -> Result<RenameDirective, DirectiveError> {
    let (old, new) = split_fields(rest)?;
    let full = QualifiedName::parse(old).map_err(DirectiveError::InvalidOldName)?;
    let (type_name, member_name) = full
        .split_last()
        .ok_or_else(|| DirectiveError::MissingSeparator(old.to_string()))?;
    check_simple_name(new).map_err(DirectiveError::InvalidNewName)?;

    Ok(RenameDirective::MemberRename {
        member_name: SmolStr::new(member_name),
        type_name,
        new_name: SmolStr::new(new),
    })
}

fn split_fields(rest: &str) -> Result<(&str, &str), DirectiveError> {
    let fields: Vec<&str> = rest.split(FIELD_SEPARATOR).collect();
    match fields.as_slice() {
        [old, new] => Ok((*old, *new)),
        _ => Err(DirectiveError::FieldCount {
            found: fields.len(),
        }),
    }
}
