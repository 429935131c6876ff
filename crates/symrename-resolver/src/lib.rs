//! Name resolution for symrename.
//!
//! This crate handles:
//! - Resolving qualified type names against a model version
//! - Resolving members of a type by simple name
//! - Redirecting names of types renamed earlier in the same run

mod alias;
mod resolve;

pub use alias::AliasTable;
pub use resolve::{index_types, resolve_member, resolve_type, resolve_type_direct, TypeWalk};
