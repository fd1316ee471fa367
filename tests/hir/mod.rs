//! HIR layer tests
//!
//! Tests for the binder and semantic model:
//! - Name resolution through namespaces, usings and aliases
//! - Generic construction and substitution
//! - Diagnostics for unresolved, duplicate and circular declarations

mod tests_generics;
mod tests_name_resolution;
