//! # typedex-base
//!
//! In-memory type hierarchy index for C#-style declaration sources: find a
//! class by its canonical name, or every class that transitively derives
//! from (or implements) a given type.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! index     → TypeHierarchyIndex, canonical names, ClassModel
//!   ↓
//! hir       → Binder: namespaces, types, base types, diagnostics
//!   ↓
//! project   → Syntax units, directory loading
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (FileId, TextRange, LineIndex)
//! ```
//!
//! The index only depends on the capability traits in [`index`]; [`hir`]
//! is the bundled implementation of them.

// ============================================================================
// MODULES (dependency order: base → parser → project → hir → index)
// ============================================================================

/// Foundation types: FileId, TextRange, line/column conversion
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Project management: syntax units, directory loading
pub mod project;

/// High-level IR: binder and semantic model
pub mod hir;

/// Type hierarchy index
pub mod index;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};

// Re-export the main entry points
pub use hir::{Compilation, Diagnostic, NamedType, SemanticModel};
pub use index::{
    ClassModel, CompiledProject, IndexOptions, SemanticResolver, TypeDescriptor,
    TypeHierarchyIndex, TypeKind, TypeNameFormatter,
};
pub use project::{LoaderOptions, Project, ProjectError, ProjectLoader};
