//! High-level IR (HIR) — the semantic model of a project.
//!
//! Binding turns the parsed [`SyntaxUnit`](crate::project::SyntaxUnit)s of a
//! [`Project`](crate::project::Project) into a [`TypeTable`]: every declared
//! type with its namespace, generic parameters, base type and interfaces.
//!
//! ## Key Types
//!
//! - [`Compilation`] — a bound project; implements
//!   [`CompiledProject`](crate::index::CompiledProject)
//! - [`SemanticModel`] — per-unit view; implements
//!   [`SemanticResolver`](crate::index::SemanticResolver)
//! - [`NamedType`] — handle to a bound type; implements
//!   [`TypeDescriptor`](crate::index::TypeDescriptor)
//! - [`Diagnostic`] — problem found while binding
//!
//! ## Passes
//!
//! ```text
//! declare        ← namespaces, types, partial merging
//!     │
//!     ▼
//! resolve usings ← imports, aliases, `using static`
//!     │
//!     ▼
//! bind bases     ← base class / interfaces, implicit System bases
//!     │
//!     ▼
//! break cycles   ← every base chain ends at a root
//!     │
//!     ▼
//! complete       ← substitute bases of constructed generics
//! ```

mod binder;
mod compilation;
mod diagnostics;
mod named_type;
mod type_table;

pub use binder::{BindOutput, bind};
pub use compilation::{Compilation, SemanticModel};
pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity, codes};
pub use named_type::NamedType;
pub use type_table::{
    Container, MAX_NESTING_DEPTH, NamespaceData, NamespaceId, TypeData, TypeId, TypeTable,
    WellKnownTypes, predefined_type_name,
};
