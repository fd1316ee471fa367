//! Type hierarchy index — lookup of class declarations by canonical name and
//! by (transitive) base type.
//!
//! The index is backend-agnostic: it consumes the capability traits in
//! [`CompiledProject`], [`SemanticResolver`] and [`TypeDescriptor`]. The
//! bundled backend is [`crate::hir::Compilation`].
//!
//! ## Key Types
//!
//! - [`TypeHierarchyIndex`] — the two mappings plus queries
//! - [`TypeNameFormatter`] — canonical names (`A.B.Foo`, `Box<Foo>`)
//! - [`ClassModel`] — presentation wrapper over one descriptor
//!
//! ```ignore
//! let compilation = ProjectLoader::default().load_directory("src")?.compile();
//! let index = TypeHierarchyIndex::build(&compilation);
//! for model in index.find_by_base_type("Shop.Models.Entity") {
//!     println!("{} {:?}", model.full_name(), model.attributes());
//! }
//! ```

mod class_model;
mod descriptor;
mod format;
mod hierarchy;
mod options;

#[cfg(test)]
pub(crate) mod fake;

pub use class_model::ClassModel;
pub use descriptor::{
    AttributeArgument, AttributeInfo, CompiledProject, SemanticResolver, SourceLocation,
    TypeDescriptor, TypeKind,
};
pub use format::{TypeNameFormatter, canonical_name, full_namespace};
pub use hierarchy::{IndexStats, TypeHierarchyIndex};
pub use options::IndexOptions;
