//! Capability traits the index consumes, plus the metadata vocabulary
//! shared by every backend.
//!
//! The index never sees syntax trees or symbol tables directly. A backend
//! hands it three things:
//!
//! - [`CompiledProject`] — the ordered syntax units and a way to obtain a
//!   unit-scoped resolver for each of them
//! - [`SemanticResolver`] — enumerates class declarations of one unit and
//!   maps a declaration to its type (or reports that it cannot)
//! - [`TypeDescriptor`] — a cheap handle to a named type with its
//!   namespace, generic arguments, base type and interfaces

use std::fmt::Debug;

use smol_str::SmolStr;

use crate::base::{FileId, LineCol, TextRange};

// ============================================================================
// METADATA
// ============================================================================

/// What sort of type a descriptor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Record,
    RecordStruct,
    Enum,
    /// A generic type parameter such as `T`.
    TypeParameter,
    /// Placeholder for a reference that could not be resolved.
    Error,
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Struct => "struct",
            TypeKind::Record => "record",
            TypeKind::RecordStruct => "record struct",
            TypeKind::Enum => "enum",
            TypeKind::TypeParameter => "type parameter",
            TypeKind::Error => "error",
        }
    }

    /// Kinds that may appear as the base class of a class declaration.
    pub fn can_be_base_class(self) -> bool {
        matches!(self, TypeKind::Class | TypeKind::Record | TypeKind::Error)
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One argument of an attribute application, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeArgument {
    /// `Schema` in `Schema = "dbo"`, `None` for positional arguments.
    pub name: Option<SmolStr>,
    /// Source text of the argument expression.
    pub value: String,
}

impl AttributeArgument {
    pub fn positional(value: impl Into<String>) -> Self {
        Self {
            name: None,
            value: value.into(),
        }
    }

    pub fn named(name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }
}

/// An attribute applied to a type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeInfo {
    /// Name as written, possibly dotted (`System.Obsolete`).
    pub name: SmolStr,
    pub arguments: Vec<AttributeArgument>,
}

impl AttributeInfo {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: AttributeArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Last segment of the name with any `Attribute` suffix removed.
    pub fn short_name(&self) -> &str {
        let last = self.name.rsplit('.').next().unwrap_or(&self.name);
        match last.strip_suffix("Attribute") {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => last,
        }
    }

    /// Whether this attribute is `name`, tolerating a namespace prefix and
    /// the `Attribute` suffix on either side (`Table` matches
    /// `Schema.TableAttribute`).
    pub fn matches(&self, name: &str) -> bool {
        let other = AttributeInfo::new(name);
        self.short_name() == other.short_name()
    }

    /// Positional argument number `index`, counting from zero.
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.arguments
            .iter()
            .filter(|a| a.name.is_none())
            .nth(index)
            .map(|a| a.value.as_str())
    }

    /// Value of a named argument.
    pub fn named(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|a| a.name.as_deref() == Some(name))
            .map(|a| a.value.as_str())
    }
}

/// Where a type is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: FileId,
    /// Range of the declaration's name (or the whole declaration if it has none).
    pub range: TextRange,
    /// Start of `range` as line/column.
    pub start: LineCol,
}

// ============================================================================
// CAPABILITIES
// ============================================================================

/// Handle to a named type.
///
/// Handles are compared with `==` to decide whether two lookups found the
/// same type; cloning must be cheap.
pub trait TypeDescriptor: Clone + PartialEq + Debug {
    /// Simple identifier (`Dictionary` for `Dictionary<K, V>`).
    fn name(&self) -> &str;

    /// `false` for symbols that are not named types, such as type parameters.
    fn is_named_type(&self) -> bool;

    /// Containing namespace segments, outermost first. Empty for the global
    /// namespace.
    fn namespace_path(&self) -> Vec<&str>;

    /// Generic arguments: the type parameters of a generic definition, the
    /// concrete arguments of a constructed type, empty otherwise.
    fn type_arguments(&self) -> Vec<Self>;

    /// Direct base class. `None` for interfaces and for the root type.
    fn base_type(&self) -> Option<Self>;

    /// Directly implemented interfaces, in declaration order.
    fn interfaces(&self) -> Vec<Self>;

    fn kind(&self) -> TypeKind {
        TypeKind::Class
    }

    fn attributes(&self) -> Vec<AttributeInfo> {
        Vec::new()
    }

    /// Declaration modifiers (`public`, `abstract`, ...) in source order.
    fn modifiers(&self) -> Vec<SmolStr> {
        Vec::new()
    }

    fn documentation(&self) -> Option<String> {
        None
    }

    fn location(&self) -> Option<SourceLocation> {
        None
    }
}

/// Per-unit semantic view.
pub trait SemanticResolver {
    type Declaration;
    type Type: TypeDescriptor;

    /// Every class declaration of the unit in document order, nested ones
    /// included.
    fn class_declarations(&self) -> Vec<Self::Declaration>;

    /// The declared type of `declaration`, or `None` if it cannot be
    /// resolved (e.g. a declaration without a name).
    fn declared_type(&self, declaration: &Self::Declaration) -> Option<Self::Type>;
}

/// A set of parsed and bound syntax units.
pub trait CompiledProject {
    type Unit;
    type Resolver<'a>: SemanticResolver
    where
        Self: 'a;

    /// Syntax units in a stable order.
    fn syntax_units(&self) -> &[Self::Unit];

    /// Resolver scoped to `unit`.
    fn semantic_model<'a>(&'a self, unit: &'a Self::Unit) -> Self::Resolver<'a>;
}
