//! Cheap handle to a type in a [`TypeTable`].

use std::fmt;
use std::hash::{Hash, Hasher};

use smol_str::SmolStr;

use super::type_table::{TypeData, TypeId, TypeTable};
use crate::index::{AttributeInfo, SourceLocation, TypeDescriptor, TypeKind};

/// A type together with the table it lives in.
#[derive(Clone, Copy)]
pub struct NamedType<'db> {
    table: &'db TypeTable,
    id: TypeId,
}

impl<'db> NamedType<'db> {
    pub fn new(table: &'db TypeTable, id: TypeId) -> Self {
        Self { table, id }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn data(&self) -> &'db TypeData {
        self.table.get(self.id)
    }

    fn wrap(&self, id: TypeId) -> Self {
        Self::new(self.table, id)
    }

    /// The generic definition of a constructed type; `self` otherwise.
    pub fn definition(&self) -> Self {
        self.wrap(self.table.definition_of(self.id))
    }

    /// Declared type parameters (empty for constructed types).
    pub fn type_parameters(&self) -> Vec<Self> {
        self.data()
            .type_parameters
            .iter()
            .map(|&id| self.wrap(id))
            .collect()
    }

    pub fn is_implicit(&self) -> bool {
        self.data().implicit
    }

    /// Every declaration site; several for partial types.
    pub fn locations(&self) -> &'db [SourceLocation] {
        &self.data().locations
    }
}

impl PartialEq for NamedType<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.table, other.table) && self.id == other.id
    }
}

impl Eq for NamedType<'_> {}

impl Hash for NamedType<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for NamedType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        f.debug_struct("NamedType")
            .field("id", &self.id.index())
            .field("name", &data.name)
            .field("kind", &data.kind)
            .finish()
    }
}

impl TypeDescriptor for NamedType<'_> {
    fn name(&self) -> &str {
        &self.data().name
    }

    fn is_named_type(&self) -> bool {
        self.data().kind != TypeKind::TypeParameter
    }

    fn namespace_path(&self) -> Vec<&str> {
        self.data()
            .namespace
            .map(|ns| self.table.namespace_path(ns))
            .unwrap_or_default()
    }

    fn type_arguments(&self) -> Vec<Self> {
        self.data()
            .type_arguments
            .iter()
            .map(|&id| self.wrap(id))
            .collect()
    }

    fn base_type(&self) -> Option<Self> {
        self.data().base_type.map(|id| self.wrap(id))
    }

    fn interfaces(&self) -> Vec<Self> {
        self.data()
            .interfaces
            .iter()
            .map(|&id| self.wrap(id))
            .collect()
    }

    fn kind(&self) -> TypeKind {
        self.data().kind
    }

    fn attributes(&self) -> Vec<AttributeInfo> {
        self.data().attributes.clone()
    }

    fn modifiers(&self) -> Vec<SmolStr> {
        self.data().modifiers.clone()
    }

    fn documentation(&self) -> Option<String> {
        self.data().documentation.clone()
    }

    fn location(&self) -> Option<SourceLocation> {
        self.data().locations.first().copied()
    }
}
