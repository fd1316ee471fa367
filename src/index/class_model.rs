//! Presentation model for one indexed type.

use smol_str::SmolStr;

use super::descriptor::{AttributeInfo, SourceLocation, TypeDescriptor, TypeKind};
use super::format::{TypeNameFormatter, full_namespace};

/// Read-only view over a type descriptor: identity, attributes and the
/// names of its direct bases. Built on demand, never stored in the index.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassModel<T> {
    symbol: T,
    name: String,
    full_name: String,
    namespace: Option<String>,
    kind: TypeKind,
    type_arguments: Vec<String>,
    attributes: Vec<AttributeInfo>,
    modifiers: Vec<SmolStr>,
    documentation: Option<String>,
    location: Option<SourceLocation>,
    base_type: Option<String>,
    interfaces: Vec<String>,
}

impl<T: TypeDescriptor> ClassModel<T> {
    pub fn new(symbol: T) -> Self {
        Self::with_formatter(symbol, &TypeNameFormatter::default())
    }

    pub(crate) fn with_formatter(symbol: T, formatter: &TypeNameFormatter) -> Self {
        Self {
            name: symbol.name().to_string(),
            full_name: formatter.format(&symbol, true),
            namespace: full_namespace(&symbol),
            kind: symbol.kind(),
            type_arguments: symbol
                .type_arguments()
                .iter()
                .map(|t| formatter.format(t, false))
                .collect(),
            attributes: symbol.attributes(),
            modifiers: symbol.modifiers(),
            documentation: symbol.documentation(),
            location: symbol.location(),
            base_type: symbol.base_type().map(|b| formatter.format(&b, true)),
            interfaces: symbol
                .interfaces()
                .iter()
                .map(|i| formatter.format(i, true))
                .collect(),
            symbol,
        }
    }

    /// The wrapped descriptor.
    pub fn symbol(&self) -> &T {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical name, the key used by the index.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn type_arguments(&self) -> &[String] {
        &self.type_arguments
    }

    pub fn is_generic(&self) -> bool {
        !self.type_arguments.is_empty()
    }

    pub fn attributes(&self) -> &[AttributeInfo] {
        &self.attributes
    }

    /// First attribute matching `name` (`Table` finds `[TableAttribute]`).
    pub fn attribute(&self, name: &str) -> Option<&AttributeInfo> {
        self.attributes.iter().find(|a| a.matches(name))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn modifiers(&self) -> &[SmolStr] {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    pub fn is_abstract(&self) -> bool {
        self.has_modifier("abstract")
    }

    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    pub fn location(&self) -> Option<SourceLocation> {
        self.location
    }

    /// Canonical name of the direct base type.
    pub fn base_type(&self) -> Option<&str> {
        self.base_type.as_deref()
    }

    /// Canonical names of the directly implemented interfaces.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }
}
