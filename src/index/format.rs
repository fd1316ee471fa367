//! Canonical type names.
//!
//! A canonical name is the string key under which the index stores a type:
//!
//! - `A.B.Foo` for a non-generic type `Foo` in namespace `A.B`
//! - `Foo` for a type in the global namespace (never `.Foo`)
//! - `Box<Foo>` for a generic type; the namespace is not prepended and the
//!   arguments are formatted without their namespaces unless
//!   [`TypeNameFormatter::qualify_type_arguments`] is set
//! - the bare name for symbols that are not named types (type parameters)

use super::descriptor::TypeDescriptor;

/// Canonical name of `ty` with default formatting.
pub fn canonical_name<T: TypeDescriptor>(ty: &T, include_namespace: bool) -> String {
    TypeNameFormatter::default().format(ty, include_namespace)
}

/// Containing namespace chain joined with `.`; `None` for the global namespace.
pub fn full_namespace<T: TypeDescriptor>(ty: &T) -> Option<String> {
    let path = ty.namespace_path();
    if path.is_empty() {
        None
    } else {
        Some(path.join("."))
    }
}

/// Formats canonical type names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeNameFormatter {
    /// Pass the caller's `include_namespace` flag on to generic arguments
    /// (`Box<A.B.Foo>` instead of `Box<Foo>`).
    pub qualify_type_arguments: bool,
}

impl TypeNameFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_qualified_type_arguments(mut self, qualify: bool) -> Self {
        self.qualify_type_arguments = qualify;
        self
    }

    pub fn format<T: TypeDescriptor>(&self, ty: &T, include_namespace: bool) -> String {
        let name = ty.name();
        if !ty.is_named_type() {
            return name.to_string();
        }

        let arguments = ty.type_arguments();
        if arguments.is_empty() {
            return match full_namespace(ty) {
                Some(namespace) if include_namespace => format!("{namespace}.{name}"),
                _ => name.to_string(),
            };
        }

        let qualify = include_namespace && self.qualify_type_arguments;
        let arguments = arguments
            .iter()
            .map(|argument| self.format(argument, qualify))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{name}<{arguments}>")
    }
}
