//! Index construction options

/// Options for [`TypeHierarchyIndex::build_with`](super::TypeHierarchyIndex::build_with).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexOptions {
    /// Format generic arguments with their namespaces (`Box<A.B.Foo>`).
    pub qualify_type_arguments: bool,
    /// Stop walking an ancestor chain after this many base-type steps.
    /// `None` walks until a type without base is reached.
    pub max_ancestor_depth: Option<usize>,
}

impl IndexOptions {
    pub fn with_qualified_type_arguments(mut self, qualify: bool) -> Self {
        self.qualify_type_arguments = qualify;
        self
    }

    pub fn with_max_ancestor_depth(mut self, depth: usize) -> Self {
        self.max_ancestor_depth = Some(depth);
        self
    }
}
