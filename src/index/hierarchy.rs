//! The type hierarchy index.
//!
//! Built once from a [`CompiledProject`], then read-only:
//!
//! ```text
//! by_name      canonical name      → type            (last write wins)
//! by_ancestor  canonical ancestor  → [descendants]   (discovery order)
//! ```
//!
//! The ancestor chain of a type is collected level by level: at every class
//! the walk passes through it records the base type followed by the
//! interfaces declared on that class, then continues from the base. The walk
//! stops at the first type without a base type.

use indexmap::IndexMap;
use tracing::{debug, info, trace, warn};

use super::class_model::ClassModel;
use super::descriptor::{CompiledProject, SemanticResolver, TypeDescriptor};
use super::format::TypeNameFormatter;
use super::options::IndexOptions;

/// Counters collected while building an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Syntax units visited.
    pub units: usize,
    /// Class declarations enumerated.
    pub declarations: usize,
    /// Declarations that resolved and were indexed.
    pub indexed: usize,
    /// Declarations without a declared type.
    pub skipped: usize,
    /// Name insertions that replaced a different type.
    pub collisions: usize,
    /// Entries appended to the ancestor mapping.
    pub ancestor_edges: usize,
    /// Ancestor walks cut short by `max_ancestor_depth`.
    pub truncated_chains: usize,
}

/// Result of walking one ancestor chain.
struct AncestorWalk<T> {
    ancestors: Vec<T>,
    truncated: bool,
}

fn walk_ancestors<T: TypeDescriptor>(start: &T, max_depth: Option<usize>) -> AncestorWalk<T> {
    let mut ancestors = Vec::new();
    let mut current = start.clone();
    let mut depth = 0usize;

    while let Some(base) = current.base_type() {
        if max_depth.is_some_and(|max| depth >= max) {
            return AncestorWalk {
                ancestors,
                truncated: true,
            };
        }
        depth += 1;

        ancestors.push(base.clone());
        ancestors.extend(current.interfaces());
        current = base;
    }

    AncestorWalk {
        ancestors,
        truncated: false,
    }
}

/// Index of class declarations by canonical name and by ancestor.
#[derive(Debug, Clone)]
pub struct TypeHierarchyIndex<T> {
    by_name: IndexMap<String, T>,
    by_ancestor: IndexMap<String, Vec<T>>,
    formatter: TypeNameFormatter,
    options: IndexOptions,
    stats: IndexStats,
}

impl<T: TypeDescriptor> TypeHierarchyIndex<T> {
    /// Index every class declaration of `project` with default options.
    pub fn build<'a, P>(project: &'a P) -> Self
    where
        P: CompiledProject,
        P::Resolver<'a>: SemanticResolver<Type = T>,
    {
        Self::build_with(project, IndexOptions::default())
    }

    pub fn build_with<'a, P>(project: &'a P, options: IndexOptions) -> Self
    where
        P: CompiledProject,
        P::Resolver<'a>: SemanticResolver<Type = T>,
    {
        let mut index = Self {
            by_name: IndexMap::new(),
            by_ancestor: IndexMap::new(),
            formatter: TypeNameFormatter::new()
                .with_qualified_type_arguments(options.qualify_type_arguments),
            options,
            stats: IndexStats::default(),
        };

        for unit in project.syntax_units() {
            index.stats.units += 1;
            let model = project.semantic_model(unit);
            for declaration in model.class_declarations() {
                index.stats.declarations += 1;
                let Some(symbol) = model.declared_type(&declaration) else {
                    index.stats.skipped += 1;
                    trace!(unit = index.stats.units, "class declaration has no declared type");
                    continue;
                };
                index.insert(symbol);
            }
        }

        info!(
            types = index.by_name.len(),
            ancestors = index.by_ancestor.len(),
            skipped = index.stats.skipped,
            collisions = index.stats.collisions,
            "built type hierarchy index"
        );
        index
    }

    fn insert(&mut self, symbol: T) {
        let name = self.formatter.format(&symbol, true);
        trace!(%name, "indexing class");

        let previous = self.by_name.insert(name.clone(), symbol.clone());
        if previous.is_some_and(|previous| previous != symbol) {
            self.stats.collisions += 1;
            debug!(%name, "duplicate type name, keeping the later declaration");
        }
        self.stats.indexed += 1;

        let walk = walk_ancestors(&symbol, self.options.max_ancestor_depth);
        if walk.truncated {
            self.stats.truncated_chains += 1;
            warn!(
                %name,
                max_depth = ?self.options.max_ancestor_depth,
                "ancestor chain truncated"
            );
        }
        for ancestor in walk.ancestors {
            let key = self.formatter.format(&ancestor, true);
            self.by_ancestor.entry(key).or_default().push(symbol.clone());
            self.stats.ancestor_edges += 1;
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// The type indexed under `fq_name`.
    pub fn lookup_by_name(&self, fq_name: &str) -> Option<&T> {
        self.by_name.get(fq_name)
    }

    /// Every indexed type with `fq_base_name` somewhere in its ancestor
    /// chain, in discovery order. Empty if the name was never recorded.
    pub fn lookup_by_base_type(&self, fq_base_name: &str) -> &[T] {
        self.by_ancestor
            .get(fq_base_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn to_class_model(&self, symbol: &T) -> ClassModel<T> {
        ClassModel::with_formatter(symbol.clone(), &self.formatter)
    }

    pub fn find_class(&self, fq_name: &str) -> Option<ClassModel<T>> {
        self.lookup_by_name(fq_name).map(|t| self.to_class_model(t))
    }

    pub fn find_by_base_type<'s>(
        &'s self,
        fq_base_name: &str,
    ) -> impl Iterator<Item = ClassModel<T>> + use<'s, T> {
        self.lookup_by_base_type(fq_base_name)
            .iter()
            .map(|t| self.to_class_model(t))
    }

    /// Ancestors of `symbol` as recorded during construction (same walk,
    /// same depth limit).
    pub fn ancestor_chain(&self, symbol: &T) -> Vec<T> {
        walk_ancestors(symbol, self.options.max_ancestor_depth).ancestors
    }

    /// Canonical name of `symbol` as used for keys of this index.
    pub fn canonical_name(&self, symbol: &T) -> String {
        self.formatter.format(symbol, true)
    }

    /// Indexed names in first-insertion order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Recorded ancestor names in first-discovery order.
    pub fn ancestor_names(&self) -> impl Iterator<Item = &str> {
        self.by_ancestor.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }
}
