//! Helpers for building compilations and indexes from in-memory sources.

use typedex::hir::{Compilation, NamedType};
use typedex::index::{IndexOptions, TypeHierarchyIndex, canonical_name};
use typedex::project::Project;

/// Compile named sources, in order, into one compilation.
pub fn compile_files(files: &[(&str, &str)]) -> Compilation {
    let mut project = Project::new();
    for (path, text) in files {
        let file = project.add_file(*path, *text);
        let unit = project.unit(file).expect("unit just added");
        assert!(
            !unit.has_errors(),
            "Parse errors in '{}': {:?}",
            path,
            unit.errors()
        );
    }
    project.compile()
}

/// Compile a single source file.
pub fn compile(source: &str) -> Compilation {
    compile_files(&[("test.cs", source)])
}

pub fn build_index(compilation: &Compilation) -> TypeHierarchyIndex<NamedType<'_>> {
    TypeHierarchyIndex::build(compilation)
}

pub fn build_index_with(
    compilation: &Compilation,
    options: IndexOptions,
) -> TypeHierarchyIndex<NamedType<'_>> {
    TypeHierarchyIndex::build_with(compilation, options)
}

/// Canonical (namespace-qualified) names of `types`, in order.
pub fn names(types: &[NamedType<'_>]) -> Vec<String> {
    types.iter().map(|t| canonical_name(t, true)).collect()
}

/// Diagnostic codes of the compilation, in report order.
pub fn diagnostic_codes(compilation: &Compilation) -> Vec<String> {
    compilation
        .diagnostics()
        .iter()
        .filter_map(|d| d.code.as_deref().map(str::to_string))
        .collect()
}
