//! A bound project and the per-unit semantic models the index reads from.

use rustc_hash::FxHashMap;
use tracing::info;

use super::binder::{self, BindOutput};
use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::named_type::NamedType;
use super::type_table::{TypeId, TypeTable};
use crate::base::{FileId, TextRange};
use crate::index::{CompiledProject, SemanticResolver};
use crate::parser::{AstNode, ClassDecl, TypeDecl};
use crate::project::{Project, SyntaxUnit};

/// All syntax units of a project bound into one type table.
#[derive(Debug)]
pub struct Compilation {
    project: Project,
    types: TypeTable,
    declarations: FxHashMap<(FileId, TextRange), TypeId>,
    diagnostics: DiagnosticCollector,
}

impl Compilation {
    pub fn new(project: Project) -> Self {
        let BindOutput {
            types,
            declarations,
            diagnostics,
        } = binder::bind(project.units());
        info!(
            units = project.len(),
            errors = diagnostics.error_count(),
            warnings = diagnostics.warning_count(),
            "compiled project"
        );
        Self {
            project,
            types,
            declarations,
            diagnostics,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn units(&self) -> &[SyntaxUnit] {
        self.project.units()
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// Binder diagnostics for the whole project.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.diagnostics()
    }

    pub fn file_diagnostics(&self, file: FileId) -> Vec<&Diagnostic> {
        self.diagnostics.diagnostics_for_file(file)
    }

    /// Whether binding reported any error (warnings do not count).
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn named_type(&self, id: TypeId) -> NamedType<'_> {
        NamedType::new(&self.types, id)
    }

    /// Look a type up by dotted name (`System.Object`, `Zoo.Dog`).
    pub fn find_type(&self, qualified: &str, arity: usize) -> Option<NamedType<'_>> {
        self.types
            .lookup_type(qualified, arity)
            .map(|id| self.named_type(id))
    }

    /// Semantic view of one unit of this compilation.
    pub fn model_for<'c>(&'c self, unit: &'c SyntaxUnit) -> SemanticModel<'c> {
        SemanticModel {
            compilation: self,
            unit,
        }
    }
}

impl CompiledProject for Compilation {
    type Unit = SyntaxUnit;
    type Resolver<'a> = SemanticModel<'a>;

    fn syntax_units(&self) -> &[SyntaxUnit] {
        self.units()
    }

    fn semantic_model<'a>(&'a self, unit: &'a SyntaxUnit) -> SemanticModel<'a> {
        self.model_for(unit)
    }
}

/// Semantic questions about one syntax unit.
#[derive(Debug, Clone, Copy)]
pub struct SemanticModel<'c> {
    compilation: &'c Compilation,
    unit: &'c SyntaxUnit,
}

impl<'c> SemanticModel<'c> {
    pub fn unit(&self) -> &'c SyntaxUnit {
        self.unit
    }

    /// Every type declaration of the unit (all kinds) in document order.
    pub fn type_declarations(&self) -> Vec<TypeDecl> {
        self.unit
            .source_file()
            .map(|root| root.type_decls().collect())
            .unwrap_or_default()
    }

    /// Declared type of any kind of type declaration.
    pub fn declared_type_of(&self, declaration: &TypeDecl) -> Option<NamedType<'c>> {
        self.lookup(declaration.syntax().text_range())
    }

    pub fn diagnostics(&self) -> Vec<&'c Diagnostic> {
        self.compilation.file_diagnostics(self.unit.file())
    }

    fn lookup(&self, range: TextRange) -> Option<NamedType<'c>> {
        self.compilation
            .declarations
            .get(&(self.unit.file(), range))
            .map(|&id| self.compilation.named_type(id))
    }
}

impl<'c> SemanticResolver for SemanticModel<'c> {
    type Declaration = ClassDecl;
    type Type = NamedType<'c>;

    fn class_declarations(&self) -> Vec<ClassDecl> {
        self.unit
            .source_file()
            .map(|root| root.class_decls().collect())
            .unwrap_or_default()
    }

    fn declared_type(&self, declaration: &ClassDecl) -> Option<NamedType<'c>> {
        self.lookup(declaration.syntax().text_range())
    }
}
