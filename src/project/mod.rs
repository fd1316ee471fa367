//! Projects — ordered sets of parsed source files.
//!
//! A [`Project`] owns one [`SyntaxUnit`] per source file. Files get dense
//! [`FileId`]s in the order they are added; [`Project::compile`] binds them
//! into a [`Compilation`].

mod error;
mod loader;

use std::path::{Path, PathBuf};

pub use error::ProjectError;
pub use loader::{LoaderOptions, ProjectLoader};

use crate::base::{FileId, LineIndex};
use crate::hir::Compilation;
use crate::parser::{self, AstNode, Parse, SourceFile, SyntaxError};

/// One parsed source file.
#[derive(Debug, Clone)]
pub struct SyntaxUnit {
    file: FileId,
    path: PathBuf,
    text: String,
    parse: Parse,
    line_index: LineIndex,
}

impl SyntaxUnit {
    pub fn new(file: FileId, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let parse = parser::parse(&text);
        let line_index = LineIndex::new(&text);
        Self {
            file,
            path: path.into(),
            text,
            parse,
            line_index,
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parse(&self) -> &Parse {
        &self.parse
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Typed root of the syntax tree.
    pub fn source_file(&self) -> Option<SourceFile> {
        SourceFile::cast(self.parse.syntax())
    }

    /// Syntax errors; parsing recovers from all of them.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.parse.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.parse.errors.is_empty()
    }
}

/// Ordered collection of syntax units.
#[derive(Debug, Clone, Default)]
pub struct Project {
    units: Vec<SyntaxUnit>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` and add it as the next unit.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> FileId {
        let file = FileId::new(self.units.len() as u32);
        let unit = SyntaxUnit::new(file, path, text);
        tracing::debug!(
            file = %file,
            path = %unit.path().display(),
            errors = unit.errors().len(),
            "added syntax unit"
        );
        self.units.push(unit);
        file
    }

    pub fn units(&self) -> &[SyntaxUnit] {
        &self.units
    }

    pub fn unit(&self, file: FileId) -> Option<&SyntaxUnit> {
        self.units.get(file.index())
    }

    pub fn unit_by_path(&self, path: &Path) -> Option<&SyntaxUnit> {
        self.units.iter().find(|u| u.path() == path)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Bind every unit into a [`Compilation`].
    pub fn compile(self) -> Compilation {
        Compilation::new(self)
    }
}
