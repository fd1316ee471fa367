//! Diagnostics — problems found while binding declarations.
//!
//! Binding never fails: unresolved names, duplicate declarations and
//! inheritance cycles are recorded here and the binder carries on with a
//! best-effort model (error types, merged declarations, dropped edges).

use std::sync::Arc;

use crate::base::{FileId, LineCol, LineIndex, TextRange};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file containing this diagnostic.
    pub file: FileId,
    /// Byte range of the offending syntax.
    pub range: TextRange,
    /// Start of `range` (0-indexed).
    pub start: LineCol,
    /// End of `range` (0-indexed).
    pub end: LineCol,
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        file: FileId,
        range: TextRange,
        line_index: &LineIndex,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            file,
            range,
            start: line_index.line_col(range.start()),
            end: line_index.line_col(range.end()),
            severity,
            code: None,
            message: message.into(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(
        file: FileId,
        range: TextRange,
        line_index: &LineIndex,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self::new(Severity::Error, file, range, line_index, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(
        file: FileId,
        range: TextRange,
        line_index: &LineIndex,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self::new(Severity::Warning, file, range, line_index, message)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}:{}:{}: {}", self.file, self.start.line + 1, self.start.col + 1, severity)?;
        if let Some(code) = &self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes reported by the binder.
///
/// - **E0001-E0099**: binding errors
/// - **W0001-W0099**: warnings
pub mod codes {
    /// Type name not found in any enclosing scope.
    pub const UNDEFINED_TYPE: &str = "E0001";
    /// Two declarations of the same type that cannot be merged.
    pub const DUPLICATE_DEFINITION: &str = "E0002";
    /// Base type chain leads back to the declaring type.
    pub const CIRCULAR_BASE: &str = "E0003";
    /// Base list entry that cannot be inherited from.
    pub const INVALID_BASE: &str = "E0004";
    /// Partial declarations naming different base classes.
    pub const CONFLICTING_BASE: &str = "E0005";

    /// `using` directive whose target does not exist in the project.
    pub const UNRESOLVED_USING: &str = "W0001";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during binding.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics for a specific file.
    pub fn diagnostics_for_file(&self, file: FileId) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.file == file).collect()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}
