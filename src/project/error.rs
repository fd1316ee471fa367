//! Error types for project loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading source files into a [`Project`](super::Project).
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The directory to load does not exist or is not a directory.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// A file whose extension is not configured as source.
    #[error("Unsupported file extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    /// Reading a file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the directory tree failed.
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl ProjectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
