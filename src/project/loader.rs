//! Loading source files from disk into a [`Project`].

use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use super::{Project, ProjectError};
use crate::base::FileId;

/// Which files a [`ProjectLoader`] picks up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Extensions (without the dot) treated as source files.
    pub extensions: Vec<String>,
    /// Directory names skipped entirely.
    pub excluded_dirs: Vec<String>,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["cs".to_string()],
            excluded_dirs: vec!["bin".to_string(), "obj".to_string(), ".git".to_string()],
            follow_links: false,
        }
    }
}

impl LoaderOptions {
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_excluded_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Whether `path` has one of the configured extensions.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.excluded_dirs.iter().any(|d| d == name))
    }
}

/// Reads source files from disk and parses them into a [`Project`].
#[derive(Debug, Clone, Default)]
pub struct ProjectLoader {
    options: LoaderOptions,
}

impl ProjectLoader {
    pub fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Source files under `dir`, sorted by path.
    pub fn collect_file_paths(&self, dir: &Path) -> Result<Vec<PathBuf>, ProjectError> {
        if !dir.is_dir() {
            return Err(ProjectError::DirectoryNotFound(dir.to_path_buf()));
        }
        let walker = WalkDir::new(dir)
            .follow_links(self.options.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.options.is_excluded(entry));

        let mut paths = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && self.options.is_source_file(entry.path()) {
                paths.push(entry.into_path());
            } else {
                trace!(path = %entry.path().display(), "skipping entry");
            }
        }
        Ok(paths)
    }

    /// Load every source file under `dir` into a new project.
    pub fn load_directory(&self, dir: impl AsRef<Path>) -> Result<Project, ProjectError> {
        let dir = dir.as_ref();
        let mut project = Project::new();
        for path in self.collect_file_paths(dir)? {
            self.load_file(&mut project, &path)?;
        }
        debug!(
            dir = %dir.display(),
            files = project.len(),
            "loaded directory"
        );
        Ok(project)
    }

    /// Read and parse one file, appending it to `project`. Syntax errors are
    /// kept on the unit, not reported here.
    pub fn load_file(&self, project: &mut Project, path: impl AsRef<Path>) -> Result<FileId, ProjectError> {
        let path = path.as_ref();
        if !self.options.is_source_file(path) {
            return Err(ProjectError::UnsupportedExtension(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;
        Ok(project.add_file(path, text))
    }
}
