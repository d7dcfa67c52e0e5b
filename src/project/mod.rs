//! Project state: configuration, loaded documents and directory layout.
//!
//! [`Project`] is the explicit session context every query receives. It is
//! owned by [`AnalysisHost`](crate::ide::AnalysisHost), which bumps its
//! revision on every content change.

mod config;
pub mod file_loader;
mod file_set;
mod source_file;
pub mod workspace_loader;

pub use config::ProjectConfig;
pub use file_set::FileSet;
pub use source_file::SourceFile;
pub use workspace_loader::{LoadError, WorkspaceLoader};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::base::FileId;

/// Loaded documents plus the configuration that gives them meaning.
#[derive(Debug, Clone, Default)]
pub struct Project {
    config: ProjectConfig,
    files: FileSet,
    revision: u64,
}

impl Project {
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            config,
            files: FileSet::new(),
            revision: 0,
        }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    /// Modification counter; changes whenever any document changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Parse and store `text` as the content of `path`.
    pub fn set_file_content(&mut self, path: impl Into<PathBuf>, text: &str) -> FileId {
        let id = self.files.insert(SourceFile::parse(path, text));
        self.revision += 1;
        id
    }

    pub fn remove_file(&mut self, path: &Path) -> Option<FileId> {
        let id = self.files.remove(path)?;
        self.revision += 1;
        Some(id)
    }

    pub fn file(&self, id: FileId) -> Option<&Arc<SourceFile>> {
        self.files.get(id)
    }

    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.files.file_id(path)
    }

    /// The resources directory, if any loaded document lies beneath it.
    pub fn resources_dir(&self) -> Option<PathBuf> {
        let dir = self.config.resources_path();
        self.contains_documents_under(&dir).then_some(dir)
    }

    /// The prototypes directory, if any loaded document lies beneath it.
    pub fn prototypes_dir(&self) -> Option<PathBuf> {
        self.resources_dir()?;
        let dir = self.config.prototypes_path();
        self.contains_documents_under(&dir).then_some(dir)
    }

    /// Check if `file` lies beneath the prototypes directory.
    pub fn is_in_prototypes(&self, file: FileId) -> bool {
        let Some(source) = self.files.get(file) else {
            return false;
        };
        source.path().starts_with(self.config.prototypes_path()) && self.config.is_document(source.path())
    }

    /// Documents beneath the prototypes directory, in path order.
    pub fn prototype_files(&self) -> impl Iterator<Item = (FileId, &Arc<SourceFile>)> + '_ {
        let dir = self.config.prototypes_path();
        self.files
            .iter()
            .filter(move |(_, file)| file.path().starts_with(&dir) && self.config.is_document(file.path()))
    }

    fn contains_documents_under(&self, dir: &Path) -> bool {
        self.files.iter().any(|(_, file)| file.path().starts_with(dir))
    }
}
