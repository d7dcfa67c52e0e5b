//! AnalysisHost and Analysis: state management for host-facing features.
//!
//! The `AnalysisHost` owns the project and the published prototype index and
//! hands out `Analysis` snapshots for querying. A snapshot pairs the current
//! project with one index, so every query against it sees consistent data.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new(ProjectConfig::with_root("/game"));
//!
//! // Apply file changes
//! let file = host.set_file_content("/game/Resources/Prototypes/a.yml", "- id: A\n");
//!
//! // Get a snapshot for queries
//! let analysis = host.analysis();
//! let declaration = analysis.declaration_at(file, 6.into());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use crate::base::{FileId, TextRange, TextSize};
use crate::hir::{
    BuildProgress, Prototype, PrototypeReference, PrototypesStorage, StorageError,
};
use crate::project::{Project, ProjectConfig};

use super::{
    GotoResult, InheritorMarker, InheritorNavigation, RenameError, SourceChange,
    TargetPresentation, Usage,
};

/// Owns all mutable state for the host-facing layer.
///
/// Apply changes via `set_file_content()` and `remove_file()`, then get a
/// consistent snapshot via `analysis()`.
#[derive(Debug)]
pub struct AnalysisHost {
    project: Project,
    /// Published index; replaced whole, never mutated in place.
    storage: RwLock<Option<Arc<PrototypesStorage>>>,
    /// Set by `invalidate()` until the next successful rebuild.
    invalidated: AtomicBool,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new(ProjectConfig::default())
    }
}

impl AnalysisHost {
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            project: Project::new(config),
            storage: RwLock::new(None),
            invalidated: AtomicBool::new(false),
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Set the content of a document, replacing any previous version.
    pub fn set_file_content(&mut self, path: impl Into<PathBuf>, text: &str) -> FileId {
        self.project.set_file_content(path, text)
    }

    pub fn remove_file(&mut self, path: &Path) -> Option<FileId> {
        self.project.remove_file(path)
    }

    /// Mark the published index stale; the next `analysis()` rebuilds it.
    ///
    /// The index stays visible until a rebuild succeeds.
    pub fn invalidate(&self) {
        self.invalidated.store(true, Ordering::Release);
    }

    /// The published index, whether or not it is current.
    pub fn snapshot(&self) -> Option<Arc<PrototypesStorage>> {
        self.storage.read().clone()
    }

    fn is_current(&self, storage: &PrototypesStorage) -> bool {
        !self.invalidated.load(Ordering::Acquire) && storage.revision() == self.project.revision()
    }

    /// Rebuild and publish the index.
    ///
    /// On failure the previously published index stays visible.
    pub fn rebuild_index(
        &self,
        progress: &dyn BuildProgress,
        cancel: &CancellationToken,
    ) -> Result<Arc<PrototypesStorage>, StorageError> {
        match PrototypesStorage::build(&self.project, progress, cancel) {
            Ok(storage) => {
                let storage = Arc::new(storage);
                *self.storage.write() = Some(storage.clone());
                self.invalidated.store(false, Ordering::Release);
                Ok(storage)
            }
            Err(err) => {
                tracing::warn!("Prototype index not rebuilt: {}", err);
                Err(err)
            }
        }
    }

    /// Get a consistent snapshot for querying.
    ///
    /// If the published index is missing or stale, it is rebuilt first. A
    /// failed rebuild falls back to the last published index.
    pub fn analysis(&self) -> Analysis<'_> {
        let published = self.snapshot();
        let storage = match published {
            Some(storage) if self.is_current(&storage) => storage,
            previous => self
                .rebuild_index(&(), &CancellationToken::new())
                .ok()
                .or(previous)
                .unwrap_or_else(|| Arc::new(PrototypesStorage::empty())),
        };
        Analysis {
            project: &self.project,
            storage,
        }
    }
}

/// An immutable snapshot of the analysis state.
///
/// All queries go through this struct to ensure consistent results.
#[derive(Debug, Clone)]
pub struct Analysis<'a> {
    project: &'a Project,
    storage: Arc<PrototypesStorage>,
}

impl<'a> Analysis<'a> {
    pub fn new(project: &'a Project, storage: Arc<PrototypesStorage>) -> Self {
        Self { project, storage }
    }

    pub fn project(&self) -> &'a Project {
        self.project
    }

    pub fn storage(&self) -> &PrototypesStorage {
        &self.storage
    }

    // ==================== Declarations & references ====================

    /// The prototype declared at `offset`: on its mapping, its id value, or
    /// the `-` marker of its sequence item.
    pub fn declaration_at(&self, file: FileId, offset: TextSize) -> Option<Prototype> {
        super::declaration_at(self.project, file, offset)
    }

    /// Prototypes declared with `id`.
    pub fn prototypes_named(&self, id: &str) -> &[Prototype] {
        self.storage.get_by_text(id)
    }

    /// References carried by the scalar at `offset`.
    pub fn references_at(&self, file: FileId, offset: TextSize) -> Vec<PrototypeReference> {
        super::references_at(self.project, file, offset)
    }

    /// Every usage of `prototype`, or `None` when it has no valid id.
    pub fn find_usages(&self, prototype: &Prototype, cancel: &CancellationToken) -> Option<Vec<Usage>> {
        super::find_usages(self.project, &self.storage, prototype, cancel)
    }

    /// Go to the prototypes named by the reference at `offset`.
    pub fn goto_definition(&self, file: FileId, offset: TextSize) -> GotoResult {
        super::goto_definition(self.project, &self.storage, file, offset)
    }

    // ==================== Inheritance ====================

    pub fn immediate_inheritors(&self, prototype: &Prototype, cancel: &CancellationToken) -> Vec<Prototype> {
        crate::hir::immediate_inheritors(self.project, &self.storage, prototype, cancel).collect()
    }

    /// Lazy breadth-first walk over the transitive inheritors of `prototype`.
    pub fn inheritors<'s>(
        &'s self,
        prototype: &Prototype,
        cancel: &'s CancellationToken,
    ) -> crate::hir::Inheritors<'s> {
        crate::hir::inheritors(self.project, &self.storage, prototype, cancel)
    }

    pub fn goto_inheritors(&self, prototype: &Prototype, cancel: &CancellationToken) -> InheritorNavigation {
        super::goto_inheritors(self.project, &self.storage, prototype, cancel)
    }

    /// Gutter markers for prototypes of `file` that have inheritors.
    pub fn inheritor_markers(&self, file: FileId, cancel: &CancellationToken) -> Vec<InheritorMarker> {
        super::inheritor_markers(self.project, &self.storage, file, cancel)
    }

    // ==================== Presentation & editing ====================

    pub fn presentation(&self, prototype: &Prototype) -> Option<TargetPresentation> {
        super::presentation(self.project, prototype)
    }

    /// Range of `prototype`'s declaration as `(file, range)`.
    pub fn navigation_target(&self, prototype: &Prototype) -> (FileId, TextRange) {
        (prototype.file(), prototype.id_range().unwrap_or_else(|| prototype.range()))
    }

    /// Edits renaming `prototype` and every usage of it to `new_id`.
    pub fn rename(
        &self,
        prototype: &Prototype,
        new_id: &str,
        cancel: &CancellationToken,
    ) -> Result<SourceChange, RenameError> {
        super::rename(self.project, &self.storage, prototype, new_id, cancel)
    }
}
