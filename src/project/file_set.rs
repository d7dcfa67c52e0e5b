//! The set of loaded documents.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::SourceFile;
use crate::base::FileId;

/// Loaded documents keyed by [`FileId`], iterated in path order.
#[derive(Debug, Default, Clone)]
pub struct FileSet {
    by_path: BTreeMap<PathBuf, FileId>,
    files: FxHashMap<FileId, Arc<SourceFile>>,
    next_id: u32,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the document at `path`. The path keeps its id.
    pub fn insert(&mut self, file: SourceFile) -> FileId {
        let id = match self.by_path.get(file.path()) {
            Some(&id) => id,
            None => {
                let id = FileId::new(self.next_id);
                self.next_id += 1;
                self.by_path.insert(file.path().to_path_buf(), id);
                id
            }
        };
        self.files.insert(id, Arc::new(file));
        id
    }

    pub fn remove(&mut self, path: &Path) -> Option<FileId> {
        let id = self.by_path.remove(path)?;
        self.files.remove(&id);
        Some(id)
    }

    pub fn get(&self, id: FileId) -> Option<&Arc<SourceFile>> {
        self.files.get(&id)
    }

    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.by_path.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All documents in path order.
    pub fn iter(&self) -> impl Iterator<Item = (FileId, &Arc<SourceFile>)> + '_ {
        self.by_path
            .values()
            .filter_map(|id| self.files.get(id).map(|file| (*id, file)))
    }
}
