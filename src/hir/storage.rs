//! Project-wide prototype index.
//!
//! Built in three stages, each reported to a [`BuildProgress`]:
//!
//! ```text
//! Discovery   walk documents under the prototypes directory and collect
//!             every mapping reachable through sequences
//!     │
//!     ▼
//! Loading     recognise each candidate (in parallel)
//!     │
//!     ▼
//! Assembling  group recognised prototypes by id
//! ```
//!
//! The finished index is immutable. A cancelled build publishes nothing.

use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexMap;
use rayon::prelude::*;
use smol_str::SmolStr;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::base::FileId;
use crate::base::constants::{STAGE_ASSEMBLING, STAGE_DISCOVERY, STAGE_LOADING};
use crate::parser::{AstNode, SyntaxNodePtr, Value};
use crate::project::Project;

use super::ids::PrototypeId;
use super::prototype::Prototype;

/// Build stages of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Discovery,
    Loading,
    Assembling,
}

impl BuildStage {
    pub fn title(self) -> &'static str {
        match self {
            Self::Discovery => STAGE_DISCOVERY,
            Self::Loading => STAGE_LOADING,
            Self::Assembling => STAGE_ASSEMBLING,
        }
    }
}

/// Receives progress of an index build.
pub trait BuildProgress: Sync {
    fn stage(&self, _stage: BuildStage) {}

    /// `done` of `total` candidates of the loading stage were processed.
    fn item_done(&self, _done: usize, _total: usize) {}
}

/// No progress reporting.
impl BuildProgress for () {}

/// An index build stopped before finishing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("prototype index build was cancelled")]
    Cancelled,
}

/// Immutable id → prototypes multimap.
#[derive(Debug, Clone, Default)]
pub struct PrototypesStorage {
    by_id: IndexMap<SmolStr, Vec<Prototype>>,
    prototype_count: usize,
    revision: u64,
}

impl PrototypesStorage {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Scan the prototypes directory of `project`.
    ///
    /// A missing prototypes directory gives an empty index.
    pub fn build(
        project: &Project,
        progress: &dyn BuildProgress,
        cancel: &CancellationToken,
    ) -> Result<Self, StorageError> {
        let revision = project.revision();
        if project.prototypes_dir().is_none() {
            tracing::debug!("No prototypes directory, index is empty");
            return Ok(Self {
                revision,
                ..Self::default()
            });
        }

        progress.stage(BuildStage::Discovery);
        let candidates = discover(project, cancel)?;
        tracing::debug!("Discovered {} candidate mapping(s)", candidates.len());

        progress.stage(BuildStage::Loading);
        let total = candidates.len();
        let done = AtomicUsize::new(0);
        let prototypes: Vec<Prototype> = candidates
            .par_iter()
            .filter_map(|(file, ptr)| {
                if cancel.is_cancelled() {
                    return None;
                }
                let prototype = load(project, *file, ptr);
                progress.item_done(done.fetch_add(1, Ordering::Relaxed) + 1, total);
                prototype
            })
            .collect();
        if cancel.is_cancelled() {
            return Err(StorageError::Cancelled);
        }

        progress.stage(BuildStage::Assembling);
        let mut storage = Self::assemble(prototypes);
        storage.revision = revision;
        tracing::debug!(
            "Indexed {} prototype(s) under {} id(s)",
            storage.prototype_count,
            storage.by_id.len()
        );
        Ok(storage)
    }

    fn assemble(prototypes: Vec<Prototype>) -> Self {
        let mut by_id: IndexMap<SmolStr, Vec<Prototype>> = IndexMap::new();
        let mut prototype_count = 0;
        for prototype in prototypes {
            let PrototypeId::Valid(id) = prototype.id() else {
                tracing::trace!("Skipping prototype without valid id: {}", prototype);
                continue;
            };
            let entry = by_id.entry(id.clone()).or_default();
            if !entry.contains(&prototype) {
                entry.push(prototype);
                prototype_count += 1;
            }
        }
        Self {
            by_id,
            prototype_count,
            revision: 0,
        }
    }

    /// Prototypes declared with `id`. Empty for ids that are not `Valid`.
    pub fn get(&self, id: &PrototypeId) -> &[Prototype] {
        match id {
            PrototypeId::Valid(text) => self.get_by_text(text),
            _ => &[],
        }
    }

    pub fn get_by_text(&self, id: &str) -> &[Prototype] {
        self.by_id.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Number of indexed prototypes.
    pub fn prototype_count(&self) -> usize {
        self.prototype_count
    }

    /// Project revision the index was built from.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Ids with their prototypes, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Prototype])> + '_ {
        self.by_id.iter().map(|(id, protos)| (id.as_str(), protos.as_slice()))
    }

    /// Ids declared by more than one prototype.
    pub fn duplicate_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter()
            .filter(|(_, protos)| protos.len() > 1)
            .map(|(id, _)| id)
    }
}

/// Collect candidate mappings, document by document.
fn discover(project: &Project, cancel: &CancellationToken) -> Result<Vec<(FileId, SyntaxNodePtr)>, StorageError> {
    let mut candidates = Vec::new();
    for (file, source) in project.prototype_files() {
        if cancel.is_cancelled() {
            return Err(StorageError::Cancelled);
        }
        let Some(tree) = source.tree() else { continue };
        for document in tree.documents() {
            if let Some(value) = document.top_level_value() {
                collect_mappings(file, &value, &mut candidates);
            }
        }
    }
    Ok(candidates)
}

fn collect_mappings(file: FileId, value: &Value, out: &mut Vec<(FileId, SyntaxNodePtr)>) {
    match value {
        Value::Mapping(mapping) => out.push((file, SyntaxNodePtr::new(mapping.syntax()))),
        Value::Sequence(sequence) => {
            for item in sequence.items().filter_map(|item| item.value()) {
                collect_mappings(file, &item, out);
            }
        }
        Value::Scalar(_) | Value::Alias(_) => {}
    }
}

fn load(project: &Project, file: FileId, ptr: &SyntaxNodePtr) -> Option<Prototype> {
    let source = project.file(file)?;
    let node = ptr.try_to_node(&source.syntax())?;
    Prototype::from_node(project, file, &node)
}
