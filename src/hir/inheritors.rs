//! Inheritance queries.
//!
//! Child prototypes name their parents, but nothing records the inverse
//! edge. Inheritors are found by searching for parent occurrences of the
//! target's id and checking each hit against the child's own parents list.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tokio_util::sync::CancellationToken;

use crate::project::Project;
use crate::search;

use super::prototype::Prototype;
use super::reference::{PrototypeReference, same_type};
use super::storage::PrototypesStorage;
use super::symbol::SourcedSymbol;

/// Prototypes listing `target` as a parent, each reported once.
///
/// A child whose type differs from the target's is excluded, unless either
/// side has no type.
pub fn immediate_inheritors<'a>(
    project: &'a Project,
    storage: &'a PrototypesStorage,
    target: &'a Prototype,
    cancel: &'a CancellationToken,
) -> impl Iterator<Item = Prototype> + 'a {
    let mut seen = FxHashSet::default();
    search::usages(project, storage, target, &PrototypeReference::is_parent_occurrence, cancel)
        .filter_map(move |usage| match usage.containing_prototype(project) {
            Ok(child) => child,
            Err(stale) => {
                tracing::debug!("Dropping parent occurrence: {}", stale);
                None
            }
        })
        .filter(move |child| same_type(child.type_ref(), target.type_ref(), true))
        .filter(move |child| child.parents().is_some_and(|parents| parents.contains(target)))
        .filter(move |child| seen.insert(child.clone()))
}

/// Breadth-first walk over transitive inheritors.
///
/// Every immediate inheritor of the root comes before any of their own
/// inheritors. Each prototype is yielded at most once and the root never,
/// so inheritance cycles terminate. Cancellation is checked before each
/// expansion and ends the walk.
pub struct Inheritors<'a> {
    project: &'a Project,
    storage: &'a PrototypesStorage,
    cancel: &'a CancellationToken,
    /// Discovered prototypes whose inheritors are not expanded yet.
    pending: VecDeque<Prototype>,
    /// Inheritors of the prototype expanded last, not yet yielded.
    batch: VecDeque<Prototype>,
    visited: FxHashSet<Prototype>,
}

impl<'a> Inheritors<'a> {
    pub fn new(
        project: &'a Project,
        storage: &'a PrototypesStorage,
        root: &Prototype,
        cancel: &'a CancellationToken,
    ) -> Self {
        let mut visited = FxHashSet::default();
        visited.insert(root.clone());
        Self {
            project,
            storage,
            cancel,
            pending: VecDeque::from([root.clone()]),
            batch: VecDeque::new(),
            visited,
        }
    }

    fn expand(&mut self, prototype: &Prototype) {
        let children: Vec<Prototype> =
            immediate_inheritors(self.project, self.storage, prototype, self.cancel).collect();
        for child in children {
            if self.visited.insert(child.clone()) {
                self.batch.push_back(child);
            }
        }
    }
}

impl Iterator for Inheritors<'_> {
    type Item = Prototype;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(next) = self.batch.pop_front() {
                self.pending.push_back(next.clone());
                return Some(next);
            }
            if self.cancel.is_cancelled() {
                return None;
            }
            let prototype = self.pending.pop_front()?;
            self.expand(&prototype);
        }
    }
}

/// Transitive inheritors of `target`, breadth first.
pub fn inheritors<'a>(
    project: &'a Project,
    storage: &'a PrototypesStorage,
    target: &Prototype,
    cancel: &'a CancellationToken,
) -> Inheritors<'a> {
    Inheritors::new(project, storage, target, cancel)
}
