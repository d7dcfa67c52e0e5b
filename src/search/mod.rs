//! Project-wide usage search.
//!
//! Usages are found by text first: every whole-word occurrence of the target's
//! search text in every loaded document is mapped back to the innermost scalar
//! around it, and the references carried by that scalar are re-resolved
//! against the index. Only references that really resolve to the target are
//! reported.

pub mod text_utils;

use std::collections::VecDeque;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::base::{FileId, TextSize};
use crate::hir::{Prototype, PrototypeReference, PrototypesStorage, SearchTarget, SymbolReference, references};
use crate::parser::{SyntaxKind, SyntaxNode};
use crate::project::{Project, SourceFile};

pub use text_utils::find_word_occurrences;

/// Predicate applied to each candidate usage.
pub type UsageFilter<'a> = &'a dyn Fn(&PrototypeReference) -> bool;

/// Accepts every usage.
pub fn any_usage(_reference: &PrototypeReference) -> bool {
    true
}

/// Lazily search every loaded document for usages of `target`.
///
/// Documents are visited in path order. Cancellation is checked before each
/// document and ends the iteration.
pub fn usages<'a>(
    project: &'a Project,
    storage: &'a PrototypesStorage,
    target: &'a Prototype,
    filter: UsageFilter<'a>,
    cancel: &'a CancellationToken,
) -> Usages<'a> {
    let word = target.search_text();
    let files: Box<dyn Iterator<Item = (FileId, &'a Arc<SourceFile>)> + 'a> = if word.is_empty() {
        Box::new(std::iter::empty())
    } else {
        Box::new(project.files().iter())
    };
    Usages {
        project,
        storage,
        target,
        word,
        filter,
        cancel,
        files,
        pending: VecDeque::new(),
    }
}

/// Iterator returned by [`usages`].
pub struct Usages<'a> {
    project: &'a Project,
    storage: &'a PrototypesStorage,
    target: &'a Prototype,
    word: &'a str,
    filter: UsageFilter<'a>,
    cancel: &'a CancellationToken,
    files: Box<dyn Iterator<Item = (FileId, &'a Arc<SourceFile>)> + 'a>,
    pending: VecDeque<PrototypeReference>,
}

impl Usages<'_> {
    fn search_file(&mut self, file: FileId, source: &SourceFile) {
        let offsets = find_word_occurrences(source.text(), self.word);
        if offsets.is_empty() {
            return;
        }
        tracing::trace!(
            "{} occurrence(s) of {:?} in {}",
            offsets.len(),
            self.word,
            source.path().display()
        );
        let root = source.syntax();
        let mut seen = Vec::new();
        for offset in offsets {
            let offset = TextSize::from(offset as u32);
            let Some(scalar) = innermost_scalar(&root, offset) else {
                continue;
            };
            for reference in references(self.project, file, &scalar) {
                if !reference.range().contains(offset)
                    || !reference.resolves_to(self.storage, self.target)
                    || !(self.filter)(&reference)
                    || seen.contains(&reference)
                {
                    continue;
                }
                seen.push(reference.clone());
                self.pending.push_back(reference);
            }
        }
    }
}

impl Iterator for Usages<'_> {
    type Item = PrototypeReference;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(reference) = self.pending.pop_front() {
                return Some(reference);
            }
            if self.cancel.is_cancelled() {
                tracing::debug!("Usage search for {:?} cancelled", self.word);
                return None;
            }
            let (file, source) = self.files.next()?;
            self.search_file(file, source);
        }
    }
}

/// The innermost scalar node covering `offset`.
pub fn innermost_scalar(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxNode> {
    let token = root.token_at_offset(offset).right_biased()?;
    token
        .parent_ancestors()
        .find(|node| node.kind() == SyntaxKind::SCALAR)
}
