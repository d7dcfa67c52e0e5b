//! Renaming prototypes.
//!
//! A rename rewrites the prototype's id value and every usage that resolves
//! to it. Edits are planned per file and applied by the host.

use indexmap::IndexMap;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::base::{FileId, TextRange};
use crate::hir::{Prototype, PrototypesStorage, SearchTarget, Symbol, SymbolReference};
use crate::pattern::is_prototype_identifier;
use crate::project::Project;
use crate::search;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    #[error("`{0}` is not a valid prototype id")]
    InvalidIdentifier(String),
    #[error("prototype has no id to rename")]
    NoSearchText,
}

/// Replace `range` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: TextRange,
    pub new_text: String,
}

/// Edits grouped by file, each group sorted by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceChange {
    pub edits: IndexMap<FileId, Vec<TextEdit>>,
}

impl SourceChange {
    fn insert(&mut self, file: FileId, edit: TextEdit) {
        let edits = self.edits.entry(file).or_default();
        if !edits.contains(&edit) {
            edits.push(edit);
        }
    }

    pub fn file_edits(&self, file: FileId) -> &[TextEdit] {
        self.edits.get(&file).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of edits over all files.
    pub fn len(&self) -> usize {
        self.edits.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Apply non-overlapping `edits` to `text`.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|edit| edit.range.start());
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for edit in sorted {
        let start = usize::from(edit.range.start());
        let end = usize::from(edit.range.end());
        out.push_str(&text[last..start]);
        out.push_str(&edit.new_text);
        last = end;
    }
    out.push_str(&text[last..]);
    out
}

/// Plan the edits renaming `prototype` to `new_id`.
pub fn rename(
    project: &Project,
    storage: &PrototypesStorage,
    prototype: &Prototype,
    new_id: &str,
    cancel: &CancellationToken,
) -> Result<SourceChange, RenameError> {
    if !is_prototype_identifier(new_id) {
        return Err(RenameError::InvalidIdentifier(new_id.to_string()));
    }
    let Some(id_range) = prototype.id_range().filter(|_| !prototype.search_text().is_empty()) else {
        return Err(RenameError::NoSearchText);
    };

    let mut change = SourceChange::default();
    change.insert(
        prototype.file(),
        TextEdit {
            range: id_range,
            new_text: new_id.to_string(),
        },
    );
    for usage in search::usages(project, storage, prototype, &search::any_usage, cancel) {
        change.insert(
            usage.source().file(),
            TextEdit {
                range: usage.range(),
                new_text: new_id.to_string(),
            },
        );
    }
    for edits in change.edits.values_mut() {
        edits.sort_by_key(|edit| edit.range.start());
    }
    tracing::debug!("Rename of {} touches {} place(s)", prototype, change.len());
    Ok(change)
}
