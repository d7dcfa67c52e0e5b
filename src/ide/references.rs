//! Reference provider and usage search.

use tokio_util::sync::CancellationToken;

use crate::base::{FileId, TextRange, TextSize};
use crate::hir::{Prototype, PrototypeReference, PrototypesStorage, SearchTarget, Symbol, SymbolReference, UsageKind};
use crate::parser::SyntaxNode;
use crate::project::Project;
use crate::search::{self, innermost_scalar};

/// References carried by `node`.
pub fn references(project: &Project, file: FileId, node: &SyntaxNode) -> Vec<PrototypeReference> {
    crate::hir::references(project, file, node)
}

/// References carried by the innermost scalar around `offset`.
pub fn references_at(project: &Project, file: FileId, offset: TextSize) -> Vec<PrototypeReference> {
    let Some(source) = project.file(file) else {
        return Vec::new();
    };
    match innermost_scalar(&source.syntax(), offset) {
        Some(scalar) => references(project, file, &scalar),
        None => Vec::new(),
    }
}

/// One place a prototype is used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Usage {
    /// The file containing the usage.
    pub file: FileId,
    /// Range of the id text.
    pub range: TextRange,
    /// Grouping of the usage, when it has one.
    pub usage_kind: Option<UsageKind>,
}

impl From<&PrototypeReference> for Usage {
    fn from(reference: &PrototypeReference) -> Self {
        Self {
            file: reference.source().file(),
            range: reference.range(),
            usage_kind: reference.usage_kind(),
        }
    }
}

/// Every usage of `prototype` across the project.
///
/// `None` when the prototype has nothing to search for.
pub fn find_usages(
    project: &Project,
    storage: &PrototypesStorage,
    prototype: &Prototype,
    cancel: &CancellationToken,
) -> Option<Vec<Usage>> {
    if prototype.search_text().is_empty() {
        return None;
    }
    let usages = search::usages(project, storage, prototype, &search::any_usage, cancel)
        .map(|reference| Usage::from(&reference))
        .collect();
    Some(usages)
}
