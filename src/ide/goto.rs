//! Declarations and go-to-definition.

use std::sync::Arc;

use crate::base::{FileId, TextRange, TextSize};
use crate::hir::{Prototype, PrototypesStorage, SymbolReference};
use crate::parser::{SyntaxKind, SyntaxNode};
use crate::project::Project;

use super::references::references_at;

/// Result of a go-to-definition request.
///
/// Zero targets means nothing to jump to, one target a direct jump, and
/// several a choice for the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GotoResult {
    /// The targets to jump to.
    pub targets: Vec<GotoTarget>,
}

impl GotoResult {
    /// Create an empty result (no targets found).
    pub fn empty() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// Create a result with a single target.
    pub fn single(target: GotoTarget) -> Self {
        Self {
            targets: vec![target],
        }
    }

    /// Create a result with multiple targets.
    pub fn multiple(targets: Vec<GotoTarget>) -> Self {
        Self { targets }
    }

    /// Check if any targets were found.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Check if the user has to choose among targets.
    pub fn is_ambiguous(&self) -> bool {
        self.targets.len() > 1
    }
}

/// A target location for go-to-definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    /// The file containing the target.
    pub file: FileId,
    /// Range of the whole declaration.
    pub full_range: TextRange,
    /// Range to place the cursor on: the id value when present.
    pub focus_range: TextRange,
    /// The prototype id.
    pub name: Arc<str>,
}

impl From<&Prototype> for GotoTarget {
    fn from(prototype: &Prototype) -> Self {
        Self {
            file: prototype.file(),
            full_range: prototype.range(),
            focus_range: prototype.id_range().unwrap_or_else(|| prototype.range()),
            name: Arc::from(prototype.id().to_string()),
        }
    }
}

/// The prototype declared by `node`: its mapping or its id value.
pub fn declaration(project: &Project, file: FileId, node: &SyntaxNode) -> Option<Prototype> {
    Prototype::from_node(project, file, node).or_else(|| Prototype::from_id_element(project, file, node))
}

/// The prototype declared at `offset`.
///
/// Matches on the `-` marker of a prototype's sequence item, on its id
/// value, and anywhere else inside the prototype mapping that is not inside
/// a nested collection.
pub fn declaration_at(project: &Project, file: FileId, offset: TextSize) -> Option<Prototype> {
    let root = project.file(file)?.syntax();
    let token = root.token_at_offset(offset).right_biased()?;
    if token.kind() == SyntaxKind::DASH {
        if let Some(prototype) = Prototype::from_marker(project, file, &token) {
            return Some(prototype);
        }
    }
    let parent = token.parent()?;
    if let Some(prototype) = Prototype::from_id_element(project, file, &parent) {
        return Some(prototype);
    }
    let mapping = parent
        .ancestors()
        .find(|node| node.kind() == SyntaxKind::MAPPING)?;
    Prototype::from_node(project, file, &mapping)
}

/// Find the prototypes named by the reference at `offset`.
///
/// On a prototype's own id value, the declaration itself is the target.
pub fn goto_definition(
    project: &Project,
    storage: &PrototypesStorage,
    file: FileId,
    offset: TextSize,
) -> GotoResult {
    let targets: Vec<GotoTarget> = references_at(project, file, offset)
        .iter()
        .flat_map(|reference| reference.resolve(storage))
        .map(GotoTarget::from)
        .collect();
    if !targets.is_empty() {
        return GotoResult::multiple(targets);
    }

    let on_id = project
        .file(file)
        .and_then(|source| source.syntax().token_at_offset(offset).right_biased())
        .and_then(|token| token.parent())
        .and_then(|node| Prototype::from_id_element(project, file, &node));
    match on_id {
        Some(prototype) => GotoResult::single(GotoTarget::from(&prototype)),
        None => GotoResult::empty(),
    }
}
