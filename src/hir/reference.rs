//! Textual mentions of prototypes and of foreign types.

use std::fmt;

use smol_str::SmolStr;

use crate::base::{FileId, TextRange};
use crate::parser::{AstNode, Scalar, SyntaxNode};
use crate::pattern::is_type_name;
use crate::project::Project;

use super::field::{PARENT_OCCURRENCE, REFERENCE_VALUE};
use super::ids::{PrototypeId, PrototypeReferenceLike};
use super::pointer::{NodeHandle, Restore};
use super::prototype::Prototype;
use super::storage::PrototypesStorage;
use super::symbol::{SourcedSymbol, Symbol, SymbolReference, UsageKind};

/// A scalar naming a prototype by id.
///
/// Only built from scalars matching the identifier grammar, so the id is
/// always `Valid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrototypeReference {
    source: NodeHandle,
    id: PrototypeId,
    range: TextRange,
    parent_occurrence: bool,
}

impl PrototypeReference {
    /// Build a reference from a scalar node.
    pub fn from_node(file: FileId, node: &SyntaxNode) -> Option<Self> {
        if !REFERENCE_VALUE.accepts(node) {
            return None;
        }
        let scalar = Scalar::cast(node.clone())?;
        Some(Self {
            source: NodeHandle::new(file, node),
            id: PrototypeId::Valid(SmolStr::new(scalar.text_value())),
            range: scalar.value_range(),
            parent_occurrence: PARENT_OCCURRENCE.accepts(node),
        })
    }

    pub fn id_text(&self) -> &str {
        self.id.as_valid().unwrap_or("")
    }

    /// Check if this reference is an entry of a prototype's parents field.
    pub fn is_parent_occurrence(&self) -> bool {
        self.parent_occurrence
    }
}

impl fmt::Display for PrototypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

impl PrototypeReferenceLike for PrototypeReference {
    fn prototype_id(&self) -> &PrototypeId {
        &self.id
    }
}

impl Restore for PrototypeReference {
    fn restore(_project: &Project, file: FileId, node: &SyntaxNode) -> Option<Self> {
        Self::from_node(file, node)
    }
}

impl Symbol for PrototypeReference {
    fn source(&self) -> &NodeHandle {
        &self.source
    }
}

impl SourcedSymbol for PrototypeReference {}

impl SymbolReference for PrototypeReference {
    fn element(&self) -> &NodeHandle {
        &self.source
    }

    fn range(&self) -> TextRange {
        self.range
    }

    fn resolve<'s>(&self, storage: &'s PrototypesStorage) -> &'s [Prototype] {
        storage.get(&self.id)
    }

    fn usage_kind(&self) -> Option<UsageKind> {
        self.parent_occurrence.then_some(UsageKind::ParentDeclaration)
    }
}

/// A scalar naming a type implemented outside the documents.
///
/// Never resolves; it exists to compare the types of two prototypes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrototypeTypeReference {
    source: NodeHandle,
    name: SmolStr,
    range: TextRange,
}

impl PrototypeTypeReference {
    pub(crate) fn new(file: FileId, scalar: &Scalar) -> Self {
        Self {
            source: NodeHandle::new(file, scalar.syntax()),
            name: SmolStr::new(scalar.text_value()),
            range: scalar.value_range(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same type name.
    pub fn same_as(&self, other: &PrototypeTypeReference) -> bool {
        self.name == other.name
    }
}

/// Compare two optional types. A missing side matches only when
/// `nulls_are_same` is set.
pub fn same_type(
    a: Option<&PrototypeTypeReference>,
    b: Option<&PrototypeTypeReference>,
    nulls_are_same: bool,
) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.same_as(b),
        _ => nulls_are_same,
    }
}

impl fmt::Display for PrototypeTypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Restore for PrototypeTypeReference {
    fn restore(_project: &Project, file: FileId, node: &SyntaxNode) -> Option<Self> {
        let scalar = Scalar::cast(node.clone())?;
        is_type_name(&scalar.text_value()).then(|| Self::new(file, &scalar))
    }
}

impl Symbol for PrototypeTypeReference {
    fn source(&self) -> &NodeHandle {
        &self.source
    }
}

impl SourcedSymbol for PrototypeTypeReference {}

impl SymbolReference for PrototypeTypeReference {
    fn element(&self) -> &NodeHandle {
        &self.source
    }

    fn range(&self) -> TextRange {
        self.range
    }

    fn resolve<'s>(&self, _storage: &'s PrototypesStorage) -> &'s [Prototype] {
        &[]
    }

    fn usage_kind(&self) -> Option<UsageKind> {
        None
    }
}

/// References carried by `node`.
///
/// Every scalar matching the identifier grammar is a reference, except the
/// id value of a recognised prototype.
pub fn references(project: &Project, file: FileId, node: &SyntaxNode) -> Vec<PrototypeReference> {
    if Scalar::cast(node.clone()).is_none() {
        return Vec::new();
    }
    if Prototype::from_id_element(project, file, node).is_some() {
        return Vec::new();
    }
    PrototypeReference::from_node(file, node).into_iter().collect()
}
