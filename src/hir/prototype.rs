//! Prototype declarations.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::base::{FileId, TextRange};
use crate::parser::{AstNode, Mapping, SequenceItem, SyntaxKind, SyntaxNode, SyntaxNodePtr, SyntaxToken, Value};
use crate::project::Project;

use super::field::{ID, PARENTS, PROTOTYPE_POSITION, TYPE};
use super::ids::{PrototypeId, PrototypeReferenceLike};
use super::pointer::{NodeHandle, Restore, StaleHandle};
use super::reference::{PrototypeReference, PrototypeTypeReference};
use super::symbol::{SearchTarget, SourcedSymbol, Symbol};

/// One prototype declaration: a mapping that is an item of a document's
/// top-level sequence.
///
/// Identity is the declaring node. Two values built from the same mapping
/// are equal and hash alike whatever their fields say.
#[derive(Debug, Clone)]
pub struct Prototype {
    source: NodeHandle,
    id: PrototypeId,
    id_range: Option<TextRange>,
    type_ref: Option<PrototypeTypeReference>,
    parents: Option<PrototypeParents>,
    marker: Option<TextRange>,
}

impl PartialEq for Prototype {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Prototype {}

impl Hash for Prototype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

impl Prototype {
    /// Recognise `node` as a prototype declaration.
    ///
    /// Only mappings at prototype position are recognised. Results are
    /// cached per document version.
    pub fn from_node(project: &Project, file: FileId, node: &SyntaxNode) -> Option<Prototype> {
        if !PROTOTYPE_POSITION.accepts(node) {
            return None;
        }
        let source = project.file(file)?;
        let ptr = SyntaxNodePtr::new(node);
        source.cached_prototype(&ptr, || {
            Mapping::cast(node.clone()).map(|mapping| Self::extract(file, &mapping))
        })
    }

    /// The prototype declared by an `id` value scalar.
    pub fn from_id_element(project: &Project, file: FileId, node: &SyntaxNode) -> Option<Prototype> {
        if node.kind() != SyntaxKind::SCALAR || !ID.pattern().accepts(node) {
            return None;
        }
        let mapping = node.parent()?.parent()?;
        Self::from_node(project, file, &mapping)
    }

    /// The prototype whose sequence item starts with the `-` marker `token`.
    pub fn from_marker(project: &Project, file: FileId, token: &SyntaxToken) -> Option<Prototype> {
        if token.kind() != SyntaxKind::DASH {
            return None;
        }
        let item = SequenceItem::cast(token.parent()?)?;
        let value = item.value()?;
        Self::from_node(project, file, value.syntax())
    }

    fn extract(file: FileId, mapping: &Mapping) -> Prototype {
        let id_value = ID.value_in(mapping);
        let id = PrototypeId::from_value(id_value.as_ref());
        let id_range = id_value.as_ref().map(|value| match value {
            Value::Scalar(scalar) => scalar.value_range(),
            other => other.syntax().text_range(),
        });

        let type_ref = match TYPE.value_in(mapping) {
            Some(Value::Scalar(scalar)) if TYPE.pattern().accepts(scalar.syntax()) => {
                Some(PrototypeTypeReference::new(file, &scalar))
            }
            _ => None,
        };

        let parents = PrototypeParents::from_value(file, PARENTS.value_in(mapping).as_ref());

        let marker = mapping
            .syntax()
            .parent()
            .and_then(SequenceItem::cast)
            .and_then(|item| item.dash())
            .map(|dash| dash.text_range());

        Prototype {
            source: NodeHandle::new(file, mapping.syntax()),
            id,
            id_range,
            type_ref,
            parents,
            marker,
        }
    }

    pub fn file(&self) -> FileId {
        self.source.file()
    }

    pub fn id(&self) -> &PrototypeId {
        &self.id
    }

    /// Range of the whole declaring mapping.
    pub fn range(&self) -> TextRange {
        self.source.range()
    }

    /// Range of the id value, when the id field is present.
    pub fn id_range(&self) -> Option<TextRange> {
        self.id_range
    }

    /// Range of the `-` marker of the declaring sequence item.
    pub fn marker_range(&self) -> Option<TextRange> {
        self.marker
    }

    pub fn type_ref(&self) -> Option<&PrototypeTypeReference> {
        self.type_ref.as_ref()
    }

    pub fn parents(&self) -> Option<&PrototypeParents> {
        self.parents.as_ref()
    }
}

impl fmt::Display for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_ref {
            Some(ty) => write!(f, "{} ({})", self.id, ty.name()),
            None => write!(f, "{}", self.id),
        }
    }
}

impl Restore for Prototype {
    fn restore(project: &Project, file: FileId, node: &SyntaxNode) -> Option<Self> {
        Self::from_node(project, file, node)
    }
}

impl Symbol for Prototype {
    fn source(&self) -> &NodeHandle {
        &self.source
    }
}

impl SourcedSymbol for Prototype {
    fn containing_prototype(&self, _project: &Project) -> Result<Option<Prototype>, StaleHandle> {
        Ok(Some(self.clone()))
    }
}

impl SearchTarget for Prototype {
    fn search_text(&self) -> &str {
        self.id.as_valid().unwrap_or("")
    }
}

impl PrototypeReferenceLike for Prototype {
    fn prototype_id(&self) -> &PrototypeId {
        &self.id
    }
}

/// The prototype enclosing `node`, searching outward.
///
/// Only documents under the prototypes directory contain prototypes.
pub fn containing_prototype(project: &Project, file: FileId, node: &SyntaxNode) -> Option<Prototype> {
    if !project.is_in_prototypes(file) {
        return None;
    }
    node.ancestors()
        .find_map(|ancestor| Prototype::from_node(project, file, &ancestor))
}

/// The references listed in a parents field, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrototypeParents {
    source: NodeHandle,
    references: Vec<PrototypeReference>,
}

impl PrototypeParents {
    /// Build from the value of a parents field.
    ///
    /// A scalar is a single parent. A sequence keeps its scalar items that
    /// are valid references and silently drops the rest.
    pub fn from_value(file: FileId, value: Option<&Value>) -> Option<Self> {
        let value = value?;
        if !PARENTS.pattern().accepts(value.syntax()) {
            return None;
        }
        let references = match value {
            Value::Scalar(_) => PrototypeReference::from_node(file, value.syntax())
                .into_iter()
                .collect(),
            Value::Sequence(sequence) => sequence
                .items()
                .filter_map(|item| item.value())
                .filter_map(|v| PrototypeReference::from_node(file, v.syntax()))
                .collect(),
            _ => return None,
        };
        Some(Self {
            source: NodeHandle::new(file, value.syntax()),
            references,
        })
    }

    /// Check if some parent names the same id as `reference`.
    pub fn contains(&self, reference: &impl PrototypeReferenceLike) -> bool {
        let id = reference.prototype_id();
        self.references.iter().any(|r| r.prototype_id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PrototypeReference> {
        self.references.iter()
    }

    pub fn as_slice(&self) -> &[PrototypeReference] {
        &self.references
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

impl<'a> IntoIterator for &'a PrototypeParents {
    type Item = &'a PrototypeReference;
    type IntoIter = std::slice::Iter<'a, PrototypeReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Restore for PrototypeParents {
    fn restore(_project: &Project, file: FileId, node: &SyntaxNode) -> Option<Self> {
        let value = Value::cast(node.clone())?;
        Self::from_value(file, Some(&value))
    }
}

impl Symbol for PrototypeParents {
    fn source(&self) -> &NodeHandle {
        &self.source
    }
}

impl SourcedSymbol for PrototypeParents {}
