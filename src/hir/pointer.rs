//! Stable handles to syntax nodes and symbols.
//!
//! Syntax nodes are tied to one parse and are not `Send`. Everything that
//! outlives a query stores a [`NodeHandle`] instead and dereferences it
//! against the current [`Project`] when needed. A handle whose node is gone
//! yields [`StaleHandle`], which callers propagate with `?` up to the
//! query boundary and turn into "no result" there.

use std::marker::PhantomData;

use thiserror::Error;

use crate::base::{FileId, TextRange};
use crate::parser::{SyntaxKind, SyntaxNode, SyntaxNodePtr};
use crate::project::Project;

/// A node handle could not be dereferenced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StaleHandle {
    #[error("{0} is no longer loaded")]
    FileRemoved(FileId),

    #[error("no {kind:?} node at {range:?} in {file}")]
    NodeGone {
        file: FileId,
        kind: SyntaxKind,
        range: TextRange,
    },

    #[error("node at {range:?} in {file} no longer forms the expected symbol")]
    NotRecognized { file: FileId, range: TextRange },
}

/// Location-based identity of a syntax node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    file: FileId,
    ptr: SyntaxNodePtr,
}

impl NodeHandle {
    pub fn new(file: FileId, node: &SyntaxNode) -> Self {
        Self {
            file,
            ptr: SyntaxNodePtr::new(node),
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn kind(&self) -> SyntaxKind {
        self.ptr.kind()
    }

    pub fn range(&self) -> TextRange {
        self.ptr.text_range()
    }

    pub fn ptr(&self) -> &SyntaxNodePtr {
        &self.ptr
    }

    /// Find the live node in the current content of the file.
    pub fn to_node(&self, project: &Project) -> Result<SyntaxNode, StaleHandle> {
        let source = project
            .file(self.file)
            .ok_or(StaleHandle::FileRemoved(self.file))?;
        self.ptr
            .try_to_node(&source.syntax())
            .ok_or(StaleHandle::NodeGone {
                file: self.file,
                kind: self.kind(),
                range: self.range(),
            })
    }
}

/// Something that can be re-derived from the node it was built from.
pub trait Restore: Sized {
    fn restore(project: &Project, file: FileId, node: &SyntaxNode) -> Option<Self>;
}

/// A handle that re-derives a symbol of type `T` on dereference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolPointer<T> {
    handle: NodeHandle,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Restore> SymbolPointer<T> {
    pub fn new(handle: NodeHandle) -> Self {
        Self {
            handle,
            _marker: PhantomData,
        }
    }

    pub fn handle(&self) -> &NodeHandle {
        &self.handle
    }

    pub fn dereference(&self, project: &Project) -> Result<T, StaleHandle> {
        let node = self.handle.to_node(project)?;
        T::restore(project, self.handle.file, &node).ok_or(StaleHandle::NotRecognized {
            file: self.handle.file,
            range: self.handle.range(),
        })
    }
}
