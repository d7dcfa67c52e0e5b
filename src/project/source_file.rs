//! A loaded document: text, syntax tree and per-file derived caches.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::base::LineIndex;
use crate::hir::Prototype;
use crate::parser::{AstNode, GreenNode, SyntaxError, SyntaxNode, SyntaxNodePtr, YamlFile, parse_yaml};

/// One version of a document's content.
///
/// A content change replaces the whole `SourceFile`, so everything cached
/// here is tied to exactly one text.
pub struct SourceFile {
    path: PathBuf,
    text: Arc<str>,
    green: GreenNode,
    errors: Vec<SyntaxError>,
    line_index: LineIndex,
    /// Mapping node → recognised prototype (or `None` for a rejected node).
    prototypes: Mutex<FxHashMap<SyntaxNodePtr, Option<Prototype>>>,
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("len", &self.text.len())
            .field("errors", &self.errors.len())
            .finish()
    }
}

impl SourceFile {
    /// Parse `text` as the content of `path`.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        let parse = parse_yaml(text);
        Self {
            path: path.into(),
            text: Arc::from(text),
            green: parse.green,
            errors: parse.errors,
            line_index: LineIndex::new(text),
            prototypes: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// A fresh root node. Syntax nodes are not `Send`; build one per thread.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn tree(&self) -> Option<YamlFile> {
        YamlFile::cast(self.syntax())
    }

    /// Cached recognition result for the node behind `ptr`.
    pub(crate) fn cached_prototype(
        &self,
        ptr: &SyntaxNodePtr,
        compute: impl FnOnce() -> Option<Prototype>,
    ) -> Option<Prototype> {
        if let Some(hit) = self.prototypes.lock().get(ptr) {
            return hit.clone();
        }
        let value = compute();
        self.prototypes.lock().insert(ptr.clone(), value.clone());
        value
    }

    /// Number of nodes with a cached recognition result.
    pub fn cached_prototype_count(&self) -> usize {
        self.prototypes.lock().len()
    }
}
