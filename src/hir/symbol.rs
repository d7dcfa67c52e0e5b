//! Capabilities shared by prototype symbols.
//!
//! One concrete type per concept ([`Prototype`], [`PrototypeReference`], ...)
//! implements the capabilities it supports instead of sitting in a type
//! hierarchy.
//!
//! [`Prototype`]: super::Prototype
//! [`PrototypeReference`]: super::PrototypeReference

use crate::base::TextRange;
use crate::project::Project;

use super::pointer::{NodeHandle, Restore, StaleHandle, SymbolPointer};
use super::prototype::{Prototype, containing_prototype};
use super::storage::PrototypesStorage;

/// Where a reference occurs, for grouping usages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageKind {
    /// The reference is an entry of a prototype's parents field.
    ParentDeclaration,
}

impl UsageKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::ParentDeclaration => crate::base::constants::USAGE_PARENT_DECLARATION,
        }
    }
}

/// A symbol that can be re-found after edits.
pub trait Symbol: Restore {
    /// The node the symbol is derived from.
    fn source(&self) -> &NodeHandle;

    fn create_pointer(&self) -> SymbolPointer<Self> {
        SymbolPointer::new(self.source().clone())
    }
}

/// A symbol that lives inside some prototype declaration.
pub trait SourcedSymbol: Symbol {
    /// The prototype enclosing this symbol's source node.
    ///
    /// `Ok(None)` for symbols outside of prototype documents.
    fn containing_prototype(&self, project: &Project) -> Result<Option<Prototype>, StaleHandle> {
        let node = self.source().to_node(project)?;
        Ok(containing_prototype(project, self.source().file(), &node))
    }
}

/// A textual mention that may resolve to prototypes.
pub trait SymbolReference {
    /// The node holding the mention.
    fn element(&self) -> &NodeHandle;

    /// Absolute range of the mention text.
    fn range(&self) -> TextRange;

    /// Every prototype the mention names.
    fn resolve<'s>(&self, storage: &'s PrototypesStorage) -> &'s [Prototype];

    fn usage_kind(&self) -> Option<UsageKind>;

    fn resolves_to(&self, storage: &PrototypesStorage, target: &Prototype) -> bool {
        self.resolve(storage).contains(target)
    }
}

/// A symbol whose usages can be searched for by text.
pub trait SearchTarget {
    /// The word to search for; empty when the symbol cannot be searched.
    fn search_text(&self) -> &str;
}
