//! High-level IR (HIR): the prototype model.
//!
//! Prototypes are recognised from syntax trees, indexed project-wide and
//! linked through their parents fields.
//!
//! ## Key Types
//!
//! - [`PrototypeId`]: identity text of a prototype, or a degenerate sentinel
//! - [`Prototype`]: one declaration, identified by its declaring node
//! - [`PrototypeReference`]: a scalar naming a prototype by id
//! - [`PrototypesStorage`]: immutable id → declarations index
//! - [`Inheritors`]: breadth-first walk over transitive inheritors
//!
//! ## Layers
//!
//! ```text
//! SyntaxNode                ← parsed document
//!     │
//!     ▼
//! field patterns            ← where id/type/parents may appear
//!     │
//!     ▼
//! Prototype::from_node      ← recognition (cached per document version)
//!     │
//!     ▼
//! PrototypesStorage::build  ← project-wide index
//!     │
//!     ▼
//! immediate_inheritors      ← usage search filtered to parent occurrences
//!     │
//!     ▼
//! Inheritors                ← breadth-first closure
//! ```

pub mod field;
mod ids;
mod inheritors;
mod pointer;
mod prototype;
mod reference;
mod storage;
mod symbol;

pub use field::PrototypeField;
pub use ids::{PrototypeId, PrototypeReferenceLike};
pub use inheritors::{Inheritors, immediate_inheritors, inheritors};
pub use pointer::{NodeHandle, Restore, StaleHandle, SymbolPointer};
pub use prototype::{Prototype, PrototypeParents, containing_prototype};
pub use reference::{PrototypeReference, PrototypeTypeReference, references, same_type};
pub use storage::{BuildProgress, BuildStage, PrototypesStorage, StorageError};
pub use symbol::{SearchTarget, SourcedSymbol, Symbol, SymbolReference, UsageKind};
