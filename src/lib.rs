//! # robust-yaml
//!
//! Prototype resolution and inheritance analysis for Robust YAML prototype
//! documents.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Host features (declarations, usages, goto, inheritor navigation, rename)
//!   ↓
//! hir       → Prototype model, project-wide index, inheritance queries
//!   ↓
//! search    → Word search over loaded documents
//!   ↓
//! project   → Loaded documents, directory layout, loading from disk
//!   ↓
//! pattern   → Structural and value predicates over syntax nodes
//!   ↓
//! parser    → Logos lexer, rowan CST, typed AST
//!   ↓
//! base      → Primitives (FileId, TextRange, LineIndex, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → pattern → project → search → hir → ide)
// ============================================================================

/// Foundation types: FileId, TextRange, LineIndex
pub mod base;

/// Parser: Logos lexer, rowan CST, typed AST
pub mod parser;

/// Predicate combinators over syntax nodes
pub mod pattern;

/// Project management: loaded documents, workspace loading
pub mod project;

/// Usage search by word occurrence
pub mod search;

/// High-level IR: prototypes, index, inheritance
pub mod hir;

/// IDE features: declarations, usages, goto, inheritors, rename
pub mod ide;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};

// Re-export the main entry points
pub use hir::{Prototype, PrototypeId, PrototypesStorage};
pub use ide::{Analysis, AnalysisHost};
pub use project::{Project, ProjectConfig, WorkspaceLoader};
