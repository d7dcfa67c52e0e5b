//! Parser tests
//!
//! Tests for the lossless YAML parser and the typed AST over realistic
//! prototype documents.

pub mod tests_documents;
