//! Foundation types for the robust-yaml toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Identifiers of loaded documents
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - Domain constants (directory names, file extensions, messages)
//!
//! This module has NO dependencies on other robust-yaml modules.

pub mod constants;
mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
