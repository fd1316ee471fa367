//! Foundation types for the typedex toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//!
//! This module has NO dependencies on other typedex modules.

mod file_id;
mod position;

pub use file_id::FileId;
pub use position::{LineCol, LineIndex};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
