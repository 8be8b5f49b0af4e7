//! Foundation types for the eventide toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`QualifiedName`] - `::`-joined paths such as `Extension::Behavior::Method`
//! - [`TextRange`], [`TextSize`] - Byte offsets into expression text
//! - Naming constants for synthetic behavior property accessors
//!
//! This module has NO dependencies on other eventide modules.

pub mod constants;
mod qualified_name;

pub use qualified_name::QualifiedName;
pub use text_size::{TextRange, TextSize};

// Re-export smol_str for convenience
pub use smol_str::SmolStr;
