//! # eventide-base
//!
//! Scoped identifier resolution and whole-project refactoring for event-sheet
//! projects: rename objects, extensions, events-functions, behaviors and
//! behavior properties, and move function parameters, everywhere they are
//! referenced.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! refactor    → WholeProjectRefactorer, RefactorIntent, required behaviors
//!   ↓
//! expression  → Logos lexer, call-node grammar, text-preserving rewriter
//!   ↓
//! scope       → ScopedNameContainer, ScopedContainers (identifier classes)
//!   ↓
//! metadata    → Platform, MetadataRegistry (declared functions/behaviors)
//!   ↓
//! project     → Project tree: objects, layouts, events, extensions
//!   ↓
//! base        → Primitives (QualifiedName, TextRange, naming constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → project → metadata → scope → expression → refactor)
// ============================================================================

/// Foundation types: QualifiedName, TextRange, naming constants
pub mod base;

/// Error types shared by every layer
pub mod error;

/// Project model: objects, layouts, events, events-functions extensions
pub mod project;

/// Extension metadata: declared functions, behaviors, instructions
pub mod metadata;

/// Scoped identifier resolution
pub mod scope;

/// Expression text: lexer, call nodes, rewriting
pub mod expression;

/// Whole-project refactoring operations
pub mod refactor;

// Re-export foundation types
pub use base::{QualifiedName, TextRange, TextSize};
pub use error::{RefactorError, Result};

// Re-export the entry points
pub use metadata::{MetadataRegistry, Platform, ProjectMetadata};
pub use refactor::{EntityKind, RefactorIntent, Scope, WholeProjectRefactorer};
pub use scope::{IdentifierKind, ScopedContainers};
