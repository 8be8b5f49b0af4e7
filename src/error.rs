//! Error types for resolution and refactoring operations.

use thiserror::Error;

/// Errors reported by scoped lookups and whole-project refactorings.
///
/// Rewrites that match nothing are not errors: renaming a function nobody
/// calls yet is a valid no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefactorError {
    /// A name is declared in none of the visited scopes or documents.
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// A parameter move names an index outside the declared parameters.
    #[error("parameter index {index} is out of range for {function} ({count} declared)")]
    InvalidParameterIndex {
        function: String,
        index: usize,
        count: usize,
    },

    /// A rename targets a name already declared in the same container.
    #[error("{kind} already exists: {name}")]
    NameTaken { kind: &'static str, name: String },

    /// A qualified name is empty or has empty segments.
    #[error("invalid qualified name: {0:?}")]
    InvalidQualifiedName(String),

    /// An operation on events-function objects was given another scope.
    #[error("not an events-function scope: {0}")]
    InvalidScope(String),
}

impl RefactorError {
    /// Create a not-found error.
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Create a name-taken error.
    pub fn name_taken(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NameTaken {
            kind,
            name: name.into(),
        }
    }

    /// Create an invalid-qualified-name error.
    pub fn invalid_qualified_name(name: impl Into<String>) -> Self {
        Self::InvalidQualifiedName(name.into())
    }

    /// Create an invalid-scope error.
    pub fn invalid_scope(scope: impl Into<String>) -> Self {
        Self::InvalidScope(scope.into())
    }
}

/// Result type for refactoring operations.
pub type Result<T> = std::result::Result<T, RefactorError>;

/// Errors raised while loading projects or platforms from JSON.
#[cfg(feature = "serde")]
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The document is not valid JSON or does not match the model.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while reading a document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
