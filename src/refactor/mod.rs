//! Whole-project refactoring.
//!
//! Renames, removals and parameter moves are propagated through every events
//! document of a project: layouts, external events, and the events of every
//! events-function. Each document is rewritten under its own
//! [`ScopedContainers`](crate::scope::ScopedContainers), so a reference is
//! only changed when it resolves to the entity being refactored.
//!
//! ## Layout
//!
//! - [`TypeRename`] - exact-segment renames of instruction types
//! - [`EventsRewriter`] - applies type renames, parameter moves and
//!   [`ExpressionRule`]s to events
//! - [`WholeProjectRefactorer`] - the operations, one per kind of change
//! - [`RefactorIntent`] - declaration plus references, in one call
//! - required-behavior validation and transitive attachment

pub(crate) mod documents;
mod instruction_type;
mod intent;
mod refactorer;
mod required_behaviors;
mod rules;

pub use instruction_type::TypeRename;
pub use intent::{EntityKind, RefactorIntent, Scope};
pub use refactorer::WholeProjectRefactorer;
pub use required_behaviors::{
    RequiredBehaviorProblem, add_behavior_and_required_behaviors,
    find_invalid_required_behavior_properties,
};
pub use rules::{CallMatcher, EventsRewriter, ExpressionRule, ParameterMove};
